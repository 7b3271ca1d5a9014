use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("feedback log io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("feedback log csv error: {0}")]
    Csv(#[from] csv::Error),
}
