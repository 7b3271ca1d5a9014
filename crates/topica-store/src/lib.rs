//! Storage layer: the append-only feedback log.

mod error;
pub use error::StoreError;

mod feedback;
pub use feedback::{COLUMNS, FeedbackLog, FeedbackRecord};
