pub mod request;
pub mod schema;
pub mod vocab;

pub use request::ClassificationRequest;
pub use vocab::{
    Category, Completeness, FacilitationType, GeogScope, OutOfVocabulary, PpMethod, Purpose,
    TargetAudience,
};
