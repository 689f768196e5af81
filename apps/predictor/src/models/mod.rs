pub mod categories;
pub mod request;
pub mod result;

use thiserror::Error;

pub use categories::{City, CompanySize, EducationLevel, JobTitle};
pub use request::{FieldEdit, PredictionRequest};
pub use result::PredictionResult;

/// Rejected form edit. The form keeps its previous value for the field.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("{field} must be numeric (got '{value}')")]
    NotNumeric { field: &'static str, value: String },

    #[error("{field} must be one of {allowed:?} (got '{value}')")]
    NotInSet {
        field: &'static str,
        value: String,
        allowed: Vec<&'static str>,
    },
}
