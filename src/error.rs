//! Errors raised while validating and analysing an activity batch.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("activity {activity} references unknown predecessor {predecessor}")]
    InvalidReference {
        activity: String,
        predecessor: String,
    },

    #[error("predecessor cycle detected involving activity {activity}")]
    Cycle { activity: String },

    #[error("activity {activity} has invalid duration {duration} (must be a finite value >= 0)")]
    InvalidDuration { activity: String, duration: f64 },

    #[error("duplicate activity id {0}")]
    DuplicateId(String),

    #[error("invalid layout configuration: {0}")]
    InvalidConfig(String),
}

pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;
