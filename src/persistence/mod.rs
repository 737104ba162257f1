use crate::activity::Activity;
use crate::activity_validation;
use crate::error::AnalysisError;
use polars::prelude::PolarsError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("dataframe conversion error: {0}")]
    DataFrame(#[from] PolarsError),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Structural checks applied to every batch read from or written to disk.
pub fn validate_activities(activities: &[Activity]) -> PersistenceResult<()> {
    activity_validation::validate_activity_collection(activities)?;
    Ok(())
}

pub mod file;

pub use file::{
    load_schedule_from_csv, load_schedule_from_json, save_layout_to_json, save_schedule_to_csv,
    save_schedule_to_json,
};
