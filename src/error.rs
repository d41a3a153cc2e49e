//! Crate-level error type.

use thiserror::Error;

use crate::config::ConfigError;
use crate::loader::LoadError;
use crate::validation::ValidationError;

/// Result alias for fallible simulation entry points.
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors that stop a simulation before it runs.
///
/// Memory exhaustion is not an error: it is reported per process inside
/// the schedule.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("invalid process set: {}", join_messages(.0))]
    Invalid(Vec<ValidationError>),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<Vec<ValidationError>> for SimError {
    fn from(errors: Vec<ValidationError>) -> Self {
        SimError::Invalid(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
