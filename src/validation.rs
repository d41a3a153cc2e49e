//! Input validation for process sets.
//!
//! Checks the scheduler's preconditions before a run. Detects:
//! - Duplicate or zero process IDs
//! - Non-positive burst times
//! - Negative arrival times
//! - Negative memory requirements
//! - Process sets whose schedule would run past `i64::MAX` ticks
//!
//! All problems are collected, not only the first one.

use std::collections::HashSet;

use thiserror::Error;

use crate::models::{Process, ProcessId};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error naming the offending process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Offending process.
    pub process_id: ProcessId,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two processes share the same ID.
    DuplicateId,
    /// Process ID is zero (IDs must be positive).
    ZeroId,
    /// Burst time is zero or negative.
    NonPositiveBurst,
    /// Arrival time is negative.
    NegativeArrival,
    /// Memory requirement is negative.
    NegativeMemory,
    /// Schedule times or their totals would exceed `i64::MAX`.
    TimeOverflow,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, process_id: ProcessId, message: impl Into<String>) -> Self {
        Self {
            kind,
            process_id,
            message: message.into(),
        }
    }
}

/// Validates a process set.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues
/// in input order.
pub fn validate_processes(processes: &[Process]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for p in processes {
        if p.id == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroId,
                p.id,
                "Process ID must be positive",
            ));
        }

        if !ids.insert(p.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                p.id,
                format!("Duplicate process ID: {}", p.id),
            ));
        }

        if p.burst_time <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                p.id,
                format!("Process {} has non-positive burst time {}", p.id, p.burst_time),
            ));
        }

        if p.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                p.id,
                format!("Process {} has negative arrival time {}", p.id, p.arrival_time),
            ));
        }

        if p.memory_required < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeMemory,
                p.id,
                format!(
                    "Process {} has negative memory requirement {}",
                    p.id, p.memory_required
                ),
            ));
        }
    }

    check_time_range(processes, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Bounds every finish time by `latest arrival + total burst` and every
/// metric total by `count * bound`; both must fit in `i64`.
fn check_time_range(processes: &[Process], errors: &mut Vec<ValidationError>) {
    let Some(last) = processes.last() else {
        return;
    };

    let mut horizon = processes
        .iter()
        .map(|p| p.arrival_time.max(0))
        .max()
        .unwrap_or(0);

    for p in processes.iter().filter(|p| p.burst_time > 0) {
        match horizon.checked_add(p.burst_time) {
            Some(next) => horizon = next,
            None => {
                errors.push(ValidationError::new(
                    ValidationErrorKind::TimeOverflow,
                    p.id,
                    format!("Process {} runs past the representable time range", p.id),
                ));
                return;
            }
        }
    }

    let count = i64::try_from(processes.len()).unwrap_or(i64::MAX);
    if horizon.checked_mul(count).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::TimeOverflow,
            last.id,
            format!(
                "Time totals over {} processes exceed the representable range",
                processes.len()
            ),
        ));
    }
}
