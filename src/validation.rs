//! Input validation for process sets.
//!
//! Checks structural integrity of process descriptors before simulation.
//! Detects:
//! - Duplicate process IDs
//! - The reserved ID 0 (IDs are positive)
//! - Zero burst times
//!
//! Input frontends run these checks and surface every failure to the user
//! at once; the engine itself assumes validated input and does not
//! re-check.

use crate::models::Process;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two processes share the same ID.
    DuplicateId,
    /// A process uses the reserved ID 0.
    InvalidId,
    /// A process demands no CPU time.
    ZeroBurst,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a process set for simulation.
///
/// Checks:
/// 1. All process IDs are positive
/// 2. No duplicate process IDs
/// 3. All burst times are strictly positive
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(processes: &[Process]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for process in processes {
        if process.id == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidId,
                "Process IDs must be positive; 0 is reserved",
            ));
        }
        if !seen.insert(process.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process ID: {}", process.id),
            ));
        }
        if process.burst_time == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroBurst,
                format!("Process P{} has a zero burst time", process.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_input() {
        let procs = vec![
            Process::new(1, 0, 5),
            Process::new(2, 1, 3).with_priority(2),
        ];
        assert!(validate_input(&procs).is_ok());
    }

    #[test]
    fn test_duplicate_id() {
        let procs = vec![Process::new(1, 0, 5), Process::new(1, 2, 3)];
        let errors = validate_input(&procs).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_zero_id() {
        let procs = vec![Process::new(0, 0, 5)];
        let errors = validate_input(&procs).unwrap_err();
        assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::InvalidId));
    }

    #[test]
    fn test_zero_burst() {
        let procs = vec![Process::new(1, 0, 0)];
        let errors = validate_input(&procs).unwrap_err();
        assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::ZeroBurst));
        assert!(errors[0].message.contains("P1"));
    }

    #[test]
    fn test_multiple_errors_reported_together() {
        let procs = vec![
            Process::new(0, 0, 0),
            Process::new(2, 1, 3),
            Process::new(2, 2, 4),
        ];
        let errors = validate_input(&procs).unwrap_err();
        assert!(errors.len() >= 3);
    }

    #[test]
    fn test_empty_set_is_structurally_valid() {
        // Emptiness is rejected by the engine, not by validation.
        assert!(validate_input(&[]).is_ok());
    }
}
