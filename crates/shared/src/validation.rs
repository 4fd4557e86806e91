//! Common validation utilities.

use validator::ValidationError;

/// Longest status label a task may carry.
pub const MAX_TASK_STATUS_LENGTH: usize = 50;

lazy_static::lazy_static! {
    static ref SCHEMA_NAME_REGEX: regex::Regex =
        regex::Regex::new(r"^[a-z_][a-z0-9_]{0,62}$").unwrap();
}

/// Validates a PostgreSQL schema name.
///
/// The schema is interpolated into `SET search_path` and `CREATE SCHEMA`, which
/// cannot take bind parameters, so only lowercase unquoted identifiers pass.
pub fn validate_schema_name(name: &str) -> Result<(), ValidationError> {
    if SCHEMA_NAME_REGEX.is_match(name) {
        Ok(())
    } else {
        let mut err = ValidationError::new("schema_name");
        err.message = Some(
            "Schema name must be a lowercase identifier (letters, digits, underscore)".into(),
        );
        Err(err)
    }
}

/// Validates that a string has non-whitespace content.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("not_blank");
        err.message = Some("Value must not be blank".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Validates a task status label.
pub fn validate_task_status(status: &str) -> Result<(), ValidationError> {
    validate_not_blank(status)?;
    if status.chars().count() > MAX_TASK_STATUS_LENGTH {
        let mut err = ValidationError::new("task_status_length");
        err.message = Some("Task status must be at most 50 characters".into());
        return Err(err);
    }
    Ok(())
}
