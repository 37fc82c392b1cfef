//! Validation system for configuration values
//!
//! Each config section implements the `ConfigSection` trait so `Config` can
//! gather the errors of every section in one pass.

pub use crate::error::ValidationError;
use std::collections::HashSet;

/// Trait for configuration sections that can validate themselves
pub trait ConfigSection: Default {
    /// Validates the configuration section
    ///
    /// Returns every validation error found. Ok means valid.
    fn validate(&self) -> Result<(), Vec<ValidationError>>;
}

/// Field checks shared by the config sections
///
/// Each check returns the error for one field so a section can gather all
/// of them with [`Validator::collect_errors`].
pub struct Validator;

impl Validator {
    /// `value` must lie in `min..=max`
    pub fn in_range<T>(value: T, min: T, max: T, field: &str) -> Result<(), ValidationError>
    where
        T: PartialOrd + std::fmt::Display + Copy,
    {
        if (min..=max).contains(&value) {
            return Ok(());
        }
        Err(ValidationError::with_value(
            field,
            format!("must be between {} and {}", min, max),
            value,
        ))
    }

    /// `value` must contain something other than whitespace
    pub fn not_empty(value: &str, field: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new(field, "must not be empty"));
        }
        Ok(())
    }

    /// `value` must name one of `allowed`, ignoring case and surrounding space
    pub fn one_of(value: &str, allowed: &[&str], field: &str) -> Result<(), ValidationError> {
        let wanted = value.trim();
        if allowed.iter().any(|option| option.eq_ignore_ascii_case(wanted)) {
            return Ok(());
        }
        Err(ValidationError::with_value(
            field,
            format!("must be one of: {}", allowed.join(", ")),
            value,
        ))
    }

    /// `value` (trimmed) must not already be in `seen`; records it otherwise
    pub fn unique<'a>(
        seen: &mut HashSet<&'a str>,
        value: &'a str,
        field: &str,
        what: &str,
    ) -> Result<(), ValidationError> {
        if seen.insert(value.trim()) {
            return Ok(());
        }
        Err(ValidationError::with_value(
            field,
            format!("{} is mapped more than once", what),
            value,
        ))
    }

    /// Keeps only the failures, or Ok when there are none
    pub fn collect_errors(
        results: Vec<Result<(), ValidationError>>,
    ) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = results.into_iter().filter_map(Result::err).collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
