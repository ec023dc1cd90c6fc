//! Entry validation run before a record may be saved. Checks are fail-fast:
//! the first missing mandatory field (in declaration order) wins, and the
//! kind-specific rules only run once every mandatory field is present.

use thiserror::Error;

use crate::fields::FormField;
use crate::models::Record;

/// Why an entry was rejected. Both variants are user-input problems whose
/// `Display` output is shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Carries the label of the first empty mandatory field.
    #[error("{0} is required")]
    MissingField(&'static str),
    /// Debut/retirement years that are half-filled or out of order.
    #[error("{}", describe_range(*.0, *.1))]
    InvalidRange(Option<i32>, Option<i32>),
}

/// Validate `record` against its kind's mandatory fields and rules.
pub fn validate<R: Record>(record: &R) -> Result<(), ValidationError> {
    let mandatory = R::Field::ALL.iter().copied().filter(|f| f.is_mandatory());
    first_missing(record, mandatory)?;
    record.check_rules()
}

/// Same as [`validate`] but with a caller-supplied, ordered mandatory list.
pub fn validate_fields<R: Record>(
    record: &R,
    mandatory: &[R::Field],
) -> Result<(), ValidationError> {
    first_missing(record, mandatory.iter().copied())?;
    record.check_rules()
}

/// Either both years are absent, or both are present with `end > start`.
pub fn check_active_years(start: Option<i32>, end: Option<i32>) -> Result<(), ValidationError> {
    match (start, end) {
        (None, None) => Ok(()),
        (Some(start), Some(end)) if end > start => Ok(()),
        _ => Err(ValidationError::InvalidRange(start, end)),
    }
}

fn first_missing<R: Record>(
    record: &R,
    mut fields: impl Iterator<Item = R::Field>,
) -> Result<(), ValidationError> {
    match fields.find(|field| record.is_blank(*field)) {
        Some(field) => Err(ValidationError::MissingField(field.label())),
        None => Ok(()),
    }
}

fn describe_range(start: Option<i32>, end: Option<i32>) -> String {
    match (start, end) {
        (Some(_), None) => "Retirement year is required when a debut year is set".to_string(),
        (None, Some(_)) => "Debut year is required when a retirement year is set".to_string(),
        (Some(start), Some(end)) => {
            format!("Retirement year ({end}) must be after debut year ({start})")
        }
        (None, None) => "Active years are incomplete".to_string(),
    }
}
