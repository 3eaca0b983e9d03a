//! Raw record parsing errors.

use thiserror::Error;

/// Errors raised while parsing a raw field-name → value record into a
/// typed boundary or metadata record.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("{kind} record is missing required field {field}")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },

    #[error("{kind} field {field} holds {value:?}, expected a number")]
    InvalidNumber {
        kind: &'static str,
        field: &'static str,
        value: String,
    },
}
