use thiserror::Error;

/// Errors that can occur when turning a raw filter value into a typed filter
///
/// These never abort a query; the filter is dropped instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterParseError {
    #[error("Invalid number '{operand}' for {field} filter")]
    InvalidNumber { field: &'static str, operand: String },

    #[error("Number '{operand}' for {field} filter is not a finite integer")]
    OutOfRange { field: &'static str, operand: String },
}
