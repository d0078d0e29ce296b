//! Input validation helpers.

use validator::Validate;

use foodbridge_core::error::{AppError, ErrorKind};
use foodbridge_core::result::AppResult;

/// Run the derived validation rules and convert failures into a
/// `Validation` error.
pub fn validate_input<T: Validate>(input: &T) -> AppResult<()> {
    input.validate().map_err(|e| {
        AppError::with_source(ErrorKind::Validation, format!("Invalid input: {e}"), e)
    })
}
