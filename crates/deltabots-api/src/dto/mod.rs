//! Request and response data transfer objects.

pub mod request;
pub mod response;

use validator::Validate;

use deltabots_core::error::AppError;

/// Runs `validator` rules, turning failures into a validation error.
pub fn validate<T: Validate>(value: &T) -> Result<(), AppError> {
    value
        .validate()
        .map_err(|e| AppError::validation(format!("Invalid request: {e}")))
}
