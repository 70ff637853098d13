//! PostgreSQL repository implementations, one per table.

pub mod api_key;
pub mod bot;
pub mod tenant;
pub mod user;

pub use api_key::ApiKeyRepository;
pub use bot::BotRepository;
pub use tenant::TenantRepository;
pub use user::UserRepository;

use deltabots_core::error::{AppError, ErrorKind};

/// SQLSTATE for a value longer than its `VARCHAR` column.
const STRING_DATA_RIGHT_TRUNCATION: &str = "22001";

/// Maps a sqlx error into an [`AppError`], turning constraint violations
/// into conflicts so callers can report them as 409 and over-long values
/// into validation errors (422).
pub(crate) fn map_db_error(context: &'static str, err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.code().as_deref() == Some(STRING_DATA_RIGHT_TRUNCATION) {
            return AppError::with_source(
                ErrorKind::Validation,
                format!("{context}: value too long for column"),
                err,
            );
        }
        if db_err.is_unique_violation() {
            let constraint = db_err.constraint().unwrap_or("unique").to_string();
            return AppError::with_source(
                ErrorKind::Conflict,
                format!("{context}: duplicate value violates {constraint}"),
                err,
            );
        }
        if db_err.is_foreign_key_violation() {
            return AppError::with_source(
                ErrorKind::Conflict,
                format!("{context}: referenced or dependent row constraint"),
                err,
            );
        }
    }
    AppError::with_source(ErrorKind::Database, context, err)
}
