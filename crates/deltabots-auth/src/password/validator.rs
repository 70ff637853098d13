//! Password policy enforcement for new passwords.

use deltabots_core::config::AuthConfig;
use deltabots_core::error::AppError;

/// Validates new passwords against the configured minimum length.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length in characters, counted after trimming.
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Returns `Ok(())` if the password is acceptable.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.trim().chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_length() {
        let validator = PasswordValidator::new(&AuthConfig::default());
        assert!(validator.validate("123456").is_ok());
        assert!(validator.validate("12345").is_err());
        assert!(validator.validate("  12345  ").is_err());
    }
}
