//! Signed access token issuing, verification, and claims.

pub mod claims;
pub mod issuer;
pub mod verifier;

pub use claims::{Claims, TokenIdentity};
pub use issuer::{IssuedToken, TokenIssuer};
pub use verifier::TokenVerifier;

use std::str::FromStr;

use jsonwebtoken::Algorithm;

use deltabots_core::config::AuthConfig;
use deltabots_core::error::AppError;

/// Parses the configured HMAC algorithm.
pub(crate) fn signing_algorithm(config: &AuthConfig) -> Result<Algorithm, AppError> {
    match Algorithm::from_str(config.jwt_algorithm.trim()) {
        Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => Ok(alg),
        _ => Err(AppError::configuration(format!(
            "Unsupported token algorithm '{}'",
            config.jwt_algorithm
        ))),
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "unit-test-signing-secret".to_string(),
        superadmin_key: "unit-test-superadmin-key".to_string(),
        ..AuthConfig::default()
    }
}
