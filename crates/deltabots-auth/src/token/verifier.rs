//! Access token validation.
//!
//! Validity depends only on the signature and the expiry. There is no
//! revocation store; rotating the signing secret invalidates every token.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, Validation, decode};

use deltabots_core::config::AuthConfig;
use deltabots_core::error::AppError;

use super::claims::Claims;
use super::signing_algorithm;

/// Validates access tokens.
#[derive(Clone)]
pub struct TokenVerifier {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    /// Creates a new verifier from auth configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let mut validation = Validation::new(signing_algorithm(config)?);
        validation.validate_exp = true;
        validation.leeway = 0;

        Ok(Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        })
    }

    /// Decodes and validates a token string.
    ///
    /// Every failure (bad signature, malformed input, expiry) becomes the
    /// same invalid-credentials error.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(token.trim(), &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(reason = ?e.kind(), "Access token rejected");
                AppError::invalid_credentials()
            })?
            .claims;

        if claims.is_expired_at(Utc::now()) {
            tracing::debug!("Access token rejected: expired");
            return Err(AppError::invalid_credentials());
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Timelike};
    use deltabots_core::error::ErrorKind;
    use deltabots_entity::user::UserRole;
    use uuid::Uuid;

    use super::*;
    use crate::token::{TokenIdentity, TokenIssuer, test_config};

    fn identity() -> TokenIdentity {
        TokenIdentity {
            email: "admin@x.com".to_string(),
            role: UserRole::ClientAdmin,
            tenant_id: Some(Uuid::new_v4()),
        }
    }

    #[test]
    fn test_round_trip_claims() {
        let config = test_config();
        let who = identity();
        let issued = TokenIssuer::new(&config).unwrap().issue(&who, None).unwrap();
        let claims = TokenVerifier::new(&config).unwrap().verify(&issued.token).unwrap();
        assert_eq!(claims.email(), "admin@x.com");
        assert_eq!(claims.role, UserRole::ClientAdmin);
        assert_eq!(claims.tenant_id, who.tenant_id);
        assert_eq!(claims.expires_at(), Some(issued.expires_at.with_nanosecond(0).unwrap()));
        assert_eq!(claims.exp - claims.iat, 60 * 60);
    }

    #[test]
    fn test_zero_ttl_is_rejected() {
        let config = test_config();
        let issuer = TokenIssuer::new(&config).unwrap();
        let verifier = TokenVerifier::new(&config).unwrap();

        let zero = issuer.issue(&identity(), Some(Duration::zero())).unwrap();
        assert_eq!(verifier.verify(&zero.token).unwrap_err().kind, ErrorKind::Authentication);

        let past = issuer.issue(&identity(), Some(Duration::minutes(-5))).unwrap();
        assert!(verifier.verify(&past.token).is_err());
    }

    #[test]
    fn test_flipped_signature_is_rejected() {
        let config = test_config();
        let issued = TokenIssuer::new(&config).unwrap().issue(&identity(), None).unwrap();
        let verifier = TokenVerifier::new(&config).unwrap();

        let mut bytes = issued.token.into_bytes();
        let last = bytes.len() - 2;
        bytes[last] = if bytes[last] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        let err = verifier.verify(&tampered).unwrap_err();
        assert_eq!(err.message, "Invalid credentials");
    }

    #[test]
    fn test_other_secret_is_rejected() {
        let config = test_config();
        let issued = TokenIssuer::new(&config).unwrap().issue(&identity(), None).unwrap();

        let mut rotated = test_config();
        rotated.jwt_secret = "rotated-secret".to_string();
        assert!(TokenVerifier::new(&rotated).unwrap().verify(&issued.token).is_err());
    }

    #[test]
    fn test_malformed_and_algorithm_mismatch() {
        let config = test_config();
        let verifier = TokenVerifier::new(&config).unwrap();
        assert!(verifier.verify("").is_err());
        assert!(verifier.verify("not.a.jwt").is_err());

        let mut hs512 = test_config();
        hs512.jwt_algorithm = "HS512".to_string();
        let issued = TokenIssuer::new(&hs512).unwrap().issue(&identity(), None).unwrap();
        assert!(verifier.verify(&issued.token).is_err());
    }

    #[test]
    fn test_unsupported_algorithm_is_config_error() {
        let mut config = test_config();
        config.jwt_algorithm = "RS256".to_string();
        assert_eq!(
            TokenVerifier::new(&config).unwrap_err().kind,
            ErrorKind::Configuration
        );
    }
}
