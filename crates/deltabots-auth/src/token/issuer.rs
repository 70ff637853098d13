//! Access token creation with configurable signing and TTL.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

use deltabots_core::config::AuthConfig;
use deltabots_core::error::AppError;

use super::claims::{Claims, TokenIdentity};
use super::signing_algorithm;

/// A freshly signed access token.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct IssuedToken {
    /// Encoded JWT.
    pub token: String,
    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

/// Creates signed access tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Header carrying the configured algorithm.
    header: Header,
    /// TTL applied when the caller does not pass one.
    default_ttl: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("algorithm", &self.header.alg)
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

impl TokenIssuer {
    /// Creates a new issuer from auth configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let algorithm: Algorithm = signing_algorithm(config)?;
        let default_ttl = i64::try_from(config.access_token_ttl_minutes)
            .ok()
            .and_then(Duration::try_minutes)
            .ok_or_else(|| AppError::configuration("auth.access_token_ttl_minutes is out of range"))?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            header: Header::new(algorithm),
            default_ttl,
        })
    }

    /// Signs a token for `identity` expiring `ttl` from now.
    ///
    /// A zero or negative TTL produces a token that is already expired.
    pub fn issue(&self, identity: &TokenIdentity, ttl: Option<Duration>) -> Result<IssuedToken, AppError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl.unwrap_or(self.default_ttl))
            .ok_or_else(|| AppError::internal("Token expiry overflow"))?;

        let claims = Claims {
            sub: identity.email.clone(),
            role: identity.role,
            tenant_id: identity.tenant_id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&self.header, &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok(IssuedToken { token, expires_at })
    }
}
