//! Argon2id password hashing and verification.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use deltabots_core::error::AppError;

/// Maximum number of plaintext bytes that take part in hashing.
///
/// Longer inputs are truncated rather than rejected, so stored digests stay
/// compatible with accounts created under a 72-byte bcrypt-era limit.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Handles password hashing and verification using Argon2id.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Creates a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hashes a plaintext password using Argon2id with a random salt.
    ///
    /// The plaintext is normalized first (see [`normalize_password`]).
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(normalize_password(password).as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored Argon2id hash.
    ///
    /// Any malformed digest or verification error yields `false`.
    pub fn verify_password(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash.trim()) else {
            tracing::debug!("Stored password hash is not a valid PHC string");
            return false;
        };

        Argon2::default()
            .verify_password(normalize_password(password).as_bytes(), &parsed_hash)
            .is_ok()
    }
}

/// Trims surrounding whitespace and caps the result at
/// [`MAX_PASSWORD_BYTES`] without splitting a UTF-8 sequence.
pub fn normalize_password(password: &str) -> &str {
    let trimmed = password.trim();
    if trimmed.len() <= MAX_PASSWORD_BYTES {
        return trimmed;
    }
    let mut end = MAX_PASSWORD_BYTES;
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    &trimmed[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_salted() {
        let hasher = PasswordHasher::new();
        let a = hasher.hash_password("Secret123").unwrap();
        let b = hasher.hash_password("Secret123").unwrap();
        assert_ne!(a, b);
        assert!(hasher.verify_password("Secret123", &a));
        assert!(hasher.verify_password("Secret123", &b));
    }

    #[test]
    fn test_wrong_password_fails() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("Secret123").unwrap();
        assert!(!hasher.verify_password("Secret124", &hash));
        assert!(!hasher.verify_password("", &hash));
    }

    #[test]
    fn test_long_password_is_truncated() {
        let hasher = PasswordHasher::new();
        let long = "a".repeat(200);
        let hash = hasher.hash_password(&long).unwrap();
        assert!(hasher.verify_password(&long, &hash));
        // Only the first 72 bytes matter.
        assert!(hasher.verify_password(&"a".repeat(72), &hash));
        assert!(!hasher.verify_password(&"a".repeat(71), &hash));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // 71 ASCII bytes followed by a 2-byte character straddling the limit.
        let input = format!("{}é{}", "x".repeat(71), "tail");
        let normalized = normalize_password(&input);
        assert_eq!(normalized.len(), 71);
        assert!(normalized.chars().all(|c| c == 'x'));

        let emoji = "🔑".repeat(30);
        let normalized = normalize_password(&emoji);
        assert_eq!(normalized.len(), 72);
        assert_eq!(normalized.chars().count(), 18);
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("  Secret123\n").unwrap();
        assert!(hasher.verify_password("Secret123", &hash));
        assert!(hasher.verify_password("Secret123", &format!("{hash}\n")));
    }

    #[test]
    fn test_malformed_digest_returns_false() {
        let hasher = PasswordHasher::new();
        assert!(!hasher.verify_password("Secret123", "not-a-hash"));
        assert!(!hasher.verify_password("Secret123", ""));
        assert!(!hasher.verify_password("Secret123", "$2b$12$legacy.bcrypt.digest"));
    }
}
