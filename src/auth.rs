//! Credential and session-token primitives.
//!
//! Passwords are stored as PBKDF2-HMAC-SHA256 digests with a per-user
//! random salt. Session tokens are opaque random strings; only their
//! SHA-256 hash ever touches the database.

use pbkdf2::pbkdf2_hmac;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

pub const PBKDF2_ITERATIONS: u32 = 600_000;
pub const HASH_LENGTH: usize = 32;
pub const SALT_LENGTH: usize = 32;

/// Derive the stored digest for a password and salt.
pub fn hash_password(password: &str, salt: &[u8; SALT_LENGTH]) -> [u8; HASH_LENGTH] {
    let mut digest = [0u8; HASH_LENGTH];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut digest);
    digest
}

/// Constant-time password check against the stored digest.
pub fn verify_password(password: &str, salt: &[u8], stored: &[u8]) -> bool {
    let Ok(salt) = <[u8; SALT_LENGTH]>::try_from(salt) else {
        return false;
    };
    if stored.len() != HASH_LENGTH {
        return false;
    }
    let candidate = hash_password(password, &salt);
    candidate.ct_eq(stored).into()
}

/// Generate a cryptographically random salt
pub fn generate_salt() -> [u8; SALT_LENGTH] {
    use rand::RngCore;
    let mut salt = [0u8; SALT_LENGTH];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}

/// Generate a random bearer token (URL-safe base64, 32 bytes of entropy).
pub fn generate_token() -> String {
    use base64::Engine;
    let bytes: [u8; 32] = rand::random();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Hash a bearer token string using SHA-256.
pub fn hash_token(token: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_verifies_against_own_hash() {
        let salt = generate_salt();
        let stored = hash_password("hunter2!", &salt);
        assert!(verify_password("hunter2!", &salt, &stored));
    }

    #[test]
    fn wrong_password_is_rejected() {
        let salt = generate_salt();
        let stored = hash_password("hunter2!", &salt);
        assert!(!verify_password("hunter3!", &salt, &stored));
    }

    #[test]
    fn wrong_salt_is_rejected() {
        let stored = hash_password("hunter2!", &[1u8; SALT_LENGTH]);
        assert!(!verify_password("hunter2!", &[2u8; SALT_LENGTH], &stored));
    }

    #[test]
    fn truncated_stored_digest_is_rejected() {
        let salt = generate_salt();
        let stored = hash_password("hunter2!", &salt);
        assert!(!verify_password("hunter2!", &salt, &stored[..16]));
    }

    #[test]
    fn generate_token_is_unique() {
        let t1 = generate_token();
        let t2 = generate_token();
        assert_ne!(t1, t2);
        assert!(!t1.is_empty());
    }

    #[test]
    fn hash_token_is_deterministic() {
        assert_eq!(hash_token("test"), hash_token("test"));
        assert_ne!(hash_token("token-a"), hash_token("token-b"));
    }

    #[test]
    fn pbkdf2_takes_meaningful_time() {
        let start = std::time::Instant::now();
        let _ = hash_password("test_password", &[0u8; SALT_LENGTH]);
        let elapsed = start.elapsed();
        assert!(
            elapsed.as_millis() > 100,
            "PBKDF2 too fast: {}ms — brute force protection insufficient",
            elapsed.as_millis()
        );
    }
}
