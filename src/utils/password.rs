use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand_core::OsRng;

use crate::types::error::AppError;

pub fn hash(plaintext: &str) -> Result<String, AppError> {
    let mut rng = OsRng;
    let salt = SaltString::generate(&mut rng);
    let digest = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))?;
    Ok(digest.to_string())
}

/// Mismatches and undecodable digests both come back `false`; verification
/// never errors.
pub fn verify(digest: &str, plaintext: &str) -> bool {
    match PasswordHash::new(digest) {
        Ok(parsed) => Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_roundtrip() {
        let digest = hash("hunter22").expect("hashing failed");
        assert!(verify(&digest, "hunter22"));
        assert!(!verify(&digest, "hunter23"));
    }

    #[test]
    fn salts_differ_between_hashes() {
        let a = hash("hunter22").expect("hashing failed");
        let b = hash("hunter22").expect("hashing failed");
        assert_ne!(a, b);
        assert!(verify(&a, "hunter22"));
        assert!(verify(&b, "hunter22"));
    }

    #[test]
    fn garbage_digest_is_just_false() {
        assert!(!verify("not-a-phc-string", "hunter22"));
        assert!(!verify("", "hunter22"));
    }
}
