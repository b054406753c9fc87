use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

#[derive(Debug, thiserror::Error)]
#[error("Password hashing failed: {0}")]
pub struct PasswordHashError(String);

/// Hash a plaintext password with Argon2id and a random salt
pub fn hash_password(plaintext: &str) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordHashError(e.to_string()))
}

/// Verify a plaintext password against a stored digest. An undecodable
/// digest counts as a mismatch.
pub fn verify_password(plaintext: &str, digest: &str) -> bool {
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
    fn hash_then_verify() {
        let digest = hash_password("longenoughpw").unwrap();
        assert!(verify_password("longenoughpw", &digest));
        assert!(!verify_password("wrong-password", &digest));
    }

    #[test]
    fn corrupt_digest_is_a_mismatch() {
        assert!(!verify_password("longenoughpw", "not-a-phc-string"));
    }

    #[test]
    fn hashes_are_salted() {
        let first = hash_password("longenoughpw").unwrap();
        let second = hash_password("longenoughpw").unwrap();
        assert_ne!(first, second);
    }
}
