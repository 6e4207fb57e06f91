use crate::auth::PasswordService;
use crate::domain::{DomainError, DomainResult};
use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;

/// PasswordService backed by Argon2 with a fresh random salt per hash
#[derive(Default)]
pub struct Argon2PasswordService;

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash_password(&self, password: &str) -> DomainResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| DomainError::PasswordHashingError(e.to_string()))?;

        Ok(hash.to_string())
    }

    fn verify_password(&self, password: &str, hash: &str) -> DomainResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| DomainError::PasswordHashingError(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_salts_differ() {
        let service = Argon2PasswordService::new();
        let hash1 = service.hash_password("same-password").unwrap();
        let hash2 = service.hash_password("same-password").unwrap();

        assert!(hash1.starts_with("$argon2"));
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_password_correct() {
        let service = Argon2PasswordService::new();
        let hash = service.hash_password("secure-password-123").unwrap();

        assert!(service.verify_password("secure-password-123", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_incorrect() {
        let service = Argon2PasswordService::new();
        let hash = service.hash_password("correct-password").unwrap();

        assert!(!service.verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        let service = Argon2PasswordService::new();
        let result = service.verify_password("any-password", "invalid-hash");
        assert!(matches!(result, Err(DomainError::PasswordHashingError(_))));
    }
}
