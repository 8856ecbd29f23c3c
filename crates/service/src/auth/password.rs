use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, PasswordHash, Version,
};
use rand::rngs::OsRng;

use super::errors::AuthError;

/// Password hashing policy: Argon2id with explicit cost parameters.
///
/// The produced PHC string embeds salt and parameters, so verification needs
/// no side-channel lookup and keeps working across cost changes.
#[derive(Clone)]
pub struct PasswordPolicy {
    argon2: Argon2<'static>,
}

impl PasswordPolicy {
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, AuthError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| AuthError::Hash(e.to_string()))?;
        Ok(Self { argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params) })
    }

    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::Hash(e.to_string()))?
            .to_string();
        Ok(hash)
    }

    /// Constant-time comparison against a stored PHC string. A mismatch is
    /// indistinguishable from an unknown email at this layer's error kind.
    pub fn verify(&self, password: &str, stored: &str) -> Result<(), AuthError> {
        let parsed = PasswordHash::new(stored).map_err(|e| AuthError::Hash(e.to_string()))?;
        self.argon2
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| AuthError::InvalidCredentials)
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self { argon2: Argon2::default() }
    }
}
