//! Password hashing using Argon2id
//!
//! User passwords are never stored in clear text. Each password is hashed
//! with a fresh random salt and stored as a PHC string, which carries the
//! algorithm, parameters and salt needed to verify it later.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params,
};

use crate::error::{SpendError, SpendResult};

/// Cost parameters for password hashing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHashParams {
    /// Memory cost in KiB (default: 19456 = 19 MiB)
    pub memory_cost: u32,
    /// Time cost (iterations, default: 2)
    pub time_cost: u32,
    /// Parallelism degree (default: 1)
    pub parallelism: u32,
}

impl Default for PasswordHashParams {
    fn default() -> Self {
        Self {
            memory_cost: 19456,
            time_cost: 2,
            parallelism: 1,
        }
    }
}

impl PasswordHashParams {
    fn hasher(&self) -> SpendResult<Argon2<'static>> {
        let params = Params::new(self.memory_cost, self.time_cost, self.parallelism, None)
            .map_err(|e| SpendError::Password(format!("Invalid Argon2 parameters: {}", e)))?;

        Ok(Argon2::new(
            argon2::Algorithm::Argon2id,
            argon2::Version::V0x13,
            params,
        ))
    }
}

/// Hash a password, returning a PHC-formatted string
pub fn hash_password(password: &str, params: &PasswordHashParams) -> SpendResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = params
        .hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| SpendError::Password(format!("Hashing failed: {}", e)))?;

    Ok(hash.to_string())
}

/// Check a candidate password against a stored PHC string.
///
/// A malformed stored hash never matches.
pub fn verify_password(candidate: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };

    // Parameters are read back from the PHC string itself
    Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .is_ok()
}
