#![deny(unused_crate_dependencies)]
#![warn(missing_docs)]

//! Password hashing for staff accounts.
//!
//! Hashes are Argon2id PHC strings (`$argon2id$v=19$...`) with a random salt,
//! so hashing the same password twice yields different strings.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error("failed to hash password: {0}")]
    Hash(argon2::password_hash::Error),

    #[error("malformed password hash: {0}")]
    MalformedHash(argon2::password_hash::Error),
}

/// The crate result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Hash a password with Argon2id and a freshly generated salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(Error::Hash)?
        .to_string();

    Ok(hash)
}

/// Check a plaintext password against a stored hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(Error::MalformedHash)?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
