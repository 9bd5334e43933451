//! Account credentials.
//!
//! Stored hashes are Argon2id PHC strings. Seed files may carry hashes made
//! elsewhere, so verification checks the algorithm before comparing.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2,
};
use tracing::warn;

use crate::error::{AccessError, Result};
use crate::session::Account;

/// Hash an account password, returning a PHC string with salt and parameters.
///
/// Blank passwords are refused.
pub fn hash_password(password: &str) -> Result<String> {
    if password.trim().is_empty() {
        return Err(AccessError::PasswordHash("password must not be blank".to_string()));
    }
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AccessError::PasswordHash(format!("failed to hash password: {e}")))
}

fn parse_stored(hash: &str) -> Result<PasswordHash<'_>> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AccessError::PasswordHash(format!("invalid hash format: {e}")))?;
    if parsed.algorithm != Algorithm::Argon2id.ident() {
        return Err(AccessError::PasswordHash(format!(
            "unsupported algorithm: {}",
            parsed.algorithm
        )));
    }
    Ok(parsed)
}

/// Check a password against a stored PHC hash.
///
/// A malformed or non-Argon2id hash is an error; a mismatch is `Ok(false)`.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = parse_stored(hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Authenticate an account by password.
///
/// A wrong password and a corrupt stored hash both surface as
/// [`AccessError::Authentication`]; the hash problem is logged.
pub fn verify_account(account: &Account, password: &str) -> Result<()> {
    match verify_password(password, &account.password_hash) {
        Ok(true) => Ok(()),
        Ok(false) => {
            warn!(user = %account.username, "Login rejected: bad password");
            Err(AccessError::Authentication(account.username.clone()))
        }
        Err(e) => {
            warn!(user = %account.username, error = %e, "Login rejected: unusable password hash");
            Err(AccessError::Authentication(account.username.clone()))
        }
    }
}
