//! One-way hashing and verification of identity secrets (argon2id, PHC
//! strings).

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use rand_core::OsRng;

use crate::{Error, Result};

/// Hash `secret` with a fresh random salt.
pub fn hash_secret(secret: &str) -> Result<String> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(secret.as_bytes(), &salt)
    .map(|h| h.to_string())
    .map_err(|e| Error::Internal(format!("argon2 error: {e}")))
}

/// Whether `secret` matches `hash`. A malformed hash never verifies.
pub fn verify_secret(secret: &str, hash: &str) -> bool {
  let Ok(parsed) = PasswordHash::new(hash) else {
    return false;
  };
  Argon2::default()
    .verify_password(secret.as_bytes(), &parsed)
    .is_ok()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn correct_secret_verifies() {
    let hash = hash_secret("hunter2").unwrap();
    assert!(hash.starts_with("$argon2id$"));
    assert!(verify_secret("hunter2", &hash));
  }

  #[test]
  fn wrong_secret_fails() {
    let hash = hash_secret("hunter2").unwrap();
    assert!(!verify_secret("hunter3", &hash));
  }

  #[test]
  fn salts_differ() {
    assert_ne!(hash_secret("same").unwrap(), hash_secret("same").unwrap());
  }

  #[test]
  fn malformed_hash_fails() {
    assert!(!verify_secret("anything", "not-a-phc-string"));
  }
}
