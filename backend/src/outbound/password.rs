//! Argon2id implementation of the `PasswordHasher` port.
//!
//! Hashes are PHC strings carrying their own salt and parameters, so stored
//! hashes keep verifying if the default cost parameters change later.

use argon2::password_hash::{self, SaltString};
use argon2::{Argon2, PasswordHasher as _, PasswordVerifier as _};
use rand::rngs::OsRng;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Argon2id hasher with the crate's default cost parameters.
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
    decoy: String,
}

impl Argon2PasswordHasher {
    /// Build a hasher and precompute the decoy hash used for unknown users.
    ///
    /// # Errors
    ///
    /// Fails only if the platform RNG or Argon2 itself is unusable.
    pub fn new() -> Result<Self, PasswordHashError> {
        let argon2 = Argon2::default();
        let salt = SaltString::generate(&mut OsRng);
        let decoy = argon2
            .hash_password(b"decoy password for absent accounts", &salt)
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?
            .to_string();
        Ok(Self { argon2, decoy })
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let encoded = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?;
        Ok(PasswordHash::new(encoded.to_string()))
    }

    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        let parsed = password_hash::PasswordHash::new(hash.as_str())
            .map_err(|err| PasswordHashError::malformed_hash(err.to_string()))?;
        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHashError::malformed_hash(err.to_string())),
        }
    }

    fn verify_decoy(&self, password: &str) {
        if let Ok(parsed) = password_hash::PasswordHash::new(&self.decoy) {
            let _decoy_outcome = self.argon2.verify_password(password.as_bytes(), &parsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::new().expect("argon2 available")
    }

    #[rstest]
    fn hash_round_trips_through_verify(hasher: Argon2PasswordHasher) {
        let hash = hasher.hash("correct horse").expect("hash");
        assert!(hash.as_str().starts_with("$argon2id$"));
        assert!(hasher.verify("correct horse", &hash).expect("verify"));
        assert!(!hasher.verify("wrong horse", &hash).expect("verify"));
    }

    #[rstest]
    fn salts_differ_between_hashes(hasher: Argon2PasswordHasher) {
        let first = hasher.hash("same").expect("hash");
        let second = hasher.hash("same").expect("hash");
        assert_ne!(first.as_str(), second.as_str());
    }

    #[rstest]
    fn malformed_hashes_are_reported(hasher: Argon2PasswordHasher) {
        let err = hasher
            .verify("pw", &PasswordHash::new("not-a-phc-string"))
            .expect_err("malformed");
        assert!(matches!(err, PasswordHashError::MalformedHash { .. }));
    }
}
