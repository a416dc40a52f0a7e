use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;
use sha2::{Digest, Sha256};

use crate::application::ports::password_hasher::PasswordHasher;

/// Unsalted SHA-256, hex encoded. Digests are deterministic, so verification
/// is a direct string comparison. Kept for compatibility with stored digests;
/// prefer [`Argon2PasswordHasher`] for new deployments.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256PasswordHasher;

impl PasswordHasher for Sha256PasswordHasher {
    fn hash(&self, plaintext: &str) -> anyhow::Result<String> {
        Ok(format!("{:x}", Sha256::digest(plaintext.as_bytes())))
    }

    fn verify(&self, plaintext: &str, digest: &str) -> bool {
        self.hash(plaintext)
            .map(|candidate| candidate == digest)
            .unwrap_or(false)
    }
}

/// Salted Argon2id digests in PHC string format.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plaintext: &str) -> anyhow::Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!(e.to_string()))?
            .to_string();
        Ok(hash)
    }

    fn verify(&self, plaintext: &str, digest: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(digest) else {
            return false;
        };
        Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }
}
