/// One-way transform used to store and check login passwords.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> anyhow::Result<String>;
    fn verify(&self, plaintext: &str, digest: &str) -> bool;
}
