use uuid::Uuid;

/// Lifetime of every issued access token.
pub const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    Missing,
    #[error("Malformed token")]
    Malformed,
    #[error("Token has expired")]
    Expired,
    #[error("Signature verification failed")]
    InvalidSignature,
    /// Well-formed and unexpired, but the account it names is gone.
    #[error("User no longer exists")]
    UnknownUser,
}

pub trait TokenService: Send + Sync {
    fn issue(&self, user_id: Uuid) -> anyhow::Result<String>;
    fn verify(&self, token: &str) -> Result<Uuid, AuthError>;
}
