pub mod delete_account;
pub mod get_user;
pub mod list_users;
pub mod update_profile;

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("Cannot modify another user's account")]
    Forbidden,
    #[error("User not found")]
    NotFound,
    #[error("Email already registered")]
    EmailTaken,
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
    #[error("{0} must be at most {1} characters")]
    TooLong(&'static str, usize),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
