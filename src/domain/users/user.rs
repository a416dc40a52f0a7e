use uuid::Uuid;

/// Column widths of the `users` table.
pub const EMAIL_MAX_LEN: usize = 128;
pub const NAME_MAX_LEN: usize = 128;

#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// A user row together with its stored password digest. Only the login path
/// ever loads one of these.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}
