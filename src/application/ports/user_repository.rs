use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::password_hasher::PasswordHasher;
use crate::domain::users::user::{User, UserCredentials};

/// The store refused a write because another account already uses the email.
#[derive(Debug, thiserror::Error)]
#[error("email already registered")]
pub struct DuplicateEmail;

/// Insert payload for a user. The password is hashed on construction, so a
/// plaintext password can never reach a repository.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    password_hash: String,
}

impl NewUser {
    pub fn new<H: PasswordHasher + ?Sized>(
        email: &str,
        first_name: &str,
        last_name: &str,
        password: &str,
        hasher: &H,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            password_hash: hasher.hash(password)?,
        })
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    password_hash: Option<String>,
}

impl UserChanges {
    pub fn with_password<H: PasswordHasher + ?Sized>(
        mut self,
        password: &str,
        hasher: &H,
    ) -> anyhow::Result<Self> {
        self.password_hash = Some(hasher.hash(password)?);
        Ok(self)
    }

    pub fn password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.password_hash.is_none()
    }
}

#[async_trait]
pub trait UserRepository: Send {
    async fn create_user(&mut self, user: &NewUser) -> anyhow::Result<User>;
    async fn find_by_email(&mut self, email: &str) -> anyhow::Result<Option<UserCredentials>>;
    async fn find_by_id(&mut self, id: Uuid) -> anyhow::Result<Option<User>>;
    async fn list_users(&mut self) -> anyhow::Result<Vec<User>>;
    async fn update_user(
        &mut self,
        id: Uuid,
        changes: &UserChanges,
    ) -> anyhow::Result<Option<User>>;
    async fn delete_user(&mut self, id: Uuid) -> anyhow::Result<bool>;
}
