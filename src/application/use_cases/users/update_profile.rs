use uuid::Uuid;

use crate::application::ports::password_hasher::PasswordHasher;
use crate::application::ports::user_repository::{DuplicateEmail, UserChanges, UserRepository};
use crate::application::use_cases::users::AccountError;
use crate::domain::too_long;
use crate::domain::users::user::{EMAIL_MAX_LEN, NAME_MAX_LEN, User};

pub struct UpdateProfile<'a, R, H>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    pub repo: &'a mut R,
    pub hasher: &'a H,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

fn non_empty(
    name: &'static str,
    value: &Option<String>,
    max: usize,
) -> Result<Option<String>, AccountError> {
    match value.as_deref().map(str::trim) {
        Some("") => Err(AccountError::EmptyField(name)),
        Some(v) if too_long(v, max) => Err(AccountError::TooLong(name, max)),
        Some(v) => Ok(Some(v.to_string())),
        None => Ok(None),
    }
}

impl<'a, R, H> UpdateProfile<'a, R, H>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    pub async fn execute(
        self,
        actor: Uuid,
        target: Uuid,
        update: &ProfileUpdate,
    ) -> Result<User, AccountError> {
        if actor != target {
            return Err(AccountError::Forbidden);
        }
        let mut changes = UserChanges::default();
        changes.email = non_empty("email", &update.email, EMAIL_MAX_LEN)?;
        changes.first_name = non_empty("first_name", &update.first_name, NAME_MAX_LEN)?;
        changes.last_name = non_empty("last_name", &update.last_name, NAME_MAX_LEN)?;
        if let Some(password) = &update.password {
            if password.trim().is_empty() {
                return Err(AccountError::EmptyField("password"));
            }
            changes = changes.with_password(password, self.hasher)?;
        }

        if let Some(email) = &changes.email {
            if let Some(existing) = self.repo.find_by_email(email).await? {
                if existing.user.id != target {
                    return Err(AccountError::EmailTaken);
                }
            }
        }

        if changes.is_empty() {
            return self
                .repo
                .find_by_id(target)
                .await?
                .ok_or(AccountError::NotFound);
        }
        self.repo
            .update_user(target, &changes)
            .await
            .map_err(|e| {
                if e.is::<DuplicateEmail>() {
                    AccountError::EmailTaken
                } else {
                    AccountError::Other(e)
                }
            })?
            .ok_or(AccountError::NotFound)
    }
}
