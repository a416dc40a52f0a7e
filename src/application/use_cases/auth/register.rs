use crate::application::ports::password_hasher::PasswordHasher;
use crate::application::ports::user_repository::{DuplicateEmail, NewUser, UserRepository};
use crate::domain::too_long;
use crate::domain::users::user::{EMAIL_MAX_LEN, NAME_MAX_LEN, User};

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{0} must be at most {1} characters")]
    TooLong(&'static str, usize),
    #[error("Email already registered")]
    EmailTaken,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub struct Register<'a, R, H>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    pub repo: &'a mut R,
    pub hasher: &'a H,
}

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl<'a, R, H> Register<'a, R, H>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    pub async fn execute(self, req: &RegisterRequest) -> Result<User, RegisterError> {
        let fields = [
            ("email", req.email.as_str()),
            ("password", req.password.as_str()),
            ("first_name", req.first_name.as_str()),
            ("last_name", req.last_name.as_str()),
        ];
        if let Some(&(name, _)) = fields.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(RegisterError::MissingField(name));
        }

        let email = req.email.trim();
        for (name, value, max) in [
            ("email", email, EMAIL_MAX_LEN),
            ("first_name", req.first_name.trim(), NAME_MAX_LEN),
            ("last_name", req.last_name.trim(), NAME_MAX_LEN),
        ] {
            if too_long(value, max) {
                return Err(RegisterError::TooLong(name, max));
            }
        }
        if self.repo.find_by_email(email).await?.is_some() {
            return Err(RegisterError::EmailTaken);
        }
        let new_user = NewUser::new(
            email,
            req.first_name.trim(),
            req.last_name.trim(),
            &req.password,
            self.hasher,
        )?;
        // A concurrent registration can still win the race past the lookup above.
        let user = self.repo.create_user(&new_user).await.map_err(|e| {
            if e.is::<DuplicateEmail>() {
                RegisterError::EmailTaken
            } else {
                RegisterError::Other(e)
            }
        })?;
        Ok(user)
    }
}
