use crate::application::ports::password_hasher::PasswordHasher;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::User;

pub struct Login<'a, R, H>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    pub repo: &'a mut R,
    pub hasher: &'a H,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl<'a, R, H> Login<'a, R, H>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    /// Returns `None` for an unknown email and for a wrong password alike.
    pub async fn execute(self, req: &LoginRequest) -> anyhow::Result<Option<User>> {
        let Some(creds) = self.repo.find_by_email(req.email.trim()).await? else {
            return Ok(None);
        };
        if self.hasher.verify(&req.password, &creds.password_hash) {
            Ok(Some(creds.user))
        } else {
            Ok(None)
        }
    }
}
