use uuid::Uuid;

use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::users::AccountError;

pub struct DeleteAccount<'a, R: UserRepository + ?Sized> {
    pub repo: &'a mut R,
}

impl<'a, R: UserRepository + ?Sized> DeleteAccount<'a, R> {
    /// Library entries go with the user through the store's cascade.
    pub async fn execute(self, actor: Uuid, target: Uuid) -> Result<(), AccountError> {
        if actor != target {
            return Err(AccountError::Forbidden);
        }
        if !self.repo.delete_user(target).await? {
            return Err(AccountError::NotFound);
        }
        tracing::info!(user_id = %target, "account_deleted");
        Ok(())
    }
}
