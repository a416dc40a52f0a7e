use uuid::Uuid;

use crate::application::ports::library_repository::LibraryRepository;
use crate::application::use_cases::library::LibraryError;

pub struct RemoveFromLibrary<'a, R: LibraryRepository + ?Sized> {
    pub repo: &'a mut R,
}

impl<'a, R: LibraryRepository + ?Sized> RemoveFromLibrary<'a, R> {
    pub async fn execute(self, user_id: Uuid, book_id: Uuid) -> Result<(), LibraryError> {
        if self.repo.remove_from_library(user_id, book_id).await? {
            Ok(())
        } else {
            Err(LibraryError::NotInLibrary)
        }
    }
}
