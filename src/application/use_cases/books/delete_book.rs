use uuid::Uuid;

use crate::application::ports::book_repository::BookRepository;
use crate::application::use_cases::books::BookError;

pub struct DeleteBook<'a, R: BookRepository + ?Sized> {
    pub repo: &'a mut R,
}

impl<'a, R: BookRepository + ?Sized> DeleteBook<'a, R> {
    pub async fn execute(self, id: Uuid) -> Result<(), BookError> {
        if !self.repo.delete_book(id).await? {
            return Err(BookError::NotFound);
        }
        tracing::info!(book_id = %id, "book_deleted");
        Ok(())
    }
}
