use uuid::Uuid;

use crate::application::ports::book_repository::BookRepository;
use crate::application::ports::library_repository::LibraryRepository;
use crate::application::use_cases::library::LibraryError;
use crate::domain::books::book::Book;

pub struct AddToLibrary<'a, R: BookRepository + LibraryRepository + ?Sized> {
    pub repo: &'a mut R,
}

impl<'a, R: BookRepository + LibraryRepository + ?Sized> AddToLibrary<'a, R> {
    /// Adding a book that is already present is a no-op.
    pub async fn execute(self, user_id: Uuid, book_id: Uuid) -> Result<Book, LibraryError> {
        let book = self
            .repo
            .find_book(book_id)
            .await?
            .ok_or(LibraryError::BookNotFound)?;
        if self.repo.add_to_library(user_id, book_id).await? {
            tracing::debug!(user_id = %user_id, book_id = %book_id, "library_book_added");
        }
        Ok(book)
    }
}
