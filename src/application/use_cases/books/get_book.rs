use uuid::Uuid;

use crate::application::ports::book_repository::BookRepository;
use crate::domain::books::book::Book;

pub struct GetBook<'a, R: BookRepository + ?Sized> {
    pub repo: &'a mut R,
}

impl<'a, R: BookRepository + ?Sized> GetBook<'a, R> {
    pub async fn execute(self, id: Uuid) -> anyhow::Result<Option<Book>> {
        self.repo.find_book(id).await
    }
}
