use crate::application::ports::book_repository::BookRepository;
use crate::domain::books::book::Book;

pub struct ListBooks<'a, R: BookRepository + ?Sized> {
    pub repo: &'a mut R,
}

impl<'a, R: BookRepository + ?Sized> ListBooks<'a, R> {
    pub async fn execute(self, filter: Option<String>) -> anyhow::Result<Vec<Book>> {
        let filter = super::clean_optional(filter.as_deref());
        self.repo.list_books(filter.as_deref()).await
    }
}
