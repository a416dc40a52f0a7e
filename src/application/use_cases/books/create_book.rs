use crate::application::ports::book_repository::{BookDraft, BookRepository};
use crate::application::use_cases::books::{BookError, check_len, clean_optional};
use crate::domain::books::book::{AUTHOR_MAX_LEN, Book, ISBN_MAX_LEN, TITLE_MAX_LEN};

pub struct CreateBook<'a, R: BookRepository + ?Sized> {
    pub repo: &'a mut R,
}

#[derive(Debug, Clone)]
pub struct CreateBookRequest {
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub description: Option<String>,
}

impl<'a, R: BookRepository + ?Sized> CreateBook<'a, R> {
    pub async fn execute(self, req: &CreateBookRequest) -> Result<Book, BookError> {
        let title = req.title.trim();
        if title.is_empty() {
            return Err(BookError::EmptyField("title"));
        }
        let author = req.author.trim();
        if author.is_empty() {
            return Err(BookError::EmptyField("author"));
        }
        let draft = BookDraft {
            title: title.to_string(),
            author: author.to_string(),
            isbn: clean_optional(req.isbn.as_deref()),
            description: clean_optional(req.description.as_deref()),
        };
        check_len("title", Some(&draft.title), TITLE_MAX_LEN)?;
        check_len("author", Some(&draft.author), AUTHOR_MAX_LEN)?;
        check_len("isbn", draft.isbn.as_deref(), ISBN_MAX_LEN)?;
        let book = self.repo.create_book(&draft).await?;
        tracing::info!(book_id = %book.id, "book_created");
        Ok(book)
    }
}
