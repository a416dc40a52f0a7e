use uuid::Uuid;

use crate::application::ports::book_repository::{BookChanges, BookRepository};
use crate::application::use_cases::books::{BookError, check_len, clean_optional};
use crate::domain::books::book::{AUTHOR_MAX_LEN, Book, ISBN_MAX_LEN, TITLE_MAX_LEN};

pub struct UpdateBook<'a, R: BookRepository + ?Sized> {
    pub repo: &'a mut R,
}

/// Partial update. Absent fields are kept; a blank `isbn` or `description`
/// clears it.
#[derive(Debug, Clone, Default)]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub description: Option<String>,
}

impl<'a, R: BookRepository + ?Sized> UpdateBook<'a, R> {
    pub async fn execute(self, id: Uuid, req: &UpdateBookRequest) -> Result<Book, BookError> {
        if matches!(req.title.as_deref().map(str::trim), Some("")) {
            return Err(BookError::EmptyField("title"));
        }
        if matches!(req.author.as_deref().map(str::trim), Some("")) {
            return Err(BookError::EmptyField("author"));
        }
        let changes = BookChanges {
            title: clean_optional(req.title.as_deref()),
            author: clean_optional(req.author.as_deref()),
            isbn: req.isbn.as_deref().map(|v| clean_optional(Some(v))),
            description: req.description.as_deref().map(|v| clean_optional(Some(v))),
        };
        check_len("title", changes.title.as_deref(), TITLE_MAX_LEN)?;
        check_len("author", changes.author.as_deref(), AUTHOR_MAX_LEN)?;
        check_len("isbn", changes.isbn.as_ref().and_then(|v| v.as_deref()), ISBN_MAX_LEN)?;
        self.repo
            .update_book(id, &changes)
            .await?
            .ok_or(BookError::NotFound)
    }
}
