pub mod create_book;
pub mod delete_book;
pub mod get_book;
pub mod list_books;
pub mod update_book;

use crate::domain::too_long;

#[derive(Debug, thiserror::Error)]
pub enum BookError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
    #[error("{0} must be at most {1} characters")]
    TooLong(&'static str, usize),
    #[error("Book not found")]
    NotFound,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub(crate) fn check_len(name: &'static str, value: Option<&str>, max: usize) -> Result<(), BookError> {
    match value {
        Some(v) if too_long(v, max) => Err(BookError::TooLong(name, max)),
        _ => Ok(()),
    }
}

/// Trims optional text, treating blank as absent.
pub(crate) fn clean_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
