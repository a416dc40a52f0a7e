pub mod add_to_library;
pub mod list_library;
pub mod remove_from_library;

#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("Book not found")]
    BookNotFound,
    #[error("Book is not in your library")]
    NotInLibrary,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
