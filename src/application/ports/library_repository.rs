use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::books::book::LibraryEntry;

#[async_trait]
pub trait LibraryRepository: Send {
    async fn list_library(&mut self, user_id: Uuid) -> anyhow::Result<Vec<LibraryEntry>>;
    /// Returns false when the book was already in the user's library.
    async fn add_to_library(&mut self, user_id: Uuid, book_id: Uuid) -> anyhow::Result<bool>;
    async fn remove_from_library(&mut self, user_id: Uuid, book_id: Uuid)
    -> anyhow::Result<bool>;
}
