use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::books::book::Book;

#[derive(Debug, Clone)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub description: Option<String>,
}

/// `None` leaves a column as is. For the nullable columns `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct BookChanges {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<Option<String>>,
    pub description: Option<Option<String>>,
}

#[async_trait]
pub trait BookRepository: Send {
    async fn create_book(&mut self, draft: &BookDraft) -> anyhow::Result<Book>;
    async fn find_book(&mut self, id: Uuid) -> anyhow::Result<Option<Book>>;
    /// Lists books ordered by title; `filter` matches title or author, case-insensitively.
    async fn list_books(&mut self, filter: Option<&str>) -> anyhow::Result<Vec<Book>>;
    async fn update_book(&mut self, id: Uuid, changes: &BookChanges)
    -> anyhow::Result<Option<Book>>;
    async fn delete_book(&mut self, id: Uuid) -> anyhow::Result<bool>;
}
