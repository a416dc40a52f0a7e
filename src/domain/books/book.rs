use uuid::Uuid;

pub const TITLE_MAX_LEN: usize = 256;
pub const AUTHOR_MAX_LEN: usize = 256;
pub const ISBN_MAX_LEN: usize = 32;

#[derive(Debug, Clone)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone)]
pub struct LibraryEntry {
    pub book: Book,
    pub added_at: chrono::DateTime<chrono::Utc>,
}
