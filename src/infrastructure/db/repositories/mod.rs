pub mod book_repository_sqlx;
pub mod library_repository_sqlx;
pub mod user_repository_sqlx;
