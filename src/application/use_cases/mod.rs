pub mod auth;
pub mod books;
pub mod library;
pub mod users;
