pub mod book_repository;
pub mod library_repository;
pub mod password_hasher;
pub mod storage_session;
pub mod token_service;
pub mod user_repository;
