use async_trait::async_trait;

use crate::application::ports::book_repository::BookRepository;
use crate::application::ports::library_repository::LibraryRepository;
use crate::application::ports::user_repository::UserRepository;

/// Opens one storage session per inbound request.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    async fn open(&self) -> anyhow::Result<Box<dyn StorageSession>>;
}

/// A request-scoped handle to the data store. Every repository call made while
/// serving a request goes through the same session.
///
/// Dropping a session releases it; `release` is the explicit form used on the
/// normal request path.
#[async_trait]
pub trait StorageSession: UserRepository + BookRepository + LibraryRepository + Send {
    async fn ping(&mut self) -> anyhow::Result<()>;

    fn release(self: Box<Self>);
}
