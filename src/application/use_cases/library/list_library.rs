use uuid::Uuid;

use crate::application::ports::library_repository::LibraryRepository;
use crate::domain::books::book::LibraryEntry;

pub struct ListLibrary<'a, R: LibraryRepository + ?Sized> {
    pub repo: &'a mut R,
}

impl<'a, R: LibraryRepository + ?Sized> ListLibrary<'a, R> {
    pub async fn execute(self, user_id: Uuid) -> anyhow::Result<Vec<LibraryEntry>> {
        self.repo.list_library(user_id).await
    }
}
