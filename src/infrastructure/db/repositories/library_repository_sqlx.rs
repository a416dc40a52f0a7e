use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::application::ports::library_repository::LibraryRepository;
use crate::domain::books::book::LibraryEntry;
use crate::infrastructure::db::repositories::book_repository_sqlx::book_from_row;
use crate::infrastructure::db::session::PgSession;

#[async_trait]
impl LibraryRepository for PgSession {
    async fn list_library(&mut self, user_id: Uuid) -> anyhow::Result<Vec<LibraryEntry>> {
        let rows = sqlx::query(
            r#"SELECT b.id, b.title, b.author, b.isbn, b.description, b.created_at, b.updated_at,
                      ub.added_at
               FROM user_books ub
               JOIN books b ON b.id = ub.book_id
               WHERE ub.user_id = $1
               ORDER BY ub.added_at DESC"#,
        )
        .bind(user_id)
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows
            .iter()
            .map(|r| LibraryEntry {
                book: book_from_row(r),
                added_at: r.get("added_at"),
            })
            .collect())
    }

    async fn add_to_library(&mut self, user_id: Uuid, book_id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"INSERT INTO user_books (user_id, book_id) VALUES ($1, $2)
               ON CONFLICT (user_id, book_id) DO NOTHING"#,
        )
        .bind(user_id)
        .bind(book_id)
        .execute(&mut *self.conn)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn remove_from_library(
        &mut self,
        user_id: Uuid,
        book_id: Uuid,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM user_books WHERE user_id = $1 AND book_id = $2")
            .bind(user_id)
            .bind(book_id)
            .execute(&mut *self.conn)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
