use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::book_repository::{BookChanges, BookDraft, BookRepository};
use crate::domain::books::book::Book;
use crate::infrastructure::db::session::PgSession;

pub(crate) fn book_from_row(r: &PgRow) -> Book {
    Book {
        id: r.get("id"),
        title: r.get("title"),
        author: r.get("author"),
        isbn: r.get("isbn"),
        description: r.get("description"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

/// Substring pattern for `ILIKE ... ESCAPE '\'` with the wildcards in `needle` matched literally.
fn like_pattern(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len() + 2);
    out.push('%');
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

#[async_trait]
impl BookRepository for PgSession {
    async fn create_book(&mut self, draft: &BookDraft) -> anyhow::Result<Book> {
        let row = sqlx::query(
            r#"INSERT INTO books (title, author, isbn, description)
               VALUES ($1, $2, $3, $4)
               RETURNING id, title, author, isbn, description, created_at, updated_at"#,
        )
        .bind(&draft.title)
        .bind(&draft.author)
        .bind(draft.isbn.as_deref())
        .bind(draft.description.as_deref())
        .fetch_one(&mut *self.conn)
        .await?;
        Ok(book_from_row(&row))
    }

    async fn find_book(&mut self, id: Uuid) -> anyhow::Result<Option<Book>> {
        let row = sqlx::query(
            r#"SELECT id, title, author, isbn, description, created_at, updated_at
               FROM books WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(row.as_ref().map(book_from_row))
    }

    async fn list_books(&mut self, filter: Option<&str>) -> anyhow::Result<Vec<Book>> {
        let rows = if let Some(f) = filter {
            let like = like_pattern(f);
            sqlx::query(
                r#"SELECT id, title, author, isbn, description, created_at, updated_at
                   FROM books
                   WHERE title ILIKE $1 ESCAPE '\' OR author ILIKE $1 ESCAPE '\'
                   ORDER BY title ASC"#,
            )
            .bind(like)
            .fetch_all(&mut *self.conn)
            .await?
        } else {
            sqlx::query(
                r#"SELECT id, title, author, isbn, description, created_at, updated_at
                   FROM books ORDER BY title ASC"#,
            )
            .fetch_all(&mut *self.conn)
            .await?
        };
        Ok(rows.iter().map(book_from_row).collect())
    }

    async fn update_book(
        &mut self,
        id: Uuid,
        changes: &BookChanges,
    ) -> anyhow::Result<Option<Book>> {
        let row = sqlx::query(
            r#"UPDATE books SET
                   title = COALESCE($2, title),
                   author = COALESCE($3, author),
                   isbn = CASE WHEN $6 THEN $4 ELSE isbn END,
                   description = CASE WHEN $7 THEN $5 ELSE description END,
                   updated_at = now()
               WHERE id = $1
               RETURNING id, title, author, isbn, description, created_at, updated_at"#,
        )
        .bind(id)
        .bind(changes.title.as_deref())
        .bind(changes.author.as_deref())
        .bind(changes.isbn.clone().flatten())
        .bind(changes.description.clone().flatten())
        .bind(changes.isbn.is_some())
        .bind(changes.description.is_some())
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(row.as_ref().map(book_from_row))
    }

    async fn delete_book(&mut self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
