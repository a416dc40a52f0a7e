use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::user_repository::{
    DuplicateEmail, NewUser, UserChanges, UserRepository,
};
use crate::domain::users::user::{User, UserCredentials};
use crate::infrastructure::db::session::PgSession;

fn user_from_row(r: &PgRow) -> User {
    User {
        id: r.get("id"),
        email: r.get("email"),
        first_name: r.get("first_name"),
        last_name: r.get("last_name"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

// `users.email` is the only unique column besides the key.
fn write_error(err: sqlx::Error) -> anyhow::Error {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => DuplicateEmail.into(),
        _ => err.into(),
    }
}

#[async_trait]
impl UserRepository for PgSession {
    async fn create_user(&mut self, user: &NewUser) -> anyhow::Result<User> {
        let row = sqlx::query(
            r#"INSERT INTO users (email, password_hash, first_name, last_name)
               VALUES ($1, $2, $3, $4)
               RETURNING id, email, first_name, last_name, created_at, updated_at"#,
        )
        .bind(&user.email)
        .bind(user.password_hash())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .fetch_one(&mut *self.conn)
        .await
        .map_err(write_error)?;
        Ok(user_from_row(&row))
    }

    async fn find_by_email(&mut self, email: &str) -> anyhow::Result<Option<UserCredentials>> {
        let row = sqlx::query(
            r#"SELECT id, email, first_name, last_name, created_at, updated_at, password_hash
               FROM users WHERE email = $1"#,
        )
        .bind(email)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(row.map(|r| UserCredentials {
            user: user_from_row(&r),
            password_hash: r.get("password_hash"),
        }))
    }

    async fn find_by_id(&mut self, id: Uuid) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(
            r#"SELECT id, email, first_name, last_name, created_at, updated_at
               FROM users WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(row.as_ref().map(user_from_row))
    }

    async fn list_users(&mut self) -> anyhow::Result<Vec<User>> {
        let rows = sqlx::query(
            r#"SELECT id, email, first_name, last_name, created_at, updated_at
               FROM users ORDER BY created_at ASC"#,
        )
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows.iter().map(user_from_row).collect())
    }

    async fn update_user(
        &mut self,
        id: Uuid,
        changes: &UserChanges,
    ) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(
            r#"UPDATE users SET
                   email = COALESCE($2, email),
                   first_name = COALESCE($3, first_name),
                   last_name = COALESCE($4, last_name),
                   password_hash = COALESCE($5, password_hash),
                   updated_at = now()
               WHERE id = $1
               RETURNING id, email, first_name, last_name, created_at, updated_at"#,
        )
        .bind(id)
        .bind(changes.email.as_deref())
        .bind(changes.first_name.as_deref())
        .bind(changes.last_name.as_deref())
        .bind(changes.password_hash())
        .fetch_optional(&mut *self.conn)
        .await
        .map_err(write_error)?;
        Ok(row.as_ref().map(user_from_row))
    }

    async fn delete_user(&mut self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
