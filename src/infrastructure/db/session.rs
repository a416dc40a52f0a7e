use async_trait::async_trait;
use sqlx::Postgres;
use sqlx::pool::PoolConnection;

use crate::application::ports::storage_session::{SessionFactory, StorageSession};
use crate::infrastructure::db::PgPool;

/// Hands out one pooled connection per request.
pub struct PgSessionFactory {
    pub pool: PgPool,
}

impl PgSessionFactory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionFactory for PgSessionFactory {
    async fn open(&self) -> anyhow::Result<Box<dyn StorageSession>> {
        let conn = self.pool.acquire().await?;
        Ok(Box::new(PgSession { conn }))
    }
}

/// A checked-out connection. Dropping it returns the connection to the pool.
pub struct PgSession {
    pub(crate) conn: PoolConnection<Postgres>,
}

#[async_trait]
impl StorageSession for PgSession {
    async fn ping(&mut self) -> anyhow::Result<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(())
    }

    fn release(self: Box<Self>) {
        drop(self);
    }
}
