use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::sync::{Mutex, OwnedMappedMutexGuard, OwnedMutexGuard};

use crate::application::ports::storage_session::StorageSession;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::error::ApiError;

/// Exclusive access to the request's session, held by one handler at a time.
pub type SessionGuard = OwnedMappedMutexGuard<Option<Box<dyn StorageSession>>, dyn StorageSession>;

/// The storage session of the current request.
///
/// Clones share one session. The session is released either explicitly when
/// the request finishes, or when the last clone is dropped (handler panic,
/// client disconnect). Both paths run at most once because the session box is
/// moved out or dropped exactly one time.
#[derive(Clone)]
pub struct Session {
    slot: Arc<Mutex<Option<Box<dyn StorageSession>>>>,
}

impl Session {
    fn new(session: Box<dyn StorageSession>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(session))),
        }
    }

    /// Locks the session for the caller. Fails once the request scope closed it.
    pub async fn acquire(&self) -> Result<SessionGuard, ApiError> {
        let guard = self.slot.clone().lock_owned().await;
        OwnedMutexGuard::try_map(guard, |slot| slot.as_deref_mut())
            .map_err(|_| ApiError::Internal(anyhow::anyhow!("storage session already released")))
    }

    async fn release(&self) {
        if let Some(session) = self.slot.lock().await.take() {
            session.release();
        }
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("request has no storage session")))
    }
}

struct Scope {
    session: Session,
    closed: bool,
}

impl Scope {
    async fn close(mut self) {
        self.session.release().await;
        self.closed = true;
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        if !self.closed {
            tracing::warn!("request_aborted_session_dropped");
        }
    }
}

/// Opens a storage session before the handler runs and releases it afterwards.
/// Applied to every route including the not-found fallback.
pub async fn session_scope(
    State(ctx): State<AppContext>,
    mut req: Request,
    next: Next,
) -> Response {
    let opened = match ctx.sessions().open().await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = ?e, "session_open_failed");
            return ApiError::SessionUnavailable.into_response();
        }
    };
    let scope = Scope {
        session: Session::new(opened),
        closed: false,
    };
    req.extensions_mut().insert(scope.session.clone());

    let res = next.run(req).await;
    scope.close().await;
    res
}
