use std::any::Any;

use axum::{
    Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
};
use tower::Layer;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use uuid::Uuid;

use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::error::ApiError;

pub mod auth;
pub mod books;
pub mod error;
pub mod health;
pub mod library;
pub mod session;
pub mod users;

/// All API routes, without the per-request scope.
pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .nest("/api/v1", health::routes(ctx.clone()))
        .nest("/api/v1/auth", auth::routes(ctx.clone()))
        .nest("/api/v1", users::routes(ctx.clone()))
        .nest("/api/v1", books::routes(ctx.clone()))
        .nest("/api/v1", library::routes(ctx))
}

/// Wraps `routes` with the request lifecycle: a storage session around every
/// request, the uniform not-found response, and panic recovery.
pub fn scoped(routes: Router, ctx: AppContext) -> Router {
    routes
        .fallback(not_found)
        .layer(middleware::map_response(method_mismatch_as_not_found))
        .layer(middleware::from_fn_with_state(ctx, session::session_scope))
        .layer(CatchPanicLayer::custom(panic_response))
}

pub fn router(ctx: AppContext) -> Router {
    scoped(routes(ctx.clone()), ctx)
}

/// Trims trailing slashes before routing, so `/books/` reaches `/books`.
/// Must wrap the whole router; as a route layer it would run after matching.
pub fn normalize(app: Router) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(app)
}

/// The complete service: `router` behind path normalization.
pub fn app(ctx: AppContext) -> NormalizePath<Router> {
    normalize(router(ctx))
}

pub async fn not_found() -> Response {
    ApiError::NotFound.into_response()
}

// A known path with the wrong verb is still an unmatched route.
async fn method_mismatch_as_not_found(res: Response) -> Response {
    if res.status() == StatusCode::METHOD_NOT_ALLOWED {
        ApiError::NotFound.into_response()
    } else {
        res
    }
}

fn panic_response(_payload: Box<dyn Any + Send + 'static>) -> Response {
    ApiError::Internal(anyhow::anyhow!("handler panicked")).into_response()
}

/// Ids that are not UUIDs cannot name any row.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound)
}
