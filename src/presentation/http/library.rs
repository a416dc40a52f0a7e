use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{delete, get},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::library::add_to_library::AddToLibrary;
use crate::application::use_cases::library::list_library::ListLibrary;
use crate::application::use_cases::library::remove_from_library::RemoveFromLibrary;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::auth::AuthUser;
use crate::presentation::http::books::Book;
use crate::presentation::http::error::{ApiError, JsonBody};
use crate::presentation::http::parse_id;
use crate::presentation::http::session::Session;

#[derive(Debug, Serialize, ToSchema)]
pub struct LibraryItem {
    pub book: Book,
    pub added_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddBookRequest {
    pub book_id: Uuid,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/me/books", get(list_my_books).post(add_my_book))
        .route("/me/books/:book_id", delete(remove_my_book))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/v1/me/books", tag = "Library", responses(
    (status = 200, body = [LibraryItem]),
    (status = 401, body = ErrorBody)
))]
pub async fn list_my_books(
    AuthUser(user_id): AuthUser,
    session: Session,
) -> Result<Json<Vec<LibraryItem>>, ApiError> {
    let mut store = session.acquire().await?;
    let entries = ListLibrary { repo: &mut *store }.execute(user_id).await?;
    let items = entries
        .into_iter()
        .map(|e| LibraryItem {
            book: e.book.into(),
            added_at: e.added_at,
        })
        .collect();
    Ok(Json(items))
}

#[utoipa::path(post, path = "/api/v1/me/books", tag = "Library", request_body = AddBookRequest, responses(
    (status = 201, body = Book),
    (status = 404, body = ErrorBody)
))]
pub async fn add_my_book(
    AuthUser(user_id): AuthUser,
    session: Session,
    JsonBody(req): JsonBody<AddBookRequest>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let mut store = session.acquire().await?;
    let book = AddToLibrary { repo: &mut *store }
        .execute(user_id, req.book_id)
        .await?;
    Ok((StatusCode::CREATED, Json(book.into())))
}

#[utoipa::path(delete, path = "/api/v1/me/books/{book_id}", tag = "Library",
    params(("book_id" = String, Path, description = "Book id")),
    responses(
        (status = 204),
        (status = 404, body = ErrorBody)
    ))]
pub async fn remove_my_book(
    AuthUser(user_id): AuthUser,
    session: Session,
    Path(book_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let book_id = parse_id(&book_id)?;
    let mut store = session.acquire().await?;
    RemoveFromLibrary { repo: &mut *store }
        .execute(user_id, book_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
