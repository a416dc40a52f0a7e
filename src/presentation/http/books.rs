use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::books::create_book::{CreateBook, CreateBookRequest as CreateDto};
use crate::application::use_cases::books::delete_book::DeleteBook;
use crate::application::use_cases::books::get_book::GetBook;
use crate::application::use_cases::books::list_books::ListBooks;
use crate::application::use_cases::books::update_book::{UpdateBook, UpdateBookRequest as UpdateDto};
use crate::bootstrap::app_context::AppContext;
use crate::domain::books::book as domain;
use crate::presentation::http::auth::AuthUser;
use crate::presentation::http::error::{ApiError, JsonBody};
use crate::presentation::http::parse_id;
use crate::presentation::http::session::Session;

#[derive(Debug, Serialize, ToSchema)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<domain::Book> for Book {
    fn from(b: domain::Book) -> Self {
        Book {
            id: b.id,
            title: b.title,
            author: b.author,
            isbn: b.isbn,
            description: b.description,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookRequest {
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub description: Option<String>,
}

/// Absent fields are left unchanged. An empty `isbn` or `description` clears it.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListBooksQuery {
    pub q: Option<String>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route(
            "/books/:id",
            get(get_book).put(update_book).delete(delete_book),
        )
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/v1/books", tag = "Books", security(()),
    params(("q" = Option<String>, Query, description = "Filter on title or author")),
    responses((status = 200, body = [Book])))]
pub async fn list_books(
    session: Session,
    q: Option<Query<ListBooksQuery>>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let filter = q.and_then(|Query(v)| v.q);
    let mut store = session.acquire().await?;
    let books = ListBooks { repo: &mut *store }.execute(filter).await?;
    Ok(Json(books.into_iter().map(Into::into).collect()))
}

#[utoipa::path(get, path = "/api/v1/books/{id}", tag = "Books", security(()),
    params(("id" = String, Path, description = "Book id")),
    responses(
        (status = 200, body = Book),
        (status = 404, body = ErrorBody)
    ))]
pub async fn get_book(session: Session, Path(id): Path<String>) -> Result<Json<Book>, ApiError> {
    let id = parse_id(&id)?;
    let mut store = session.acquire().await?;
    let book = GetBook { repo: &mut *store }
        .execute(id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(book.into()))
}

#[utoipa::path(post, path = "/api/v1/books", tag = "Books", request_body = CreateBookRequest, responses(
    (status = 201, body = Book),
    (status = 400, body = ErrorBody),
    (status = 401, body = ErrorBody)
))]
pub async fn create_book(
    _auth: AuthUser,
    session: Session,
    JsonBody(req): JsonBody<CreateBookRequest>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let mut store = session.acquire().await?;
    let dto = CreateDto {
        title: req.title,
        author: req.author,
        isbn: req.isbn,
        description: req.description,
    };
    let book = CreateBook { repo: &mut *store }.execute(&dto).await?;
    Ok((StatusCode::CREATED, Json(book.into())))
}

#[utoipa::path(put, path = "/api/v1/books/{id}", tag = "Books", request_body = UpdateBookRequest,
    params(("id" = String, Path, description = "Book id")),
    responses(
        (status = 200, body = Book),
        (status = 404, body = ErrorBody)
    ))]
pub async fn update_book(
    _auth: AuthUser,
    session: Session,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateBookRequest>,
) -> Result<Json<Book>, ApiError> {
    let id = parse_id(&id)?;
    let mut store = session.acquire().await?;
    let dto = UpdateDto {
        title: req.title,
        author: req.author,
        isbn: req.isbn,
        description: req.description,
    };
    let book = UpdateBook { repo: &mut *store }.execute(id, &dto).await?;
    Ok(Json(book.into()))
}

#[utoipa::path(delete, path = "/api/v1/books/{id}", tag = "Books",
    params(("id" = String, Path, description = "Book id")),
    responses(
        (status = 204),
        (status = 404, body = ErrorBody)
    ))]
pub async fn delete_book(
    _auth: AuthUser,
    session: Session,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    let mut store = session.acquire().await?;
    DeleteBook { repo: &mut *store }.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
