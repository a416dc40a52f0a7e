use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::application::use_cases::users::delete_account::DeleteAccount;
use crate::application::use_cases::users::get_user::GetUser;
use crate::application::use_cases::users::list_users::ListUsers;
use crate::application::use_cases::users::update_profile::{ProfileUpdate, UpdateProfile};
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::auth::{AuthUser, UserResponse};
use crate::presentation::http::error::{ApiError, JsonBody};
use crate::presentation::http::parse_id;
use crate::presentation::http::session::Session;

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/users", get(list_users))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/v1/users", tag = "Users", responses(
    (status = 200, body = [UserResponse]),
    (status = 401, body = ErrorBody)
))]
pub async fn list_users(
    _auth: AuthUser,
    session: Session,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let mut store = session.acquire().await?;
    let users = ListUsers { repo: &mut *store }.execute().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

#[utoipa::path(get, path = "/api/v1/users/{id}", tag = "Users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, body = UserResponse),
        (status = 404, body = ErrorBody)
    ))]
pub async fn get_user(
    _auth: AuthUser,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let id = parse_id(&id)?;
    let mut store = session.acquire().await?;
    let user = GetUser { repo: &mut *store }
        .execute(id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(user.into()))
}

#[utoipa::path(put, path = "/api/v1/users/{id}", tag = "Users", request_body = UpdateUserRequest,
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, body = UserResponse),
        (status = 403, body = ErrorBody),
        (status = 409, body = ErrorBody)
    ))]
pub async fn update_user(
    State(ctx): State<AppContext>,
    AuthUser(actor): AuthUser,
    session: Session,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let target = parse_id(&id)?;
    let hasher = ctx.password_hasher();
    let mut store = session.acquire().await?;
    let update = ProfileUpdate {
        email: req.email,
        password: req.password,
        first_name: req.first_name,
        last_name: req.last_name,
    };
    let user = UpdateProfile {
        repo: &mut *store,
        hasher: hasher.as_ref(),
    }
    .execute(actor, target, &update)
    .await?;
    Ok(Json(user.into()))
}

#[utoipa::path(delete, path = "/api/v1/users/{id}", tag = "Users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 204),
        (status = 403, body = ErrorBody)
    ))]
pub async fn delete_user(
    AuthUser(actor): AuthUser,
    session: Session,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let target = parse_id(&id)?;
    let mut store = session.acquire().await?;
    DeleteAccount { repo: &mut *store }
        .execute(actor, target)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
