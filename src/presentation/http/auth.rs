use axum::{
    Json, Router,
    extract::{FromRequestParts, State},
    http::{StatusCode, request::Parts},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::ports::token_service::{AuthError, TOKEN_TTL_SECS};
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::auth::login::{Login as LoginUc, LoginRequest as LoginDto};
use crate::application::use_cases::auth::me::GetMe;
use crate::application::use_cases::auth::register::{
    Register as RegisterUc, RegisterRequest as RegisterDto,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::users::user::User;
use crate::presentation::http::error::{ApiError, JsonBody};
use crate::presentation::http::session::Session;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        UserResponse {
            id: u.id,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub user: UserResponse,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/v1/auth/register", tag = "Auth", request_body = RegisterRequest, security(()), responses(
    (status = 201, body = UserResponse),
    (status = 400, body = ErrorBody),
    (status = 409, body = ErrorBody)
))]
pub async fn register(
    State(ctx): State<AppContext>,
    session: Session,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let hasher = ctx.password_hasher();
    let mut store = session.acquire().await?;
    let uc = RegisterUc {
        repo: &mut *store,
        hasher: hasher.as_ref(),
    };
    let dto = RegisterDto {
        email: req.email,
        password: req.password,
        first_name: req.first_name,
        last_name: req.last_name,
    };
    let user = uc.execute(&dto).await?;
    tracing::info!(user_id = %user.id, "user_registered");
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(post, path = "/api/v1/auth/login", tag = "Auth", request_body = LoginRequest, security(()), responses(
    (status = 200, body = LoginResponse),
    (status = 401, body = ErrorBody)
))]
pub async fn login(
    State(ctx): State<AppContext>,
    session: Session,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let hasher = ctx.password_hasher();
    let mut store = session.acquire().await?;
    let uc = LoginUc {
        repo: &mut *store,
        hasher: hasher.as_ref(),
    };
    let dto = LoginDto {
        email: req.email,
        password: req.password,
    };
    let user = uc.execute(&dto).await?.ok_or(ApiError::InvalidCredentials)?;
    let access_token = ctx.tokens().issue(user.id)?;
    tracing::debug!(user_id = %user.id, "login_succeeded");
    Ok(Json(LoginResponse {
        access_token,
        token_type: "Bearer",
        expires_in: TOKEN_TTL_SECS,
        user: user.into(),
    }))
}

#[utoipa::path(get, path = "/api/v1/auth/me", tag = "Auth", responses(
    (status = 200, body = UserResponse),
    (status = 401, body = ErrorBody)
))]
pub async fn me(
    AuthUser(user_id): AuthUser,
    session: Session,
) -> Result<Json<UserResponse>, ApiError> {
    let mut store = session.acquire().await?;
    let uc = GetMe { repo: &mut *store };
    let user = uc
        .execute(user_id)
        .await?
        .ok_or(ApiError::Unauthorized(AuthError::UnknownUser))?;
    Ok(Json(user.into()))
}

// --- Bearer extractor ---

/// Raw token from `Authorization: Bearer <token>`.
pub struct Bearer(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Bearer
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthorized(AuthError::Missing))?;
        match header.trim().split_once(' ') {
            Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => {
                let token = token.trim();
                if token.is_empty() {
                    Err(ApiError::Unauthorized(AuthError::Malformed))
                } else {
                    Ok(Bearer(token.to_string()))
                }
            }
            _ => Err(ApiError::Unauthorized(AuthError::Malformed)),
        }
    }
}

/// Identity proven by a valid bearer token whose account still exists.
pub struct AuthUser(pub Uuid);

#[axum::async_trait]
impl FromRequestParts<AppContext> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let Bearer(token) = Bearer::from_request_parts(parts, ctx).await?;
        let user_id = ctx.tokens().verify(&token).inspect_err(|e| {
            tracing::debug!(reason = %e, "bearer_rejected");
        })?;
        let session = Session::from_request_parts(parts, ctx).await?;
        if session.acquire().await?.find_by_id(user_id).await?.is_none() {
            tracing::debug!(user_id = %user_id, "bearer_for_deleted_user");
            return Err(ApiError::Unauthorized(AuthError::UnknownUser));
        }
        Ok(AuthUser(user_id))
    }
}
