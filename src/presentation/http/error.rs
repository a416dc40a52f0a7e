use axum::{
    Json,
    extract::{FromRequest, rejection::JsonRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::ports::token_service::AuthError;
use crate::application::use_cases::auth::register::RegisterError;
use crate::application::use_cases::books::BookError;
use crate::application::use_cases::library::LibraryError;
use crate::application::use_cases::users::AccountError;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Unauthorized(#[from] AuthError),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("{0}")]
    Forbidden(String),
    #[error("Not found")]
    NotFound,
    #[error("{0}")]
    Conflict(String),
    #[error("Storage unavailable")]
    SessionUnavailable,
    #[error("Internal server error")]
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::SessionUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(err) = &self {
            tracing::error!(error = ?err, "request_failed");
        }
        let status = self.status();
        let mut res = (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response();
        if status == StatusCode::UNAUTHORIZED {
            res.headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        res
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<RegisterError> for ApiError {
    fn from(err: RegisterError) -> Self {
        match err {
            RegisterError::MissingField(_) | RegisterError::TooLong(..) => {
                ApiError::BadRequest(err.to_string())
            }
            RegisterError::EmailTaken => ApiError::Conflict(err.to_string()),
            RegisterError::Other(e) => ApiError::Internal(e),
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Forbidden => ApiError::Forbidden(err.to_string()),
            AccountError::NotFound => ApiError::NotFound,
            AccountError::EmailTaken => ApiError::Conflict(err.to_string()),
            AccountError::EmptyField(_) | AccountError::TooLong(..) => {
                ApiError::BadRequest(err.to_string())
            }
            AccountError::Other(e) => ApiError::Internal(e),
        }
    }
}

impl From<BookError> for ApiError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::EmptyField(_) | BookError::TooLong(..) => {
                ApiError::BadRequest(err.to_string())
            }
            BookError::NotFound => ApiError::NotFound,
            BookError::Other(e) => ApiError::Internal(e),
        }
    }
}

impl From<LibraryError> for ApiError {
    fn from(err: LibraryError) -> Self {
        match err {
            LibraryError::BookNotFound | LibraryError::NotInLibrary => ApiError::NotFound,
            LibraryError::Other(e) => ApiError::Internal(e),
        }
    }
}

/// `Json` whose rejections use the API's error body.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
