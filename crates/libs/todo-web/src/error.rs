//! Main Crate Error

use axum::{Json, extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse};
use serde_json::json;
use tracing::{debug, error, warn};

use crate::store::StoreError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Auth(#[from] todo_auth::error::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    /* Api Errors */
    #[error("Invalid Credentials")]
    InvalidCredentials,

    #[error("Authentication Required")]
    AuthenticationRequired,

    #[error("Email Already Registered")]
    EmailAlreadyRegistered,

    #[error("Invalid Input: {0}")]
    InvalidInput(&'static str),

    #[error("Context Missing")]
    CtxMissing,
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        debug!("Rejected request body: {}", rejection.body_text());
        Error::InvalidInput("Invalid request body")
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            Error::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials"),
            Error::AuthenticationRequired | Error::CtxMissing => {
                (StatusCode::UNAUTHORIZED, "Authentication required")
            }
            Error::EmailAlreadyRegistered => (StatusCode::CONFLICT, "Email already registered"),
            Error::InvalidInput(reason) => (StatusCode::BAD_REQUEST, *reason),
            Error::Auth(err) => match err {
                todo_auth::error::Error::MalformedToken
                | todo_auth::error::Error::InvalidSignature
                | todo_auth::error::Error::TokenExpired
                | todo_auth::error::Error::MissingSubject => {
                    (StatusCode::UNAUTHORIZED, "Authentication required")
                }
                todo_auth::error::Error::TokenCreation(_)
                | todo_auth::error::Error::SecretUnavailable(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
                }
            },
            Error::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        if status.is_server_error() {
            error!("Creating API error response for error: {:?}", self);
        } else {
            warn!("Rejecting request: {}", self);
        }

        let body = Json(json!({
            "error": {
                "message": message,
                "status": status.as_u16()
            }
        }));
        (status, body).into_response()
    }
}
