//! Error types for the todo session service.

/// Errors that stop the service.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Auth(#[from] todo_auth::error::Error),

    #[error("Invalid {var} '{value}'")]
    InvalidConfig { var: &'static str, value: String },
}
