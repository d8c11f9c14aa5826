#[derive(Debug, thiserror::Error, Clone)]
pub enum Error {
    #[error("Malformed Token")]
    MalformedToken,
    #[error("Invalid Token Signature")]
    InvalidSignature,
    #[error("Token Expired")]
    TokenExpired,
    #[error("Token Subject Missing")]
    MissingSubject,
    #[error(transparent)]
    TokenCreation(#[from] jsonwebtoken::errors::Error),

    #[error("Signing secret '{0}' is not set")]
    SecretUnavailable(&'static str),
}
