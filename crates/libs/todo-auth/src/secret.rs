//! Signing secret provisioning.
//!
//! The secret is read once at startup and handed to the
//! [`TokenCodec`](crate::jwt::TokenCodec) by value; nothing else in the
//! process looks it up again.
//!
//! A missing secret is fatal in strict mode (`APP_ENV=production`). In any
//! other mode a fixed development secret is used instead and a warning is
//! logged.

use std::fmt::{Debug, Display};

use log::warn;

use crate::prelude::*;

/// Environment variable holding the signing secret.
pub const SECRET_ENV_VAR: &str = "JWT_SECRET";

/// Environment variable selecting the deployment mode.
pub const MODE_ENV_VAR: &str = "APP_ENV";

const DEVELOPMENT_SECRET: &[u8] = b"todo-development-secret-do-not-deploy";

/// Deployment mode deciding what happens when no secret is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Production: a missing secret aborts startup.
    Strict,
    /// Anything else: fall back to the development secret.
    Lenient,
}

impl RunMode {
    /// Reads the mode from `APP_ENV`.
    ///
    /// `production` and `prod` (any case) are strict, everything else,
    /// including an unset variable, is lenient.
    pub fn from_env() -> Self {
        Self::from_app_env(std::env::var(MODE_ENV_VAR).ok().as_deref())
    }

    fn from_app_env(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("production") || v.eq_ignore_ascii_case("prod") => {
                Self::Strict
            }
            _ => Self::Lenient,
        }
    }
}

/// The active HMAC signing secret.
#[derive(Clone)]
pub struct SigningSecret {
    bytes: Vec<u8>,
    fallback: bool,
}

impl SigningSecret {
    /// Wraps an explicit secret.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use todo_auth::secret::SigningSecret;
    ///
    /// let secret = SigningSecret::new("MySuperSecret");
    /// assert_eq!(secret.as_bytes(), b"MySuperSecret");
    /// assert!(!secret.is_fallback());
    /// ```
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: secret.into(),
            fallback: false,
        }
    }

    /// Loads the secret from `JWT_SECRET`, honouring the mode in `APP_ENV`.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use todo_auth::secret::SigningSecret;
    ///
    /// let secret = SigningSecret::from_env().expect("JWT_SECRET must be set in production");
    /// ```
    pub fn from_env() -> Result<Self> {
        Self::resolve(std::env::var(SECRET_ENV_VAR).ok(), RunMode::from_env())
    }

    /// Picks the active secret from an optional configured value.
    ///
    /// An empty value counts as absent.
    pub fn resolve(configured: Option<String>, mode: RunMode) -> Result<Self> {
        match configured.filter(|s| !s.is_empty()) {
            Some(secret) => Ok(Self::new(secret)),
            None if mode == RunMode::Strict => Err(Error::SecretUnavailable(SECRET_ENV_VAR)),
            None => {
                warn!(
                    "{SECRET_ENV_VAR} is not set, signing tokens with the development secret. \
                     Set {MODE_ENV_VAR}=production to make this fatal"
                );
                Ok(Self {
                    bytes: DEVELOPMENT_SECRET.to_vec(),
                    fallback: true,
                })
            }
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Whether the development fallback is in use.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }
}

impl Display for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "REDACTED")
    }
}

impl Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningSecret")
            .field("bytes", &"REDACTED")
            .field("fallback", &self.fallback)
            .finish()
    }
}
