//! Identity claims carried by session tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::TOKEN_LIFETIME;

/// The identity facts signed into a session token.
///
/// Claims minted here always expire [`TOKEN_LIFETIME`] after the issue time;
/// there is no way to build a claim set with any other lifetime. Tokens
/// received without an `exp` decode with no expiry.
///
/// # JSON Format
///
/// ```json
/// { "userId": 42, "email": "a@b.com", "iat": 1700000000, "exp": 1700604800 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityClaims {
    #[serde(rename = "userId")]
    subject_id: i64,
    email: String,
    #[serde(rename = "iat")]
    issued_at: i64,
    #[serde(rename = "exp", skip_serializing_if = "Option::is_none")]
    expires_at: Option<i64>,
}

impl IdentityClaims {
    /// Builds the claims for a token issued at `issued_at`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chrono::{TimeZone, Utc};
    /// use todo_auth::{TOKEN_LIFETIME, claims::IdentityClaims};
    ///
    /// let issued_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    /// let claims = IdentityClaims::new(42, "a@b.com", issued_at);
    /// assert_eq!(
    ///     claims.expires_at(),
    ///     Some(issued_at.timestamp() + TOKEN_LIFETIME.num_seconds())
    /// );
    /// ```
    pub fn new(subject_id: i64, email: impl Into<String>, issued_at: DateTime<Utc>) -> Self {
        let issued_at = issued_at.timestamp();
        Self {
            subject_id,
            email: email.into(),
            issued_at,
            expires_at: Some(issued_at + TOKEN_LIFETIME.num_seconds()),
        }
    }

    /// Builds the claims for a token issued right now.
    pub fn issue(subject_id: i64, email: impl Into<String>) -> Self {
        Self::new(subject_id, email, Utc::now())
    }

    pub fn subject_id(&self) -> i64 {
        self.subject_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Issue time, seconds since the epoch.
    pub fn issued_at(&self) -> i64 {
        self.issued_at
    }

    /// Expiry time, seconds since the epoch.
    pub fn expires_at(&self) -> Option<i64> {
        self.expires_at
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        is_past(self.expires_at, now)
    }
}

/// Payload shape accepted on the way in.
///
/// Only `userId` and `exp` carry meaning for verification; `email` and `iat`
/// fall back to empty values. `userId` stays untyped so that a missing or
/// non-positive subject is told apart from a structurally broken payload.
#[derive(Debug, Deserialize)]
pub(crate) struct ReceivedClaims {
    #[serde(rename = "userId", default)]
    pub(crate) user_id: Option<serde_json::Value>,
    #[serde(default)]
    pub(crate) email: String,
    #[serde(default)]
    pub(crate) iat: i64,
    #[serde(default)]
    pub(crate) exp: Option<i64>,
}

impl ReceivedClaims {
    pub(crate) fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        is_past(self.exp, now)
    }

    pub(crate) fn subject_id(&self) -> Option<i64> {
        self.user_id
            .as_ref()
            .and_then(serde_json::Value::as_i64)
            .filter(|id| *id > 0)
    }

    pub(crate) fn into_claims(self, subject_id: i64) -> IdentityClaims {
        IdentityClaims {
            subject_id,
            email: self.email,
            issued_at: self.iat,
            expires_at: self.exp,
        }
    }
}

/// A missing expiry never passes.
fn is_past(expires_at: Option<i64>, now: DateTime<Utc>) -> bool {
    expires_at.is_some_and(|exp| exp < now.timestamp())
}
