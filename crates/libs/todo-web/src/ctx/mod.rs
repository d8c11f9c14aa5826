//! Request context management for web handlers.
//!
//! A [`Ctx`] is the identity resolved for one request. It is rebuilt from the
//! bearer token on every request and never cached.

use todo_auth::claims::IdentityClaims;

pub mod resolver;

/// Request context of an authenticated caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ctx {
    /// The authenticated user's id.
    pub user_id: i64,
}

impl Ctx {
    /// Creates a new request context.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use todo_web::ctx::Ctx;
    ///
    /// let ctx = Ctx::new(42);
    /// assert_eq!(ctx.user_id, 42);
    /// ```
    pub fn new(user_id: i64) -> Self {
        Self { user_id }
    }
}

impl From<&IdentityClaims> for Ctx {
    fn from(value: &IdentityClaims) -> Self {
        Self::new(value.subject_id())
    }
}
