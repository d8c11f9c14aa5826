//! Context resolver for extracting the caller's identity from HTTP requests.

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use todo_auth::jwt::TokenCodec;
use tracing::debug;

use crate::ctx::Ctx;
use crate::prelude::*;
use crate::state::AuthState;

/// Resolves an optional bearer token into a request context.
///
/// A missing token and a token that fails verification both resolve to
/// `None`; the failure reason is only logged.
///
/// # Examples
///
/// ```rust
/// use todo_auth::{claims::IdentityClaims, jwt::TokenCodec, secret::SigningSecret};
/// use todo_web::ctx::{Ctx, resolver::resolve_session};
///
/// let codec = TokenCodec::new(&SigningSecret::new("MySuperSecret"));
/// let token = codec.encode(&IdentityClaims::issue(7, "a@b.com")).unwrap();
///
/// assert_eq!(resolve_session(&codec, Some(&token)), Some(Ctx::new(7)));
/// assert_eq!(resolve_session(&codec, Some("garbage")), None);
/// assert_eq!(resolve_session(&codec, None), None);
/// ```
pub fn resolve_session(codec: &TokenCodec, token: Option<&str>) -> Option<Ctx> {
    let token = token?;
    match codec.decode(token) {
        Ok(claims) => Some(Ctx::from(&claims)),
        Err(err) => {
            debug!("Resolving request as anonymous: {err}");
            None
        }
    }
}

/// Middleware resolving the request context from the `Authorization` header.
///
/// Stores an `Option<Ctx>` in the request extensions and always forwards the
/// request; routes that need an identity reject it themselves.
///
/// # Examples
///
/// ```rust
/// use axum::Router;
/// use todo_auth::{jwt::TokenCodec, secret::SigningSecret};
/// use todo_web::{ctx::resolver::mw_session_resolver, state::AuthState, store::MemoryStore};
///
/// let state = AuthState::new(
///     TokenCodec::new(&SigningSecret::new("MySuperSecret")),
///     MemoryStore::default(),
/// );
/// let app: Router<()> = Router::new()
///     .layer(axum::middleware::from_fn_with_state(state, mw_session_resolver));
/// ```
pub async fn mw_session_resolver(
    State(state): State<AuthState>,
    headers: HeaderMap,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let bearer = headers.typed_get::<Authorization<Bearer>>();
    let ctx = resolve_session(&state.codec, bearer.as_ref().map(|auth| auth.token()));

    req.extensions_mut().insert(ctx);

    next.run(req).await
}

impl<S: Send + Sync> FromRequestParts<S> for Ctx {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        parts
            .extensions
            .get::<Option<Ctx>>()
            .ok_or(Error::CtxMissing)?
            .clone()
            .ok_or(Error::AuthenticationRequired)
    }
}
