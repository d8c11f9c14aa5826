//! Route guard for endpoints that need a signed-in caller.

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::debug;

use crate::ctx::Ctx;
use crate::prelude::*;

/// Lets the request through only when the session resolver found a caller.
///
/// Must sit behind [`mw_session_resolver`](crate::ctx::resolver::mw_session_resolver).
/// Anonymous callers, including those whose token failed to verify, get
/// [`Error::AuthenticationRequired`] and never reach the handler.
///
/// # Examples
///
/// ```rust,no_run
/// use axum::{Router, middleware, routing::get};
/// use todo_auth::{jwt::TokenCodec, secret::SigningSecret};
/// use todo_web::{
///     ctx::{Ctx, resolver::mw_session_resolver},
///     mw_auth::mw_require_auth,
///     state::AuthState,
///     store::MemoryStore,
/// };
///
/// let state = AuthState::new(
///     TokenCodec::new(&SigningSecret::new("MySuperSecret")),
///     MemoryStore::default(),
/// );
///
/// let app: Router = Router::new()
///     .route("/v1/lists", get(my_lists))
///     .route_layer(middleware::from_fn(mw_require_auth))
///     .layer(middleware::from_fn_with_state(state.clone(), mw_session_resolver))
///     .with_state(state);
///
/// async fn my_lists(ctx: Ctx) -> String {
///     format!("lists of user {}", ctx.user_id)
/// }
/// ```
pub async fn mw_require_auth(ctx: Result<Ctx>, req: Request, next: Next) -> Result<Response> {
    if ctx.is_err() {
        debug!(path = req.uri().path(), "Anonymous request to a protected route");
        return Err(Error::AuthenticationRequired);
    }
    Ok(next.run(req).await)
}
