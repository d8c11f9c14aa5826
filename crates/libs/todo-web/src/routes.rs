//! HTTP routes for the session endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    middleware,
    routing::{get, post},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::{
    account::{self, AuthResponse, SignInRequest, SignUpRequest},
    ctx::{Ctx, resolver::mw_session_resolver},
    mw_auth::mw_require_auth,
    prelude::*,
    state::AuthState,
};

/// The identity a bearer token resolved to.
#[derive(Debug, Deserialize, Serialize)]
pub struct SessionApi {
    #[serde(rename = "userId")]
    pub user_id: i64,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct HealthApi {
    pub status: String,
    pub timestamp: String,
}

pub fn v1(path: &str) -> String {
    format!("/v1/{path}")
}

/// Builds the session router.
///
/// `session` requires an authenticated caller; `sign_up`, `sign_in` and
/// `healthcheck` are public. Every request passes through
/// [`mw_session_resolver`] first.
pub fn app(state: AuthState) -> Router {
    let protected_routes = Router::new()
        .route(&v1("session"), get(session))
        .route_layer(middleware::from_fn(mw_require_auth));

    let public_routes = Router::new()
        .route(&v1("healthcheck"), get(healthcheck))
        .route(&v1("sign_up"), post(sign_up))
        .route(&v1("sign_in"), post(sign_in));

    Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            mw_session_resolver,
        ))
        .with_state(state)
}

#[axum::debug_handler]
async fn sign_up(
    State(state): State<AuthState>,
    payload: std::result::Result<Json<SignUpRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>> {
    let Json(payload) = payload?;
    Ok(Json(account::sign_up(
        &payload,
        state.store.as_ref(),
        &state.codec,
    )?))
}

#[axum::debug_handler]
async fn sign_in(
    State(state): State<AuthState>,
    payload: std::result::Result<Json<SignInRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>> {
    let Json(payload) = payload?;
    Ok(Json(account::sign_in(
        &payload,
        state.store.as_ref(),
        &state.codec,
    )?))
}

#[axum::debug_handler]
async fn session(ctx: Ctx) -> Json<SessionApi> {
    Json(SessionApi {
        user_id: ctx.user_id,
    })
}

#[axum::debug_handler]
async fn healthcheck() -> Json<HealthApi> {
    Json(HealthApi {
        status: String::from("ok"),
        timestamp: Utc::now().to_rfc3339(),
    })
}
