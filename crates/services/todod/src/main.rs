//! Todo Session Service (todod)
//!
//! Serves the session endpoints of the todo service:
//!
//! - **Sign-up / sign-in**: create accounts and mint bearer tokens
//! - **Session**: resolve a bearer token back to the caller's identity
//!
//! The signing secret is loaded once at startup. In production
//! (`APP_ENV=production`) a missing `JWT_SECRET` stops the service before it
//! binds its port.

use todo_auth::{jwt::TokenCodec, secret::SigningSecret};
use todo_web::{routes::app, state::AuthState, store::MemoryStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::prelude::*;

mod config;
mod error;
mod prelude;

/// Main entry point for the todo session service.
///
/// # Examples
///
/// ```bash
/// export APP_ENV=production
/// export JWT_SECRET=your_jwt_secret
/// todod
/// ```
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{}=debug,todo_web=debug,todo_auth=info,tower_http=debug",
                    env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let secret = SigningSecret::from_env().inspect_err(|err| {
        tracing::error!("Refusing to start: {err}");
    })?;
    let config = ServerConfig::from_env()?;

    let state = AuthState::new(TokenCodec::new(&secret), MemoryStore::default());

    let listener = tokio::net::TcpListener::bind(config.addr()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {err}");
            }
            tracing::info!("Shutting down");
        })
        .await?;

    Ok(())
}
