use std::sync::Arc;

use todo_auth::{jwt::TokenCodec, secret::SigningSecret};
use todo_web::{routes::app, state::AuthState, store::MemoryStore};

use super::{TEST_SECRET, api_client::ApiClient};

pub struct TestContext {
    pub api: ApiClient,
    pub client: reqwest::Client,
    pub store: Arc<MemoryStore>,
    pub codec: TokenCodec,
}

impl TestContext {
    /// Serves a fresh app on an ephemeral local port.
    pub async fn start() -> Self {
        let store = Arc::new(MemoryStore::default());
        let state = AuthState {
            codec: Arc::new(TokenCodec::new(&SigningSecret::new(TEST_SECRET))),
            store: store.clone(),
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");
        tokio::spawn(async move {
            axum::serve(listener, app(state))
                .await
                .expect("Test server stopped");
        });

        let client = reqwest::ClientBuilder::new()
            .build()
            .expect("Failed to build reqwest Client");

        Self {
            api: ApiClient {
                url: format!("http://{addr}/v1"),
            },
            client,
            store,
            codec: TokenCodec::new(&SigningSecret::new(TEST_SECRET)),
        }
    }
}
