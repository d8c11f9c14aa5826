//! Shared state handed to the session middleware and handlers.

use std::sync::Arc;

use todo_auth::jwt::TokenCodec;

use crate::store::CredentialStore;

#[derive(Clone)]
pub struct AuthState {
    pub codec: Arc<TokenCodec>,
    pub store: Arc<dyn CredentialStore>,
}

impl AuthState {
    pub fn new(codec: TokenCodec, store: impl CredentialStore + 'static) -> Self {
        Self {
            codec: Arc::new(codec),
            store: Arc::new(store),
        }
    }
}
