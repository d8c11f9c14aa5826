//! Sign-up and sign-in.
//!
//! Both flows end by minting a fresh session token for the account. A failed
//! sign-in always surfaces as [`Error::InvalidCredentials`], whether the email
//! is unknown or the password is wrong; only the logs tell the two apart.

use std::{hint::black_box, sync::LazyLock};

use serde::{Deserialize, Serialize};
use todo_auth::{
    CONNECTION_TOKEN_TYPE,
    claims::IdentityClaims,
    jwt::TokenCodec,
    secret_hash::{StoredHash, generate_secret_hash},
};
use tracing::{error, info, warn};

use crate::prelude::*;
use crate::store::{CredentialStore, StoreError, UserRecord};

/// Shortest password accepted at sign-up.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Checked against on unknown emails so that both rejections run the KDF.
static UNKNOWN_ACCOUNT_HASH: LazyLock<String> =
    LazyLock::new(|| generate_secret_hash("unknown-account"));

#[derive(Debug, Deserialize, Serialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

impl SignInRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserApi {
    pub id: i64,
    pub email: String,
}

/// Response to a successful sign-up or sign-in.
///
/// # JSON Format
///
/// ```json
/// {
///   "user": { "id": 1, "email": "a@b.com" },
///   "token": "eyJ0eXAiOiJKV1QiLCJhbGciOiJIUzI1NiJ9...",
///   "token_type": "Bearer"
/// }
/// ```
#[derive(Debug, Deserialize, Serialize)]
pub struct AuthResponse {
    pub user: UserApi,
    pub token: String,
    pub token_type: String,
}

impl From<&UserRecord> for UserApi {
    fn from(value: &UserRecord) -> Self {
        Self {
            id: value.id,
            email: value.email.clone(),
        }
    }
}

/// Registers a new account and signs it in.
///
/// # Examples
///
/// ```rust
/// use todo_auth::{jwt::TokenCodec, secret::SigningSecret};
/// use todo_web::account::{SignUpRequest, sign_up};
/// use todo_web::store::MemoryStore;
///
/// let store = MemoryStore::default();
/// let codec = TokenCodec::new(&SigningSecret::new("MySuperSecret"));
///
/// let request = SignUpRequest {
///     email: "a@b.com".to_string(),
///     password: "secret1".to_string(),
/// };
/// let response = sign_up(&request, &store, &codec).unwrap();
/// assert_eq!(response.user.email, "a@b.com");
/// ```
pub fn sign_up(
    request: &SignUpRequest,
    store: &dyn CredentialStore,
    codec: &TokenCodec,
) -> Result<AuthResponse> {
    validate_email(&request.email)?;
    if request.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Error::InvalidInput("Password must be at least 6 characters"));
    }

    let hash = generate_secret_hash(&request.password);
    let user = store
        .insert(&request.email, &hash)
        .map_err(|err| match err {
            StoreError::EmailTaken => Error::EmailAlreadyRegistered,
            err => err.into(),
        })?;
    info!(user_id = user.id, "Registered new account");

    issue_token(&user, codec)
}

/// Checks the credentials and returns the matching account.
pub fn authenticate(request: &SignInRequest, store: &dyn CredentialStore) -> Result<UserRecord> {
    let Some(user) = store.find_by_email(&request.email)? else {
        black_box(StoredHash::parse(&UNKNOWN_ACCOUNT_HASH).verify(&request.password));
        warn!("Sign in rejected: no account registered for the given email");
        return Err(Error::InvalidCredentials);
    };

    let stored = StoredHash::parse(&user.password_hash);
    if !stored.verify(&request.password) {
        warn!(user_id = user.id, "Sign in rejected: password mismatch");
        return Err(Error::InvalidCredentials);
    }
    if !stored.is_current() {
        info!(
            user_id = user.id,
            format = ?stored.format(),
            "Account still uses a legacy password hash"
        );
    }
    Ok(user)
}

/// Authenticates the account and mints a session token for it.
pub fn sign_in(
    request: &SignInRequest,
    store: &dyn CredentialStore,
    codec: &TokenCodec,
) -> Result<AuthResponse> {
    let user = authenticate(request, store)?;
    issue_token(&user, codec)
}

fn issue_token(user: &UserRecord, codec: &TokenCodec) -> Result<AuthResponse> {
    let claims = IdentityClaims::issue(user.id, &user.email);
    let token = codec.encode(&claims).map_err(|err| {
        error!("Failed to encode JWT {err}");
        err
    })?;

    Ok(AuthResponse {
        user: user.into(),
        token,
        token_type: String::from(CONNECTION_TOKEN_TYPE),
    })
}

fn validate_email(email: &str) -> Result<()> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidInput("Invalid email address"))
    }
}
