//! Credential records and the store that owns them.
//!
//! Persistence belongs to the application around this crate; it plugs in
//! through [`CredentialStore`]. [`MemoryStore`] is the in-process
//! implementation used by the service binary and the tests.

use std::sync::RwLock;

use chrono::{DateTime, Utc};

/// A user account as far as authentication is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Credential store errors.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Email already registered")]
    EmailTaken,

    #[error("Credential store unavailable: {0}")]
    Unavailable(String),
}

/// Lookup and creation of credential records.
pub trait CredentialStore: Send + Sync {
    /// Finds the account registered under `email`, if any.
    fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Persists a new account and returns it with its assigned id.
    ///
    /// Fails with [`StoreError::EmailTaken`] if `email` is already registered.
    fn insert(&self, email: &str, password_hash: &str) -> Result<UserRecord, StoreError>;
}

#[derive(Debug, Default)]
struct MemoryInner {
    users: Vec<UserRecord>,
    last_id: i64,
}

/// A [`CredentialStore`] kept in process memory.
///
/// # Examples
///
/// ```rust
/// use todo_web::store::{CredentialStore, MemoryStore};
///
/// let store = MemoryStore::default();
/// let user = store.insert("a@b.com", "hashed_secret1").unwrap();
/// assert_eq!(user.id, 1);
/// assert_eq!(store.find_by_email("a@b.com").unwrap(), Some(user));
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryInner>,
}

impl CredentialStore for MemoryStore {
    fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    fn insert(&self, email: &str, password_hash: &str) -> Result<UserRecord, StoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        if inner.users.iter().any(|u| u.email == email) {
            return Err(StoreError::EmailTaken);
        }
        inner.last_id += 1;
        let user = UserRecord {
            id: inner.last_id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        inner.users.push(user.clone());
        Ok(user)
    }
}
