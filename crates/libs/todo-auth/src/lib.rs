//! Session credentials for the todo service.
//!
//! - [`secret_hash`]: password hashing and verification across every stored
//!   hash format the service has ever written
//! - [`secret`]: the process-wide signing secret
//! - [`jwt`]: HS256 bearer tokens carrying an [`claims::IdentityClaims`]

pub mod claims;
pub mod error;
pub mod jwt;
pub mod prelude;
pub mod secret;
pub mod secret_hash;

use chrono::TimeDelta;

pub const CONNECTION_TOKEN_TYPE: &str = "Bearer";

/// Every token expires this long after it was issued.
pub const TOKEN_LIFETIME: TimeDelta = TimeDelta::days(7);
