//! Session token encoding and verification.
//!
//! Tokens are HS256 JSON Web Tokens whose payload is an [`IdentityClaims`].
//! The [`TokenCodec`] owns the keys derived from the [`SigningSecret`] it was
//! built with, so the secret is injected once at startup and never looked up
//! again.
//!
//! # Examples
//!
//! ```rust
//! use todo_auth::{claims::IdentityClaims, jwt::TokenCodec, secret::SigningSecret};
//!
//! let codec = TokenCodec::new(&SigningSecret::new("MySuperSecret"));
//!
//! let claims = IdentityClaims::issue(42, "a@b.com");
//! let token = codec.encode(&claims).unwrap();
//! assert_eq!(token.split('.').count(), 3);
//!
//! let decoded = codec.decode(&token).unwrap();
//! assert_eq!(claims, decoded);
//! ```

use std::collections::HashSet;

use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use log::debug;

use crate::claims::{IdentityClaims, ReceivedClaims};
use crate::prelude::*;
use crate::secret::SigningSecret;

/// Signing algorithm for every session token.
const ALGORITHM: Algorithm = Algorithm::HS256;

/// Cryptographic key pair for JWT signing and verification.
struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl Keys {
    fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

/// Encodes and verifies session tokens with one signing secret.
pub struct TokenCodec {
    keys: Keys,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: &SigningSecret) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        // Expiry is checked after the payload is parsed so that the failure
        // order stays signature, structure, expiry, subject.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims = HashSet::new();

        Self {
            keys: Keys::new(secret.as_bytes()),
            validation,
        }
    }

    /// Signs `claims` into a `header.payload.signature` token.
    pub fn encode(&self, claims: &IdentityClaims) -> Result<String> {
        Ok(encode(&Header::new(ALGORITHM), claims, &self.keys.encoding)?)
    }

    /// Verifies `token` and returns the claims it carries.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedToken`]: not three segments, or an undecodable
    ///   header or payload
    /// - [`Error::InvalidSignature`]: signed with another secret or altered
    /// - [`Error::TokenExpired`]: `exp` is present and in the past
    /// - [`Error::MissingSubject`]: `userId` absent or not a positive integer
    pub fn decode(&self, token: &str) -> Result<IdentityClaims> {
        if token.split('.').count() != 3 {
            return Err(Error::MalformedToken);
        }

        let received = decode::<ReceivedClaims>(token, &self.keys.decoding, &self.validation)
            .map_err(|err| {
                debug!("Rejected session token: {err}");
                match err.kind() {
                    ErrorKind::InvalidSignature => Error::InvalidSignature,
                    _ => Error::MalformedToken,
                }
            })?
            .claims;

        if received.is_expired_at(Utc::now()) {
            return Err(Error::TokenExpired);
        }

        let subject_id = received.subject_id().ok_or(Error::MissingSubject)?;
        Ok(received.into_claims(subject_id))
    }
}
