//! Password hashing and verification.
//!
//! New hashes are PBKDF2-HMAC-SHA512 and stored as
//! `$pbkdf2-sha512$<salt hex>$<derived hash hex>`. Verification also accepts
//! every format older accounts may still carry:
//!
//! | Format            | Example stored value                 |
//! |-------------------|--------------------------------------|
//! | PBKDF2 (current)  | `$pbkdf2-sha512$9f2c…$41d0…`         |
//! | Argon2 PHC        | `$argon2id$v=19$m=19456,t=2,p=1$…$…` |
//! | Prefixed legacy   | `hashed_<password>`                  |
//! | Plain legacy      | `<password>`                         |
//!
//! # Examples
//!
//! ```rust
//! use todo_auth::secret_hash::{generate_secret_hash, is_secret_valid};
//!
//! let hash = generate_secret_hash("user_password_123");
//! assert!(hash.starts_with("$pbkdf2-sha512$"));
//!
//! assert!(is_secret_valid("user_password_123", &hash));
//! assert!(!is_secret_valid("wrong_password", &hash));
//!
//! // Accounts created before hashing was introduced keep working.
//! assert!(is_secret_valid("user_password_123", "hashed_user_password_123"));
//! ```

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use rand::{RngCore, rngs::OsRng};
use sha2::Sha512;

/// Tag of the current hash format.
pub const PBKDF2_TAG: &str = "pbkdf2-sha512";

/// Prefix written by the pre-hashing sign-up path.
pub const LEGACY_PREFIX: &str = "hashed_";

const SEPARATOR: char = '$';
const PBKDF2_ITERATIONS: u32 = 10_000;
const SALT_LEN: usize = 16;
const DERIVED_LEN: usize = 64;

/// Hash formats a stored credential can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashFormat {
    Pbkdf2Sha512,
    Argon2,
    LegacyPrefixed,
    LegacyPlain,
    Malformed,
}

/// A stored credential hash, parsed by its format tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredHash<'a> {
    Pbkdf2Sha512 { salt: Vec<u8>, derived: Vec<u8> },
    /// Kept as the raw PHC string; `argon2` parses it at verification time.
    Argon2(&'a str),
    LegacyPrefixed(&'a str),
    LegacyPlain(&'a str),
    Malformed,
}

impl<'a> StoredHash<'a> {
    /// Parses a stored hash. Never fails: anything unusable is `Malformed`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use todo_auth::secret_hash::{HashFormat, StoredHash};
    ///
    /// assert_eq!(StoredHash::parse("hashed_secret1").format(), HashFormat::LegacyPrefixed);
    /// assert_eq!(StoredHash::parse("$pbkdf2-sha512$00").format(), HashFormat::Malformed);
    /// ```
    pub fn parse(stored: &'a str) -> Self {
        if let Some(tagged) = stored.strip_prefix(SEPARATOR) {
            let tag = tagged.split(SEPARATOR).next().unwrap_or_default();
            return match tag {
                PBKDF2_TAG => Self::parse_pbkdf2(stored),
                "argon2id" | "argon2i" | "argon2d" => Self::Argon2(stored),
                _ => Self::Malformed,
            };
        }
        match stored.strip_prefix(LEGACY_PREFIX) {
            Some(password) => Self::LegacyPrefixed(password),
            None => Self::LegacyPlain(stored),
        }
    }

    fn parse_pbkdf2(stored: &str) -> Self {
        let fields: Vec<&str> = stored.split(SEPARATOR).collect();
        let [_, _, salt, derived] = fields.as_slice() else {
            return Self::Malformed;
        };
        match (hex::decode(salt), hex::decode(derived)) {
            (Ok(salt), Ok(derived)) if !salt.is_empty() && derived.len() == DERIVED_LEN => {
                Self::Pbkdf2Sha512 { salt, derived }
            }
            _ => Self::Malformed,
        }
    }

    pub fn format(&self) -> HashFormat {
        match self {
            Self::Pbkdf2Sha512 { .. } => HashFormat::Pbkdf2Sha512,
            Self::Argon2(_) => HashFormat::Argon2,
            Self::LegacyPrefixed(_) => HashFormat::LegacyPrefixed,
            Self::LegacyPlain(_) => HashFormat::LegacyPlain,
            Self::Malformed => HashFormat::Malformed,
        }
    }

    /// Whether this is the format [`generate_secret_hash`] writes today.
    pub fn is_current(&self) -> bool {
        self.format() == HashFormat::Pbkdf2Sha512
    }

    /// Checks `pw` against this hash.
    pub fn verify(&self, pw: &str) -> bool {
        match self {
            Self::Pbkdf2Sha512 { salt, derived } => {
                constant_time_eq(&derive(pw.as_bytes(), salt), derived)
            }
            Self::Argon2(phc) => PasswordHash::new(phc)
                .map(|hash| Argon2::default().verify_password(pw.as_bytes(), &hash).is_ok())
                .unwrap_or(false),
            Self::LegacyPrefixed(stored) | Self::LegacyPlain(stored) => {
                constant_time_eq(pw.as_bytes(), stored.as_bytes())
            }
            Self::Malformed => false,
        }
    }
}

/// Generates a salted PBKDF2 hash of `pw` ready for storage.
///
/// Panics only if the operating system cannot provide randomness.
pub fn generate_secret_hash(pw: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    let derived = derive(pw.as_bytes(), &salt);
    format!(
        "{SEPARATOR}{PBKDF2_TAG}{SEPARATOR}{}{SEPARATOR}{}",
        hex::encode(salt),
        hex::encode(derived)
    )
}

/// Verifies `pw` against a stored hash of any supported format.
///
/// A stored hash that cannot be parsed never matches.
pub fn is_secret_valid(pw: &str, hash: &str) -> bool {
    StoredHash::parse(hash).verify(pw)
}

fn derive(pw: &[u8], salt: &[u8]) -> [u8; DERIVED_LEN] {
    let mut derived = [0u8; DERIVED_LEN];
    pbkdf2::pbkdf2_hmac::<Sha512>(pw, salt, PBKDF2_ITERATIONS, &mut derived);
    derived
}

/// Constant-time byte comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
