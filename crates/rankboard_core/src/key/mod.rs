//! Order keys for fractional indexing.
//!
//! # Responsibility
//! - Define the validated `Key` newtype and its error taxonomy.
//! - Generate keys relative to zero, one, or two neighbors (`algebra`).
//! - Convert legacy numeric positions and mint evenly spaced batches
//!   (`migrate`).
//!
//! # Invariants
//! - Keys are non-empty and consist only of ASCII letters.
//! - Keys compare by code point; every uppercase letter sorts below `a`.
//! - Keys minted here never end with `A`, so there is always room below them.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod algebra;
pub mod migrate;

pub use algebra::{generate_key, initial_key, key_after, key_before, key_between};
pub use migrate::{batch_keys, position_to_key};

static KEY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z]+$").expect("valid key regex"));

/// Result type used by key generation.
pub type KeyResult<T> = Result<T, KeyError>;

/// Errors from key validation and generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// `before` does not sort strictly below `after`.
    InvalidOrder { before: String, after: String },
    /// Input is empty or contains non-letter characters.
    InvalidKey(String),
    /// No string sorts inside the requested gap.
    ///
    /// Only reachable with keys ending in `A`, which the engine never mints.
    NoRoom {
        before: Option<String>,
        after: Option<String>,
    },
}

impl Display for KeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidOrder { before, after } => write!(
                f,
                "key `{before}` must sort strictly before `{after}`"
            ),
            Self::InvalidKey(value) => write!(f, "invalid key: `{value}`"),
            Self::NoRoom { before, after } => write!(
                f,
                "no key fits between {} and {}",
                before.as_deref().unwrap_or("<start>"),
                after.as_deref().unwrap_or("<end>")
            ),
        }
    }
}

impl Error for KeyError {}

/// Returns whether `value` can be used as an order key.
///
/// True iff `value` is non-empty and made only of ASCII letters.
pub fn is_valid_key(value: &str) -> bool {
    KEY_RE.is_match(value)
}

/// Comparable order key.
///
/// Ordering is plain byte order of the underlying string, which for ASCII
/// letters equals code-point order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Key(String);

impl Key {
    /// Parses and validates one key.
    ///
    /// # Errors
    /// - `KeyError::InvalidKey` when `value` fails [`is_valid_key`].
    pub fn parse(value: impl Into<String>) -> KeyResult<Self> {
        let value = value.into();
        if !is_valid_key(&value) {
            return Err(KeyError::InvalidKey(value));
        }
        Ok(Self(value))
    }

    /// Wraps bytes produced by the generators.
    ///
    /// Callers guarantee the bytes are ASCII letters and non-empty.
    pub(crate) fn from_letters(bytes: Vec<u8>) -> Self {
        debug_assert!(!bytes.is_empty() && bytes.iter().all(u8::is_ascii_alphabetic));
        Self(bytes.into_iter().map(char::from).collect())
    }

    /// Borrows the key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Number of letters in this key.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Key {
    type Error = KeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<&str> for Key {
    type Error = KeyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Key> for String {
    fn from(value: Key) -> Self {
        value.0
    }
}

impl PartialEq<str> for Key {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Key {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
