//! Zoned keys.
//!
//! Every entity definition is scoped to the zone that owns it. The canonical
//! form is `basic@zone` with exactly one `@`. A bare key is implicitly scoped
//! to a default zone supplied by the caller; a key that is already scoped is
//! left alone.

use std::fmt;

use crate::error::{Error, Result};

const SEPARATOR: char = '@';

/// A validated `basic@zone` key.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct ZonedKey {
    full: String,
    split: usize,
}

impl ZonedKey {
    /// Parses an already-scoped key.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKey` unless the key contains exactly one `@` with a
    /// non-empty part on each side.
    pub fn parse(key: &str) -> Result<Self> {
        let (basic, zone) = split_zoned_key(key)?;
        if basic.is_empty() || zone.is_empty() {
            return Err(Error::invalid_key(key, "empty key component"));
        }
        Ok(Self {
            full: key.to_string(),
            split: basic.len(),
        })
    }

    /// Builds a key from its two halves.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKey` if either half is empty or contains `@`.
    pub fn from_parts(basic: &str, zone: &str) -> Result<Self> {
        if basic.is_empty() || zone.is_empty() {
            return Err(Error::invalid_key(
                format!("{basic}{SEPARATOR}{zone}"),
                "empty key component",
            ));
        }
        Self::parse(&format!("{basic}{SEPARATOR}{zone}"))
    }

    /// The part before the `@`.
    #[must_use]
    pub fn basic_key(&self) -> &str {
        &self.full[..self.split]
    }

    /// The part after the `@`.
    #[must_use]
    pub fn zone_key(&self) -> &str {
        &self.full[self.split + 1..]
    }

    /// The whole `basic@zone` string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full
    }
}

impl fmt::Debug for ZonedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ZonedKey({})", self.full)
    }
}

impl fmt::Display for ZonedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}

impl AsRef<str> for ZonedKey {
    fn as_ref(&self) -> &str {
        &self.full
    }
}

impl TryFrom<String> for ZonedKey {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<ZonedKey> for String {
    fn from(key: ZonedKey) -> Self {
        key.full
    }
}

/// Canonicalizes `key` into `basic@zone` form, scoping bare keys to `default_zone`.
///
/// Idempotent: a key that already carries exactly one `@` is returned unchanged.
///
/// # Errors
///
/// Returns `InvalidKey` if `key` is empty, contains more than one `@`, or
/// would end up with an empty half.
pub fn build_zoned_key(key: &str, default_zone: &str) -> Result<ZonedKey> {
    if key.is_empty() {
        return Err(Error::invalid_key(key, "empty key"));
    }
    match key.matches(SEPARATOR).count() {
        0 => ZonedKey::from_parts(key, default_zone),
        1 => ZonedKey::parse(key),
        _ => Err(Error::invalid_key(key, "more than one '@'")),
    }
}

/// Splits a `basic@zone` key into its halves.
///
/// # Errors
///
/// Returns `InvalidKey` unless the key contains exactly one `@`.
pub fn split_zoned_key(key: &str) -> Result<(&str, &str)> {
    let mut parts = key.split(SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(basic), Some(zone), None) => Ok((basic, zone)),
        (_, None, _) => Err(Error::invalid_key(key, "missing '@'")),
        _ => Err(Error::invalid_key(key, "more than one '@'")),
    }
}
