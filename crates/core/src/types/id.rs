//! Favorite song identifiers.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a favorite song.
///
/// Ids are minted from a millisecond timestamp by the songs draft, which
/// bumps the value when two songs are added within the same millisecond.
/// Ids that arrive from a persisted record are kept verbatim, whatever
/// their shape.
///
/// ```
/// use clarity_core::SongId;
///
/// let id = SongId::from_sequence(1_700_000_000_000);
/// assert_eq!(id.as_str(), "1700000000000");
/// assert_eq!(id.sequence(), Some(1_700_000_000_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongId(String);

impl SongId {
    /// Create an id from a numeric sequence value.
    #[must_use]
    pub fn from_sequence(value: u64) -> Self {
        Self(value.to_string())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric value of the id, if it is numeric.
    #[must_use]
    pub fn sequence(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SongId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for SongId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl AsRef<str> for SongId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_numeric_ids_are_kept() {
        let id = SongId::from("legacy-id");
        assert_eq!(id.as_str(), "legacy-id");
        assert_eq!(id.sequence(), None);
    }

    #[test]
    fn test_equality_by_value() {
        assert_eq!(SongId::from_sequence(42), SongId::from("42"));
    }
}
