//! Stable tooth identifiers

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// A stable tooth identifier, usually a two-digit FDI code such as `"11"`.
///
/// Ids are opaque strings. The pose table, the asset naming and the
/// selection state only ever compare them for equality.
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToothId(String);

impl ToothId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The 28 permanent teeth in FDI notation (wisdom teeth excluded),
    /// quadrant by quadrant: 11-17, 21-27, 31-37, 41-47.
    pub fn fdi_permanent() -> Vec<ToothId> {
        let mut ids = Vec::with_capacity(28);
        for quadrant in 1..=4 {
            for tooth in 1..=7 {
                ids.push(Self(format!("{}{}", quadrant, tooth)));
            }
        }
        ids
    }
}

impl Borrow<str> for ToothId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ToothId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ToothId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Debug for ToothId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ToothId({})", self.0)
    }
}

impl fmt::Display for ToothId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
