use crate::fetch::FetchError;
use derive_more::Deref;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// RelationPath
///
/// Dotted relationship path identifying one node in a fetch plan,
/// e.g. `details` or `details.product`. Owned by the query plan and
/// looked up once per compilation; ordering is lexicographic, which
/// keeps parents before their children during plan walks.
///

#[derive(
    Clone, Debug, Deref, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct RelationPath(String);

impl TryFrom<String> for RelationPath {
    type Error = FetchError;

    fn try_from(path: String) -> Result<Self, Self::Error> {
        Self::try_new(path)
    }
}

impl From<RelationPath> for String {
    fn from(path: RelationPath) -> Self {
        path.0
    }
}

impl RelationPath {
    /// Parse a dotted path, rejecting empty paths and empty segments.
    pub fn try_new(path: impl Into<String>) -> Result<Self, FetchError> {
        let path = path.into();
        if path.is_empty() || path.split('.').any(str::is_empty) {
            return Err(FetchError::InvalidPath { path });
        }

        Ok(Self(path))
    }

    /// Path of one direct relationship property.
    pub fn root(segment: impl Into<String>) -> Result<Self, FetchError> {
        Self::try_new(segment)
    }

    /// Extend this path by one relationship segment.
    pub fn child(&self, segment: &str) -> Result<Self, FetchError> {
        Self::try_new(format!("{}.{segment}", self.0))
    }

    /// Parent path, or `None` for a direct relationship property.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.0
            .rsplit_once('.')
            .map(|(parent, _)| Self(parent.to_string()))
    }

    /// Last path segment (the property name on the immediate owner).
    #[must_use]
    pub fn leaf(&self) -> &str {
        self.0.rsplit_once('.').map_or(&self.0, |(_, leaf)| leaf)
    }

    /// Segments in owner-to-leaf order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Number of segments.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// True if `other` is this path or an ancestor of it.
    #[must_use]
    pub fn is_under(&self, other: &Self) -> bool {
        self == other || self.0.starts_with(&format!("{}.", other.0))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RelationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
