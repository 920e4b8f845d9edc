use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use uuid::Uuid;

use super::region::Region;
use crate::validation::ValidationError;

/// Maximum length of a yap, in Unicode scalar values.
pub const MAX_CONTENT_CHARS: usize = 240;

/// Time-sortable yap identifier (UUID v7).
///
/// The byte and string orderings of a v7 UUID follow creation time, so the id
/// doubles as the chronological sort key for the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct YapId(Uuid);

impl YapId {
    /// Generate a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for YapId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for YapId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<YapId> for Uuid {
    fn from(id: YapId) -> Self {
        id.0
    }
}

impl FromStr for YapId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| ValidationError::InvalidYapId(s.to_string()))
    }
}

impl fmt::Display for YapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validated yap text. Only obtainable through [`crate::validation::validate_content`]
/// or storage rehydration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Content(pub(crate) String);

impl Content {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A short post tagged with a deployment region.
///
/// Fields are private and there are no setters: once constructed a yap is
/// never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Yap {
    id: YapId,
    content: Content,
    region: Region,
}

impl Yap {
    /// Create a new yap from already-validated parts.
    pub fn new(content: Content, region: Region) -> Self {
        Self {
            id: YapId::new(),
            content,
            region,
        }
    }

    /// Rebuild a yap from a persisted row.
    ///
    /// Rows were validated when they were written, so nothing is re-checked here.
    pub fn restore(id: YapId, content: String, region: String) -> Self {
        Self {
            id,
            content: Content(content),
            region: Region(region),
        }
    }

    pub fn id(&self) -> YapId {
        self.id
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn region(&self) -> &Region {
        &self.region
    }
}
