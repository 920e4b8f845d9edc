use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::validation::ValidationError;

/// Region codes of the reference deployment.
const DEFAULT_REGIONS: [&str; 3] = ["lhr", "syd", "iad"];

/// A deployment-zone label that passed membership validation.
///
/// Regions are labels only; nothing routes on them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Region(pub(crate) String);

impl Region {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The closed set of region codes accepted by this deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSet {
    codes: BTreeSet<String>,
}

impl RegionSet {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codes: codes.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a comma separated list such as `"lhr,syd,iad"`.
    ///
    /// Blank entries are ignored; a list with no usable entries yields the default set.
    pub fn parse_list(raw: &str) -> Self {
        let codes: BTreeSet<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(String::from)
            .collect();

        if codes.is_empty() {
            Self::default()
        } else {
            Self { codes }
        }
    }

    /// Exact, case-sensitive membership test.
    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    /// Accept `raw` only if it names one of the configured regions.
    pub fn validate(&self, raw: &str) -> Result<Region, ValidationError> {
        if self.contains(raw) {
            Ok(Region(raw.to_string()))
        } else {
            Err(ValidationError::UnknownRegion(raw.to_string()))
        }
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }
}

impl Default for RegionSet {
    fn default() -> Self {
        Self::new(DEFAULT_REGIONS)
    }
}
