//! Validation layer: raw user input in, domain values or a rejection reason out.
//!
//! Nothing here performs I/O.

use thiserror::Error;

use crate::domain::{Content, Direction, MAX_CONTENT_CHARS, Region, RegionSet, YapId};

/// Why a piece of user input was rejected. Always user-correctable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("content is {len} characters, the limit is {max}")]
    ContentTooLong { len: usize, max: usize },

    #[error("unknown region: {0:?}")]
    UnknownRegion(String),

    #[error("invalid vote direction: {0:?}")]
    InvalidDirection(String),

    #[error("invalid yap id: {0:?}")]
    InvalidYapId(String),
}

/// Accept content of at most [`MAX_CONTENT_CHARS`] Unicode scalar values.
///
/// The text is passed through unchanged.
pub fn validate_content(raw: &str) -> Result<Content, ValidationError> {
    let len = raw.chars().count();
    if len > MAX_CONTENT_CHARS {
        return Err(ValidationError::ContentTooLong {
            len,
            max: MAX_CONTENT_CHARS,
        });
    }
    // NOTE sanitization and word filters would slot in here
    Ok(Content(raw.to_string()))
}

/// Accept `raw` only if it is one of the configured region codes.
pub fn validate_region(regions: &RegionSet, raw: &str) -> Result<Region, ValidationError> {
    regions.validate(raw)
}

/// Accept exactly `"up"` or `"down"`.
pub fn validate_direction(raw: &str) -> Result<Direction, ValidationError> {
    raw.parse()
}

pub fn parse_yap_id(raw: &str) -> Result<YapId, ValidationError> {
    raw.parse()
}
