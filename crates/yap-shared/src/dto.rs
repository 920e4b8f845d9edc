//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Form body of `POST /`.
///
/// Missing fields become empty strings so the CSRF check, not the extractor,
/// decides the status of an incomplete form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateYapForm {
    pub content: String,
    pub region: String,
    #[serde(rename = "_csrf")]
    pub csrf: String,
}

/// Form body of `POST /{id}/vote/{direction}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VoteForm {
    #[serde(rename = "_csrf")]
    pub csrf: String,
}

/// A yap with its score at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YapResponse {
    pub id: String,
    pub content: String,
    pub region: String,
    pub score: i64,
}

/// Tokens to embed in the hidden `_csrf` field of each mutating form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsrfTokens {
    pub create: String,
    pub vote: String,
}

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedResponse {
    pub yaps: Vec<YapResponse>,
    /// Region codes accepted by `POST /`.
    pub regions: Vec<String>,
    pub csrf: CsrfTokens,
}
