//! # Yap Shared
//!
//! Wire types exchanged with clients: form bodies, feed and yap views,
//! and the response envelopes.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
