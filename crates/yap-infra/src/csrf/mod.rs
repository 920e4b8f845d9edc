//! CSRF token implementations.

mod jwt;

pub use jwt::{CsrfConfig, DEFAULT_SECRET, JwtCsrfTokenService};
