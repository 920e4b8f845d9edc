//! SeaORM entities for the `yaps` and `votes` tables.

pub mod vote;
pub mod yap;
