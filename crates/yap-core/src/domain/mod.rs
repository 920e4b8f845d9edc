//! Domain entities - the core business objects.

mod region;
mod score;
mod session;
mod vote;
mod yap;

pub use region::{Region, RegionSet};
pub use score::{ScoredYap, fold_score};
pub use session::SessionId;
pub use vote::{Direction, Vote};
pub use yap::{Content, MAX_CONTENT_CHARS, Yap, YapId};
