//! Scores are derived from the vote ledger on every read and never stored.

use serde::Serialize;

use super::vote::Direction;
use super::yap::Yap;

/// Fold a sequence of votes into `#up - #down`.
///
/// Addition is commutative, so the result does not depend on the order the
/// votes were appended in.
pub fn fold_score<I>(directions: I) -> i64
where
    I: IntoIterator<Item = Direction>,
{
    directions.into_iter().map(Direction::weight).sum()
}

/// A yap joined with its current score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredYap {
    pub yap: Yap,
    pub score: i64,
}
