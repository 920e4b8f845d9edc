use async_trait::async_trait;

use crate::domain::{Direction, ScoredYap, Vote, Yap, YapId};
use crate::error::{DomainError, RepoError};

/// Post store. Yaps are written once and never updated.
#[async_trait]
pub trait YapRepository: Send + Sync {
    async fn insert(&self, yap: Yap) -> Result<Yap, RepoError>;

    async fn find_by_id(&self, id: YapId) -> Result<Option<Yap>, RepoError>;
}

/// Append-only vote ledger.
///
/// There is no update or retract operation. A vote is corrected by casting the
/// opposite direction.
#[async_trait]
pub trait VoteLedger: Send + Sync {
    /// Append one vote for `yap_id`.
    ///
    /// Fails with [`DomainError::NotFound`] and appends nothing when the yap
    /// does not exist. Concurrent calls for the same yap are independent rows.
    async fn cast_vote(&self, yap_id: YapId, direction: Direction) -> Result<Vote, DomainError>;

    /// Every vote for `yap_id`, in the order they were appended.
    async fn votes_for(&self, yap_id: YapId) -> Result<Vec<Vote>, RepoError>;
}

/// Read path folding the ledger into scores. Every call recomputes from the
/// current ledger.
#[async_trait]
pub trait ScoreReader: Send + Sync {
    /// `#up - #down` for the yap; 0 when it has no votes.
    async fn score_of(&self, yap_id: YapId) -> Result<i64, RepoError>;

    /// Every yap exactly once, oldest first, with its current score.
    async fn list_feed(&self) -> Result<Vec<ScoredYap>, RepoError>;

    async fn find_scored(&self, yap_id: YapId) -> Result<Option<ScoredYap>, RepoError>;
}
