//! In-memory store - used as fallback when no database is configured.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use yap_core::domain::{Direction, ScoredYap, Vote, Yap, YapId, fold_score};
use yap_core::error::{DomainError, RepoError};
use yap_core::ports::{ScoreReader, VoteLedger, YapRepository};

/// Yaps keyed by id plus an append-only vote log.
///
/// Note: Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryYapStore {
    yaps: RwLock<BTreeMap<YapId, Yap>>,
    votes: RwLock<Vec<Vote>>,
}

impl InMemoryYapStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn score_in(votes: &[Vote], yap_id: YapId) -> i64 {
        fold_score(
            votes
                .iter()
                .filter(|v| v.yap_id == yap_id)
                .map(|v| v.direction),
        )
    }
}

#[async_trait]
impl YapRepository for InMemoryYapStore {
    async fn insert(&self, yap: Yap) -> Result<Yap, RepoError> {
        let mut yaps = self.yaps.write().await;
        if yaps.contains_key(&yap.id()) {
            return Err(RepoError::Constraint("Yap already exists".to_string()));
        }
        yaps.insert(yap.id(), yap.clone());
        Ok(yap)
    }

    async fn find_by_id(&self, id: YapId) -> Result<Option<Yap>, RepoError> {
        Ok(self.yaps.read().await.get(&id).cloned())
    }
}

#[async_trait]
impl VoteLedger for InMemoryYapStore {
    async fn cast_vote(&self, yap_id: YapId, direction: Direction) -> Result<Vote, DomainError> {
        // Lock order is always yaps then votes
        let yaps = self.yaps.read().await;
        if !yaps.contains_key(&yap_id) {
            return Err(DomainError::yap_not_found(yap_id));
        }

        let vote = Vote::new(yap_id, direction);
        self.votes.write().await.push(vote);
        Ok(vote)
    }

    async fn votes_for(&self, yap_id: YapId) -> Result<Vec<Vote>, RepoError> {
        let votes = self.votes.read().await;
        Ok(votes.iter().filter(|v| v.yap_id == yap_id).copied().collect())
    }
}

#[async_trait]
impl ScoreReader for InMemoryYapStore {
    async fn score_of(&self, yap_id: YapId) -> Result<i64, RepoError> {
        let votes = self.votes.read().await;
        Ok(Self::score_in(&votes, yap_id))
    }

    async fn list_feed(&self) -> Result<Vec<ScoredYap>, RepoError> {
        let yaps = self.yaps.read().await;
        let votes = self.votes.read().await;

        Ok(yaps
            .values()
            .map(|yap| ScoredYap {
                score: Self::score_in(&votes, yap.id()),
                yap: yap.clone(),
            })
            .collect())
    }

    async fn find_scored(&self, yap_id: YapId) -> Result<Option<ScoredYap>, RepoError> {
        let yaps = self.yaps.read().await;
        let votes = self.votes.read().await;

        Ok(yaps.get(&yap_id).map(|yap| ScoredYap {
            yap: yap.clone(),
            score: Self::score_in(&votes, yap_id),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yap_core::validation::{validate_content, validate_region};
    use yap_core::domain::RegionSet;

    fn new_yap(text: &str) -> Yap {
        let regions = RegionSet::default();
        Yap::new(
            validate_content(text).unwrap(),
            validate_region(&regions, "lhr").unwrap(),
        )
    }

    #[tokio::test]
    async fn test_score_is_zero_without_votes() {
        let store = InMemoryYapStore::new();
        let yap = store.insert(new_yap("hello")).await.unwrap();

        assert_eq!(store.score_of(yap.id()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_votes_fold_into_score() {
        let store = InMemoryYapStore::new();
        let yap = store.insert(new_yap("hello")).await.unwrap();

        for direction in [Direction::Up, Direction::Down, Direction::Up, Direction::Up] {
            store.cast_vote(yap.id(), direction).await.unwrap();
        }

        assert_eq!(store.score_of(yap.id()).await.unwrap(), 2);
        assert_eq!(store.votes_for(yap.id()).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_vote_on_missing_yap_leaves_ledger_unchanged() {
        let store = InMemoryYapStore::new();
        let missing = YapId::new();

        let err = store.cast_vote(missing, Direction::Up).await.unwrap_err();

        assert!(matches!(err, DomainError::NotFound { entity_type: "yap", id } if id == missing));
        assert!(store.votes_for(missing).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_feed_lists_every_yap_once_in_creation_order() {
        let store = InMemoryYapStore::new();
        let first = store.insert(new_yap("first")).await.unwrap();
        let second = store.insert(new_yap("second")).await.unwrap();
        store.cast_vote(second.id(), Direction::Down).await.unwrap();

        let feed = store.list_feed().await.unwrap();

        assert_eq!(feed.len(), 2);
        assert_eq!(feed[0].yap.id(), first.id());
        assert_eq!(feed[0].score, 0);
        assert_eq!(feed[1].yap.id(), second.id());
        assert_eq!(feed[1].score, -1);
    }

    #[tokio::test]
    async fn test_find_scored() {
        let store = InMemoryYapStore::new();
        let yap = store.insert(new_yap("hello")).await.unwrap();
        store.cast_vote(yap.id(), Direction::Up).await.unwrap();

        let scored = store.find_scored(yap.id()).await.unwrap().unwrap();
        assert_eq!(scored.score, 1);
        assert_eq!(scored.yap.content().as_str(), "hello");

        assert!(store.find_scored(YapId::new()).await.unwrap().is_none());
    }
}
