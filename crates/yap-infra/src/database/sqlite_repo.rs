//! SQLite implementations of the post store, vote ledger and score reader.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbBackend, DbConn, DbErr, EntityTrait, FromQueryResult,
    QueryFilter, QueryOrder, Statement,
};

use yap_core::domain::{Direction, ScoredYap, Vote, Yap, YapId};
use yap_core::error::{DomainError, RepoError};
use yap_core::ports::{ScoreReader, VoteLedger, YapRepository};

use super::entity::vote::{self, Entity as VoteEntity};
use super::entity::yap::{self, Entity as YapEntity};

const SCORE_EXPR: &str =
    "COALESCE(SUM(CASE WHEN v.score = 1 THEN 1 WHEN v.score = 0 THEN -1 ELSE 0 END), 0)";

/// Existence check and append happen in one statement, so a vote can never
/// land on a yap that is not there.
const INSERT_VOTE_SQL: &str = "INSERT INTO votes (yap, score) \
     SELECT ?, ? WHERE EXISTS (SELECT 1 FROM yaps WHERE id = ?)";

/// Yap store, vote ledger and score reader over one SQLite pool.
#[derive(Clone)]
pub struct SqliteYapStore {
    db: Arc<DbConn>,
}

#[derive(Debug, FromQueryResult)]
struct ScoredRow {
    id: uuid::Uuid,
    content: String,
    region: String,
    score: i64,
}

impl From<ScoredRow> for ScoredYap {
    fn from(row: ScoredRow) -> Self {
        ScoredYap {
            yap: Yap::restore(YapId::from(row.id), row.content, row.region),
            score: row.score,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct ScoreRow {
    score: i64,
}

impl SqliteYapStore {
    pub fn new(db: DbConn) -> Self {
        Self { db: Arc::new(db) }
    }

    fn scored_select(filter: &str) -> String {
        format!(
            "SELECT y.id AS id, y.content AS content, y.region AS region, {SCORE_EXPR} AS score \
             FROM yaps y LEFT JOIN votes v ON v.yap = y.id \
             {filter} \
             GROUP BY y.id, y.content, y.region \
             ORDER BY y.id"
        )
    }
}

/// Classify a SeaORM error. Lock and pool timeouts are retryable.
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    match err {
        DbErr::ConnectionAcquire(e) => RepoError::Busy(e.to_string()),
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        other => {
            let err_str = other.to_string();
            let lower = err_str.to_lowercase();
            if lower.contains("locked") || lower.contains("busy") {
                RepoError::Busy(err_str)
            } else if lower.contains("constraint") {
                RepoError::Constraint(err_str)
            } else {
                RepoError::Query(err_str)
            }
        }
    }
}

#[async_trait]
impl YapRepository for SqliteYapStore {
    async fn insert(&self, yap: Yap) -> Result<Yap, RepoError> {
        tracing::debug!(yap_id = %yap.id(), region = %yap.region(), "Inserting yap");

        YapEntity::insert(yap::ActiveModel::from(&yap))
            .exec_without_returning(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(yap)
    }

    async fn find_by_id(&self, id: YapId) -> Result<Option<Yap>, RepoError> {
        let result = YapEntity::find_by_id(id.as_uuid())
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl VoteLedger for SqliteYapStore {
    async fn cast_vote(&self, yap_id: YapId, direction: Direction) -> Result<Vote, DomainError> {
        let uuid = yap_id.as_uuid();
        let stmt = Statement::from_sql_and_values(
            DbBackend::Sqlite,
            INSERT_VOTE_SQL,
            [uuid.into(), direction.is_up().into(), uuid.into()],
        );

        let result = self.db.execute(stmt).await.map_err(map_db_err)?;

        if result.rows_affected() == 0 {
            tracing::debug!(yap_id = %yap_id, "Vote rejected, yap does not exist");
            return Err(DomainError::yap_not_found(yap_id));
        }

        tracing::debug!(yap_id = %yap_id, direction = %direction, "Vote appended");
        Ok(Vote::new(yap_id, direction))
    }

    async fn votes_for(&self, yap_id: YapId) -> Result<Vec<Vote>, RepoError> {
        let rows = VoteEntity::find()
            .filter(vote::Column::Yap.eq(yap_id.as_uuid()))
            .order_by_asc(vote::Column::Id)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl ScoreReader for SqliteYapStore {
    async fn score_of(&self, yap_id: YapId) -> Result<i64, RepoError> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Sqlite,
            format!("SELECT {SCORE_EXPR} AS score FROM votes v WHERE v.yap = ?"),
            [yap_id.as_uuid().into()],
        );

        let row = ScoreRow::find_by_statement(stmt)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(row.map(|r| r.score).unwrap_or(0))
    }

    async fn list_feed(&self) -> Result<Vec<ScoredYap>, RepoError> {
        let stmt = Statement::from_string(DbBackend::Sqlite, Self::scored_select(""));

        let rows = ScoredRow::find_by_statement(stmt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_scored(&self, yap_id: YapId) -> Result<Option<ScoredYap>, RepoError> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Sqlite,
            Self::scored_select("WHERE y.id = ?"),
            [yap_id.as_uuid().into()],
        );

        let row = ScoredRow::find_by_statement(stmt)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(row.map(Into::into))
    }
}
