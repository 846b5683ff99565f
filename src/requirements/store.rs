use std::fmt;

use sqlx::PgPool;

use super::types::{SavedRequirements, SubmissionRecord};

/// A failure reported by the persistence backend. `message` is whatever the
/// backend said, if it said anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    pub message: Option<String>,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: Some(message.into()) }
    }

    pub fn silent() -> Self {
        Self { message: None }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "Store error: {msg}"),
            None => write!(f, "Store error"),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            // Postgres puts the useful text (constraint name etc.) in the db error itself.
            sqlx::Error::Database(db) => StoreError::new(db.message()),
            other => StoreError::new(other.to_string()),
        }
    }
}

/// Where submitted requirements end up.
#[allow(async_fn_in_trait)]
pub trait RequirementsStore {
    /// Insert one row into `user_requirements` and return it.
    async fn insert_requirements(
        &self,
        record: &SubmissionRecord,
    ) -> Result<SavedRequirements, StoreError>;

    /// Most recent row for `user_id`, if any.
    async fn latest_for_user(&self, user_id: &str) -> Result<Option<SavedRequirements>, StoreError>;

    /// Row count of `profiles`. Used as a connectivity check.
    async fn count_profiles(&self) -> Result<i64, StoreError>;
}

const RETURNING_COLUMNS: &str = "\
    id, user_id, niche, location, comments, dms, max_following, \
    hashtags, account_targets, created_at::text AS created_at";

/// Postgres-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl RequirementsStore for PgStore {
    async fn insert_requirements(
        &self,
        record: &SubmissionRecord,
    ) -> Result<SavedRequirements, StoreError> {
        let sql = format!(
            "INSERT INTO user_requirements \
                (user_id, niche, location, comments, dms, max_following, hashtags, account_targets) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {RETURNING_COLUMNS}"
        );
        let row = sqlx::query_as::<_, SavedRequirements>(&sql)
            .bind(&record.user_id)
            .bind(&record.niche)
            .bind(&record.location)
            .bind(&record.comments)
            .bind(&record.dms)
            .bind(record.max_following)
            .bind(&record.hashtags)
            .bind(&record.account_targets)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn latest_for_user(&self, user_id: &str) -> Result<Option<SavedRequirements>, StoreError> {
        let sql = format!(
            "SELECT {RETURNING_COLUMNS} FROM user_requirements \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT 1"
        );
        let row = sqlx::query_as::<_, SavedRequirements>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn count_profiles(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profiles")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_backend_message() {
        let err = StoreError::new("duplicate key value violates unique constraint");
        assert_eq!(
            err.to_string(),
            "Store error: duplicate key value violates unique constraint"
        );
        assert_eq!(StoreError::silent().to_string(), "Store error");
    }

    #[test]
    fn sqlx_errors_keep_their_text() {
        let err: StoreError = sqlx::Error::RowNotFound.into();
        assert!(err.message.is_some_and(|m| !m.is_empty()));
    }
}
