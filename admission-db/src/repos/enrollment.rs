//! Enrolled-list repository
//!
//! The enrollment summary (applicant id -> summed exam score) lives in its
//! own table with no foreign-key coupling to the applicant tables. Every
//! operation here is a single statement, so none needs the unit of work.

use std::collections::HashMap;

use sqlx::{PgPool, Row};

use crate::error::{DbError, DbResult};

const INSERT_ENROLLED: &str = "INSERT INTO user_enrolled (user_id, sum_score) VALUES ($1,$2)";

const DELETE_ALL_ENROLLED: &str = "DELETE FROM user_enrolled";

const COUNT_ENROLLED: &str = "SELECT COUNT(*) FROM user_enrolled";

const SELECT_ALL_ENROLLED: &str = "SELECT user_id, sum_score FROM user_enrolled";

/// Enrolled-list repository
pub struct EnrollmentRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> EnrollmentRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record an applicant on the enrolled list with their summary score.
    pub async fn insert(&self, user_id: i32, sum_score: i32) -> DbResult<()> {
        let mut conn = self.pool.acquire().await.map_err(DbError::Acquire)?;
        sqlx::query(INSERT_ENROLLED)
            .bind(user_id)
            .bind(sum_score)
            .execute(&mut *conn)
            .await
            .map_err(DbError::Statement)?;

        tracing::info!(user_id, sum_score, "applicant enrolled");
        Ok(())
    }

    /// Clear the enrolled list.
    pub async fn clear(&self) -> DbResult<()> {
        let mut conn = self.pool.acquire().await.map_err(DbError::Acquire)?;
        sqlx::query(DELETE_ALL_ENROLLED)
            .execute(&mut *conn)
            .await
            .map_err(DbError::Statement)?;

        tracing::info!("enrolled list cleared");
        Ok(())
    }

    /// Number of enrolled applicants. Query failures are errors, never a
    /// count.
    pub async fn count(&self) -> DbResult<i64> {
        let mut conn = self.pool.acquire().await.map_err(DbError::Acquire)?;
        let row = sqlx::query(COUNT_ENROLLED)
            .fetch_one(&mut *conn)
            .await
            .map_err(DbError::Statement)?;

        Ok(row.get(0))
    }

    /// The whole enrolled list as id -> summary score.
    pub async fn select_all(&self) -> DbResult<HashMap<i32, i32>> {
        let mut conn = self.pool.acquire().await.map_err(DbError::Acquire)?;
        let rows = sqlx::query(SELECT_ALL_ENROLLED)
            .fetch_all(&mut *conn)
            .await
            .map_err(DbError::Statement)?;

        Ok(rows
            .into_iter()
            .map(|row| (row.get("user_id"), row.get("sum_score")))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations;

    async fn test_pool() -> PgPool {
        // Surface repo logging in test output; later calls are no-ops
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::pool::create_pool(&url).await.expect("pool");
        migrations::run(&pool).await.expect("migrations");
        pool
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn enrolled_list_round_trip() {
        let pool = test_pool().await;
        let repo = EnrollmentRepo::new(&pool);

        repo.clear().await.expect("clear");
        assert_eq!(repo.count().await.expect("count"), 0);

        repo.insert(7, 235).await.expect("insert 7");
        repo.insert(11, 241).await.expect("insert 11");

        assert_eq!(repo.count().await.expect("count"), 2);
        let all = repo.select_all().await.expect("select all");
        assert_eq!(all.get(&7), Some(&235));
        assert_eq!(all.get(&11), Some(&241));

        repo.clear().await.expect("clear again");
        assert_eq!(repo.count().await.expect("count after clear"), 0);
    }
}
