//! Schema bootstrap for the admission tables
//!
//! The schema is fixed: three write-coupled tables keyed by applicant id
//! (account anchor plus two dependents holding foreign keys to it) and one
//! independent enrollment-summary table with no foreign-key coupling.

use sqlx::PgPool;

use crate::error::{DbError, DbResult};

/// Create all admission tables if they do not exist.
///
/// Idempotent; safe to run at every process start.
pub async fn run(pool: &PgPool) -> DbResult<()> {
    tracing::info!("Running admission migrations...");

    // Anchor table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS app_user (
            id INT PRIMARY KEY,
            login TEXT NOT NULL,
            password TEXT NOT NULL,
            firstname TEXT NOT NULL,
            lastname TEXT NOT NULL,
            email TEXT NOT NULL,
            role_id INT NOT NULL,
            status_id INT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(DbError::Statement)?;

    // Dependent: exam-score certificate
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS user_certificate (
            average_score INT NOT NULL,
            russian_score INT NOT NULL,
            math_score INT NOT NULL,
            physics_score INT NOT NULL,
            user_id INT NOT NULL REFERENCES app_user(id)
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(DbError::Statement)?;

    // Dependent: faculty registration
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS registered_faculty (
            user_id INT NOT NULL REFERENCES app_user(id),
            faculty_id INT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(DbError::Statement)?;

    // Independent: enrollment summary, same id space but no FK coupling
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS user_enrolled (
            user_id INT NOT NULL,
            sum_score INT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(DbError::Statement)?;

    tracing::info!("Admission migrations complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn migrations_are_idempotent() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::pool::create_pool(&url).await.expect("pool");

        run(&pool).await.expect("first run");
        run(&pool).await.expect("second run");
    }
}
