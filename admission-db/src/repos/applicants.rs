//! Applicant repository
//!
//! Maps the applicant aggregate onto its three physical rows. Writes touch
//! all three tables in one unit of work, ordered so foreign-key constraints
//! are never violated: inserts add the anchor (account) row first, deletes
//! remove the dependents (certificate, faculty registration) first.
//!
//! Reads bypass the unit of work - a single JOIN query is atomic by itself.

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use admission_core::Applicant;

use crate::error::{DbError, DbResult};
use crate::unit_of_work::{Statement, UnitOfWork};

/// Sentinel returned by [`ApplicantRepo::max_id`] when no applicant row
/// exists. Outside the valid id domain; callers must check for it.
pub const NO_MAX_ID: i32 = -1;

const SELECT_ALL: &str = r#"
SELECT app_user.*,
       rf.faculty_id,
       uc.average_score,
       uc.russian_score,
       uc.math_score,
       uc.physics_score
FROM app_user
         JOIN registered_faculty rf ON app_user.id = rf.user_id
         JOIN user_certificate uc ON app_user.id = uc.user_id
"#;

const SELECT_BY_ID: &str = r#"
SELECT app_user.*,
       rf.faculty_id,
       uc.average_score,
       uc.russian_score,
       uc.math_score,
       uc.physics_score
FROM app_user
         JOIN registered_faculty rf ON app_user.id = rf.user_id
         JOIN user_certificate uc ON app_user.id = uc.user_id
WHERE id = $1
"#;

const SELECT_MAX_ID: &str = "SELECT MAX(id) FROM app_user";

const INSERT_ACCOUNT: &str = "INSERT INTO app_user (id, login, password, firstname, lastname, email, role_id, status_id) VALUES ($1,$2,$3,$4,$5,$6,$7,$8)";

const INSERT_CERTIFICATE: &str = "INSERT INTO user_certificate (average_score, russian_score, math_score, physics_score, user_id) VALUES ($1,$2,$3,$4,$5)";

const INSERT_FACULTY: &str = "INSERT INTO registered_faculty (user_id, faculty_id) VALUES ($1,$2)";

const UPDATE_ACCOUNT: &str = "UPDATE app_user SET login = $1, password = $2, firstname = $3, lastname = $4, email = $5, role_id = $6, status_id = $7 WHERE id = $8";

const UPDATE_CERTIFICATE: &str = "UPDATE user_certificate SET average_score = $1, russian_score = $2, math_score = $3, physics_score = $4 WHERE user_id = $5";

const UPDATE_FACULTY: &str = "UPDATE registered_faculty SET faculty_id = $1 WHERE user_id = $2";

const DELETE_ACCOUNT_BY_ID: &str = "DELETE FROM app_user WHERE id = $1";

const DELETE_CERTIFICATE_BY_ID: &str = "DELETE FROM user_certificate WHERE user_id = $1";

const DELETE_FACULTY_BY_ID: &str = "DELETE FROM registered_faculty WHERE user_id = $1";

const DELETE_ALL_ACCOUNTS: &str = "DELETE FROM app_user";

const DELETE_ALL_CERTIFICATES: &str = "DELETE FROM user_certificate";

const DELETE_ALL_FACULTIES: &str = "DELETE FROM registered_faculty";

/// Pure mapping from a joined row to the aggregate.
fn applicant_from_row(row: &PgRow) -> Applicant {
    Applicant {
        id: row.get("id"),
        login: row.get("login"),
        password: row.get("password"),
        first_name: row.get("firstname"),
        last_name: row.get("lastname"),
        email: row.get("email"),
        role_id: row.get("role_id"),
        status_id: row.get("status_id"),
        average_score: row.get("average_score"),
        russian_score: row.get("russian_score"),
        math_score: row.get("math_score"),
        physics_score: row.get("physics_score"),
        faculty_id: row.get("faculty_id"),
    }
}

/// Applicant repository
pub struct ApplicantRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ApplicantRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every applicant, joined across the three tables.
    pub async fn select_all(&self) -> DbResult<Vec<Applicant>> {
        let mut conn = self.pool.acquire().await.map_err(DbError::Acquire)?;
        let rows = sqlx::query(SELECT_ALL)
            .fetch_all(&mut *conn)
            .await
            .map_err(DbError::Statement)?;

        Ok(rows.iter().map(applicant_from_row).collect())
    }

    /// Fetch one applicant by id.
    ///
    /// `None` is the documented absent marker; a missing id is never a
    /// zero-valued entity.
    pub async fn select_by_id(&self, id: i32) -> DbResult<Option<Applicant>> {
        let mut conn = self.pool.acquire().await.map_err(DbError::Acquire)?;
        let row = sqlx::query(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(DbError::Statement)?;

        Ok(row.as_ref().map(applicant_from_row))
    }

    /// Highest assigned applicant id, or [`NO_MAX_ID`] when the table is
    /// empty.
    pub async fn max_id(&self) -> DbResult<i32> {
        let mut conn = self.pool.acquire().await.map_err(DbError::Acquire)?;
        let row = sqlx::query(SELECT_MAX_ID)
            .fetch_one(&mut *conn)
            .await
            .map_err(DbError::Statement)?;

        // MAX over an empty table is NULL
        let max: Option<i32> = row.get(0);
        Ok(max.unwrap_or(NO_MAX_ID))
    }

    /// Insert the applicant's three rows atomically, anchor row first.
    ///
    /// The id must already be assigned by the caller. A statement failure
    /// rolls back every row and is surfaced to the caller.
    pub async fn insert(&self, applicant: &Applicant) -> DbResult<()> {
        UnitOfWork::run(
            self.pool,
            &[
                account_statement(INSERT_ACCOUNT, applicant, AccountIdPosition::First),
                certificate_statement(INSERT_CERTIFICATE, applicant),
                Statement::new(INSERT_FACULTY)
                    .bind_int(applicant.id)
                    .bind_int(applicant.faculty_id),
            ],
        )
        .await?;

        tracing::info!(id = applicant.id, "applicant inserted");
        Ok(())
    }

    /// Update all three rows atomically, matched by id. Values only; the
    /// id itself never changes.
    pub async fn update(&self, applicant: &Applicant) -> DbResult<()> {
        UnitOfWork::run(
            self.pool,
            &[
                account_statement(UPDATE_ACCOUNT, applicant, AccountIdPosition::Last),
                certificate_statement(UPDATE_CERTIFICATE, applicant),
                Statement::new(UPDATE_FACULTY)
                    .bind_int(applicant.faculty_id)
                    .bind_int(applicant.id),
            ],
        )
        .await?;

        tracing::info!(id = applicant.id, "applicant updated");
        Ok(())
    }

    /// Delete the applicant's three rows atomically, dependents first.
    pub async fn remove_by_id(&self, id: i32) -> DbResult<()> {
        UnitOfWork::run(
            self.pool,
            &[
                Statement::new(DELETE_CERTIFICATE_BY_ID).bind_int(id),
                Statement::new(DELETE_FACULTY_BY_ID).bind_int(id),
                Statement::new(DELETE_ACCOUNT_BY_ID).bind_int(id),
            ],
        )
        .await?;

        tracing::info!(id, "applicant removed");
        Ok(())
    }

    /// Delete every row in all three tables atomically, dependents first.
    ///
    /// Deleting from an already-empty table is not an error, so a second
    /// call is a no-op that still succeeds.
    pub async fn remove_all(&self) -> DbResult<()> {
        UnitOfWork::run(
            self.pool,
            &[
                Statement::new(DELETE_ALL_CERTIFICATES),
                Statement::new(DELETE_ALL_FACULTIES),
                Statement::new(DELETE_ALL_ACCOUNTS),
            ],
        )
        .await?;

        tracing::info!("all applicants removed");
        Ok(())
    }
}

/// Where the id parameter sits in an account statement: first for INSERT,
/// last (the WHERE clause) for UPDATE.
enum AccountIdPosition {
    First,
    Last,
}

fn account_statement(
    sql: &'static str,
    applicant: &Applicant,
    id_position: AccountIdPosition,
) -> Statement {
    let mut statement = Statement::new(sql);
    if matches!(id_position, AccountIdPosition::First) {
        statement = statement.bind_int(applicant.id);
    }
    statement = statement
        .bind_text(applicant.login.clone())
        .bind_text(applicant.password.clone())
        .bind_text(applicant.first_name.clone())
        .bind_text(applicant.last_name.clone())
        .bind_text(applicant.email.clone())
        .bind_int(applicant.role_id)
        .bind_int(applicant.status_id);
    if matches!(id_position, AccountIdPosition::Last) {
        statement = statement.bind_int(applicant.id);
    }
    statement
}

fn certificate_statement(sql: &'static str, applicant: &Applicant) -> Statement {
    Statement::new(sql)
        .bind_int(applicant.average_score)
        .bind_int(applicant.russian_score)
        .bind_int(applicant.math_score)
        .bind_int(applicant.physics_score)
        .bind_int(applicant.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations;

    fn sample(id: i32) -> Applicant {
        Applicant {
            id,
            login: "a".to_owned(),
            password: "secret".to_owned(),
            first_name: "Ivan".to_owned(),
            last_name: "Petrov".to_owned(),
            email: "ivan@example.com".to_owned(),
            role_id: 2,
            status_id: 1,
            average_score: 80,
            russian_score: 70,
            math_score: 90,
            physics_score: 75,
            faculty_id: 3,
        }
    }

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
    async fn insert_select_remove_round_trip() {
        let pool = test_pool().await;
        let repo = ApplicantRepo::new(&pool);

        let applicant = sample(7);
        repo.remove_by_id(7).await.expect("clean slate");
        repo.insert(&applicant).await.expect("insert");

        let found = repo
            .select_by_id(7)
            .await
            .expect("select")
            .expect("applicant present");
        assert_eq!(found, applicant);

        repo.remove_by_id(7).await.expect("remove");
        let gone = repo.select_by_id(7).await.expect("select after remove");
        assert_eq!(gone, None);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn select_missing_id_returns_none() {
        let pool = test_pool().await;
        let repo = ApplicantRepo::new(&pool);

        let found = repo.select_by_id(-424242).await.expect("select");
        assert_eq!(found, None);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn duplicate_insert_leaves_no_partial_rows() {
        let pool = test_pool().await;
        let repo = ApplicantRepo::new(&pool);

        let applicant = sample(11);
        repo.remove_by_id(11).await.expect("clean slate");
        repo.insert(&applicant).await.expect("first insert");

        // Second insert fails on the first statement (PK violation); the
        // original rows must be untouched and no extra dependent rows
        // may appear
        let result = repo.insert(&applicant).await;
        assert!(matches!(result, Err(DbError::Statement(_))));

        let (certs,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM user_certificate WHERE user_id = $1")
                .bind(11)
                .fetch_one(&pool)
                .await
                .expect("count certificates");
        assert_eq!(certs, 1);

        repo.remove_by_id(11).await.expect("cleanup");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_changes_all_three_rows() {
        let pool = test_pool().await;
        let repo = ApplicantRepo::new(&pool);

        let mut applicant = sample(13);
        repo.remove_by_id(13).await.expect("clean slate");
        repo.insert(&applicant).await.expect("insert");

        applicant.email = "new@example.com".to_owned();
        applicant.math_score = 95;
        applicant.faculty_id = 5;
        repo.update(&applicant).await.expect("update");

        let found = repo
            .select_by_id(13)
            .await
            .expect("select")
            .expect("applicant present");
        assert_eq!(found, applicant);

        repo.remove_by_id(13).await.expect("cleanup");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn remove_all_is_idempotent_and_max_id_returns_sentinel() {
        let pool = test_pool().await;
        let repo = ApplicantRepo::new(&pool);

        repo.insert(&sample(17)).await.ok();
        repo.remove_all().await.expect("first remove_all");
        repo.remove_all().await.expect("second remove_all");

        assert_eq!(repo.select_all().await.expect("select all"), vec![]);
        assert_eq!(repo.max_id().await.expect("max id"), NO_MAX_ID);
    }
}
