//! Transactional unit of work
//!
//! Runs an ordered sequence of parameterized statements against one pooled
//! connection as a single atomic unit: either every statement's effect is
//! committed, or none is.
//!
//! Resource discipline is enforced by ownership rather than convention:
//! the pooled connection returns to the pool when it drops, and the
//! transaction guard rolls back when it drops uncommitted, so every exit
//! path - statement failure, rollback failure, panic - releases both.

use sqlx::{Connection, PgPool};

use crate::error::{DbError, DbResult};

/// A positional bind value for a statement template.
#[derive(Debug, Clone)]
pub enum Param {
    Int(i32),
    Text(String),
}

/// One parameterized SQL statement: a fixed template plus its ordered
/// bind values.
#[derive(Debug, Clone)]
pub struct Statement {
    sql: &'static str,
    params: Vec<Param>,
}

impl Statement {
    pub fn new(sql: &'static str) -> Self {
        Self {
            sql,
            params: Vec::new(),
        }
    }

    pub fn bind_int(mut self, value: i32) -> Self {
        self.params.push(Param::Int(value));
        self
    }

    pub fn bind_text(mut self, value: impl Into<String>) -> Self {
        self.params.push(Param::Text(value.into()));
        self
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }
}

/// Executes ordered statements with commit-or-rollback-all semantics.
pub struct UnitOfWork;

impl UnitOfWork {
    /// Run `statements` in order inside one transaction.
    ///
    /// Acquires a single connection from `pool`, begins an explicit
    /// transaction, executes each statement for its side effect, and
    /// commits once all succeed. The first statement failure abandons the
    /// unit of work: an explicit rollback is issued, and if the rollback
    /// itself fails that is logged without masking the original error.
    ///
    /// No statement is retried; transient-failure classification is not
    /// available at this layer.
    pub async fn run(pool: &PgPool, statements: &[Statement]) -> DbResult<()> {
        let mut conn = pool.acquire().await.map_err(DbError::Acquire)?;
        let mut tx = conn.begin().await.map_err(DbError::Statement)?;

        for statement in statements {
            let mut query = sqlx::query(statement.sql);
            for param in &statement.params {
                query = match param {
                    Param::Int(value) => query.bind(*value),
                    Param::Text(value) => query.bind(value.as_str()),
                };
            }

            if let Err(err) = query.execute(&mut *tx).await {
                tracing::error!(sql = statement.sql, error = %err, "statement failed, rolling back");
                if let Err(rollback_err) = tx.rollback().await {
                    // Secondary failure; the unit of work is already failed
                    tracing::error!(error = %rollback_err, "rollback failed");
                }
                return Err(DbError::Statement(err));
            }
        }

        tx.commit().await.map_err(DbError::Commit)?;
        Ok(())
    }
}
