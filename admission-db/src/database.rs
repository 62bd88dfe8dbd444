//! Process-wide database handle
//!
//! Owns the connection pool and hands out repositories. A composition root
//! constructs one [`Database`] at startup and either passes references down
//! or registers it as the process-wide instance via [`Database::init`];
//! both lifecycles end only at process exit.

use sqlx::PgPool;

use admission_core::{DatabaseConfig, Singleton};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::pool;
use crate::repos::{ApplicantRepo, EnrollmentRepo};

static GLOBAL: Singleton<Database> = Singleton::new();

/// Shared database handle
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect from config and bootstrap the schema.
    pub async fn connect(config: &DatabaseConfig) -> DbResult<Self> {
        let pool = pool::create_pool_from_config(config)
            .await
            .map_err(DbError::Acquire)?;
        migrations::run(&pool).await?;
        Ok(Self::new(pool))
    }

    /// Register this handle as the process-wide instance.
    ///
    /// Returns the handle back if another one was registered first.
    pub fn init(self) -> Result<(), Database> {
        GLOBAL.set(self)
    }

    /// The process-wide instance, if one has been registered.
    pub fn global() -> Option<&'static Database> {
        GLOBAL.get()
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn applicants(&self) -> ApplicantRepo<'_> {
        ApplicantRepo::new(&self.pool)
    }

    pub fn enrollment(&self) -> EnrollmentRepo<'_> {
        EnrollmentRepo::new(&self.pool)
    }
}
