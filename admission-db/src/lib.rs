//! admission-db: the database layer of the admission application.
//!
//! # Design Principles
//!
//! - Connection pool with explicit limits - no `Arc<Mutex<Connection>>`
//! - Every operation acquires its own connection and releases it on every
//!   exit path (scoped acquisition via RAII)
//! - Multi-statement writes go through [`unit_of_work::UnitOfWork`] -
//!   all-or-nothing
//! - Single-statement reads and writes run directly against the pool - a
//!   lone statement is atomic by itself

pub mod database;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repos;
pub mod unit_of_work;

pub use database::Database;
pub use error::{DbError, DbResult};
pub use pool::{create_pool, create_pool_from_config, create_pool_with_options};
pub use repos::{ApplicantRepo, EnrollmentRepo, NO_MAX_ID};
pub use unit_of_work::{Param, Statement, UnitOfWork};
