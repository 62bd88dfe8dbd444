//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Borrows the pool; every operation acquires and releases its own
//!   connection
//! - Multi-statement writes go through the unit of work (all-or-nothing)
//! - List operations use JOINs (no N+1)

pub mod applicants;
pub mod enrollment;

pub use applicants::{ApplicantRepo, NO_MAX_ID};
pub use enrollment::EnrollmentRepo;
