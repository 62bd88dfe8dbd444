//! admission-core: entity model and shared services for the admission
//! persistence layer.
//!
//! Holds everything the database layer consumes but that does not itself
//! touch the database: the applicant aggregate, faculty eligibility
//! predicates, configuration loading, and the construct-once registry.

pub mod applicant;
pub mod config;
pub mod error;
pub mod registry;
pub mod validator;

pub use applicant::{Applicant, Faculty};
pub use config::{AdmissionConfig, DatabaseConfig};
pub use error::{AdmissionError, Result};
pub use registry::Singleton;
pub use validator::FacultyValidator;
