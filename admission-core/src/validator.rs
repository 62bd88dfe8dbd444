//! Faculty eligibility predicates.
//!
//! Pure functions over entity data; no I/O and no shared state beyond the
//! construct-once instance. Callers run these before persistence; they do
//! not participate in any transaction.

use crate::applicant::Faculty;
use crate::registry::Singleton;

/// Smallest admissible number of places a faculty may declare.
pub const MIN_FACULTY_PLACES: i32 = 1;

/// Largest admissible number of places a faculty may declare.
pub const MAX_FACULTY_PLACES: i32 = 500;

/// Lower-level capacity predicate: is a declared place count within the
/// allowed range?
pub fn places_within_limits(count: i32) -> bool {
    (MIN_FACULTY_PLACES..=MAX_FACULTY_PLACES).contains(&count)
}

/// Validates a faculty's declared capacity.
pub struct FacultyValidator;

static INSTANCE: Singleton<FacultyValidator> = Singleton::new();

impl FacultyValidator {
    /// Shared instance, constructed on first use.
    pub fn instance() -> &'static FacultyValidator {
        INSTANCE.get_or_init(|| FacultyValidator)
    }

    /// Whether the faculty declares a valid number of places.
    pub fn validate(&self, faculty: &Faculty) -> bool {
        places_within_limits(faculty.total_places)
    }
}
