use serde::{Deserialize, Serialize};

/// The applicant aggregate: one logical entity spread across three
/// write-coupled database rows (account, exam certificate, faculty
/// registration) sharing the same id.
///
/// The id is assigned by the caller before insert and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applicant {
    pub id: i32,

    // Account row
    pub login: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role_id: i32,
    pub status_id: i32,

    // Certificate row
    pub average_score: i32,
    pub russian_score: i32,
    pub math_score: i32,
    pub physics_score: i32,

    // Faculty-registration row
    pub faculty_id: i32,
}

impl Applicant {
    /// Sum of the three subject exam scores.
    ///
    /// This is the summary value written to the enrolled list; it is
    /// derived, never stored on the applicant rows themselves.
    pub fn sum_exams(&self) -> i32 {
        self.russian_score + self.math_score + self.physics_score
    }
}

/// A faculty as seen by the eligibility validator: the declared
/// number of admission places is the only field the core inspects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faculty {
    pub id: i32,
    pub name: String,
    pub total_places: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Applicant {
        Applicant {
            id: 7,
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

    #[test]
    fn sum_exams_adds_subject_scores_only() {
        let applicant = sample();
        // average_score must not participate
        assert_eq!(applicant.sum_exams(), 70 + 90 + 75);
    }
}
