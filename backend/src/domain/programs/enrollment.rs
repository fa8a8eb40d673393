//! Enrollment records and the outcome of an atomic join attempt.

use chrono::{DateTime, Utc};

use crate::domain::{EnrollmentId, ProgramId, UserId};

use super::Capacity;

/// A mentee's membership in a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    id: EnrollmentId,
    program_id: ProgramId,
    mentee_id: UserId,
    created_at: DateTime<Utc>,
}

impl Enrollment {
    pub fn new(
        id: EnrollmentId,
        program_id: ProgramId,
        mentee_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            program_id,
            mentee_id,
            created_at,
        }
    }

    pub fn id(&self) -> EnrollmentId {
        self.id
    }

    pub fn program_id(&self) -> ProgramId {
        self.program_id
    }

    pub fn mentee_id(&self) -> UserId {
        self.mentee_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Result of the guarded count-then-insert step.
///
/// Business rejections are values rather than errors so the caller can pick
/// the matching notification before mapping them to a domain error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrollmentOutcome {
    /// The enrollment row was written.
    Enrolled(Enrollment),
    /// The program does not exist or is inactive.
    ProgramUnavailable,
    /// The program already holds `capacity` enrollments.
    ProgramFull {
        capacity: Capacity,
        joined_count: u32,
    },
    /// The mentee already holds an enrollment in the program.
    AlreadyJoined,
}
