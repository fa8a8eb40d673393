//! Mentorship program and enrollment domain types.
//!
//! A program is a mentor-owned cohort with a fixed capacity and a single
//! external community link. Enrollments record a mentee's membership; at most
//! one exists per (program, mentee) pair and the number of enrollments for a
//! program never exceeds its capacity.

use std::fmt;

mod enrollment;
mod listing;
mod program;
mod validation;

pub use enrollment::{Enrollment, EnrollmentOutcome};
pub use listing::{AdminProgramListing, ProgramListing};
pub use program::{
    COMMUNITY_LINK_MAX, Capacity, CommunityLink, DESCRIPTION_MAX, Program, ProgramDraft,
    SUBJECT_MAX, Subject,
};

/// Validation errors raised by program constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramValidationError {
    EmptySubject,
    SubjectTooLong { max: usize },
    DescriptionTooLong { max: usize },
    EmptyCommunityLink,
    CommunityLinkTooLong { max: usize },
    InvalidCommunityLink,
    NonPositiveCapacity { value: i64 },
    CapacityTooLarge { max: u32 },
}

impl ProgramValidationError {
    /// Request field the error refers to, in wire (camelCase) form.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptySubject | Self::SubjectTooLong { .. } => "subject",
            Self::DescriptionTooLong { .. } => "description",
            Self::EmptyCommunityLink
            | Self::CommunityLinkTooLong { .. }
            | Self::InvalidCommunityLink => "communityLink",
            Self::NonPositiveCapacity { .. } | Self::CapacityTooLarge { .. } => "capacity",
        }
    }
}

impl fmt::Display for ProgramValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySubject => write!(f, "program subject must not be empty"),
            Self::SubjectTooLong { max } => {
                write!(f, "program subject must be at most {max} characters")
            }
            Self::DescriptionTooLong { max } => {
                write!(f, "program description must be at most {max} characters")
            }
            Self::EmptyCommunityLink => write!(f, "community link must not be empty"),
            Self::CommunityLinkTooLong { max } => {
                write!(f, "community link must be at most {max} characters")
            }
            Self::InvalidCommunityLink => {
                write!(f, "community link must be an absolute http or https URL")
            }
            Self::NonPositiveCapacity { value } => {
                write!(f, "program capacity must be a positive integer (got {value})")
            }
            Self::CapacityTooLarge { max } => {
                write!(f, "program capacity must be at most {max}")
            }
        }
    }
}

impl std::error::Error for ProgramValidationError {}
