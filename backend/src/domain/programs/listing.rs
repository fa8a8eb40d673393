//! Read models for program listings.

use crate::domain::MentorSummary;

use super::Program;

/// A program annotated with its live enrollment count.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramListing {
    pub program: Program,
    pub joined_count: u32,
    /// Always `false` when no viewer was supplied.
    pub joined_by_viewer: bool,
}

impl ProgramListing {
    /// Remaining places, saturating at zero.
    pub fn remaining(&self) -> u32 {
        self.program
            .capacity()
            .get()
            .saturating_sub(self.joined_count)
    }

    /// Whether the program has reached capacity.
    pub fn is_full(&self) -> bool {
        !self.program.capacity().has_room_for(self.joined_count)
    }
}

/// Oversight row: a program, its mentor, and its enrollment count.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminProgramListing {
    pub program: Program,
    pub mentor: MentorSummary,
    pub joined_count: u32,
}
