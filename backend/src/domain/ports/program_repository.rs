//! Port for program persistence and the guarded enrollment write.

use async_trait::async_trait;

use crate::domain::{
    AdminProgramListing, Enrollment, EnrollmentOutcome, Program, ProgramId, ProgramListing, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by program repository adapters.
    pub enum ProgramRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "program repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "program repository query failed: {message}",
    }
}

/// Port for writing programs and enrollments and reading annotated listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgramRepository: Send + Sync {
    /// Persist a newly created program.
    async fn create(&self, program: &Program) -> Result<(), ProgramRepositoryError>;

    /// Count enrollments and insert `enrollment` as one atomic unit.
    ///
    /// Implementations must serialise concurrent calls for the same program
    /// so the number of enrollments never exceeds the program's capacity.
    /// Existing membership is checked before capacity, so a member of a full
    /// program receives [`EnrollmentOutcome::AlreadyJoined`].
    async fn enroll(
        &self,
        enrollment: &Enrollment,
    ) -> Result<EnrollmentOutcome, ProgramRepositoryError>;

    /// List every program, newest first, with live counts.
    ///
    /// `joined_by_viewer` is `false` for every row when `viewer` is `None`.
    async fn list_with_counts(
        &self,
        viewer: Option<UserId>,
    ) -> Result<Vec<ProgramListing>, ProgramRepositoryError>;

    /// Fetch one program with its live count, regardless of the active flag.
    async fn find_with_count(
        &self,
        program_id: ProgramId,
        viewer: Option<UserId>,
    ) -> Result<Option<ProgramListing>, ProgramRepositoryError>;

    /// Oversight listing joining each program with its mentor's account.
    async fn admin_list(&self) -> Result<Vec<AdminProgramListing>, ProgramRepositoryError>;
}

/// Fixture implementation for tests that do not exercise program storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProgramRepository;

#[async_trait]
impl ProgramRepository for FixtureProgramRepository {
    async fn create(&self, _program: &Program) -> Result<(), ProgramRepositoryError> {
        Ok(())
    }

    async fn enroll(
        &self,
        _enrollment: &Enrollment,
    ) -> Result<EnrollmentOutcome, ProgramRepositoryError> {
        Ok(EnrollmentOutcome::ProgramUnavailable)
    }

    async fn list_with_counts(
        &self,
        _viewer: Option<UserId>,
    ) -> Result<Vec<ProgramListing>, ProgramRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_with_count(
        &self,
        _program_id: ProgramId,
        _viewer: Option<UserId>,
    ) -> Result<Option<ProgramListing>, ProgramRepositoryError> {
        Ok(None)
    }

    async fn admin_list(&self) -> Result<Vec<AdminProgramListing>, ProgramRepositoryError> {
        Ok(Vec::new())
    }
}
