//! Mentorship program service.
//!
//! Implements the program driving ports: creation with mentor resolution,
//! capacity-bounded joining, and annotated listings. Join outcomes emit a
//! notification on a detached task; dispatch failures are logged and never
//! reach the caller.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    AccountDirectory, AccountDirectoryError, AdminProgramPayload, CreateProgramRequest,
    EnrollmentPayload, GetProgramRequest, JoinProgramRequest, ListProgramsRequest,
    NotificationPayload, NotificationSink, NotificationSinkError, ProgramCommand, ProgramPayload,
    ProgramQuery, ProgramRepository, ProgramRepositoryError,
};
use crate::domain::{
    Enrollment, EnrollmentId, EnrollmentOutcome, Error, NotificationDraft, ProfileId, Program,
    ProgramDraft, ProgramId, ProgramValidationError, TraceId, UserId,
};

const PROGRAM_UNAVAILABLE: &str = "program not found or inactive";

fn map_repository_error(error: ProgramRepositoryError) -> Error {
    match error {
        ProgramRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("program repository unavailable: {message}"))
        }
        ProgramRepositoryError::Query { message } => {
            Error::internal(format!("program repository error: {message}"))
        }
    }
}

fn map_directory_error(error: AccountDirectoryError) -> Error {
    match error {
        AccountDirectoryError::Connection { message } => {
            Error::service_unavailable(format!("account directory unavailable: {message}"))
        }
        AccountDirectoryError::Query { message } => {
            Error::internal(format!("account directory error: {message}"))
        }
    }
}

fn map_notification_error(error: NotificationSinkError) -> Error {
    match error {
        NotificationSinkError::Connection { message } => {
            Error::service_unavailable(format!("notification store unavailable: {message}"))
        }
        NotificationSinkError::Query { message } => {
            Error::internal(format!("notification store error: {message}"))
        }
    }
}

fn map_validation_error(error: ProgramValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": error.field(),
        "code": "invalid_program",
    }))
}

fn program_unavailable(program_id: ProgramId) -> Error {
    Error::not_found(PROGRAM_UNAVAILABLE).with_details(json!({
        "programId": program_id.to_string(),
    }))
}

/// Service implementing [`ProgramCommand`] and [`ProgramQuery`].
pub struct ProgramService<R, A, N> {
    programs: Arc<R>,
    accounts: Arc<A>,
    notifications: Arc<N>,
    clock: Arc<dyn Clock>,
}

impl<R, A, N> Clone for ProgramService<R, A, N> {
    fn clone(&self) -> Self {
        Self {
            programs: Arc::clone(&self.programs),
            accounts: Arc::clone(&self.accounts),
            notifications: Arc::clone(&self.notifications),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, A, N> ProgramService<R, A, N> {
    /// Create a service over the given adapters.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// # use mentorship::domain::ProgramService;
    /// # use mentorship::domain::ports::{
    /// #     FixtureAccountDirectory, FixtureNotificationSink, FixtureProgramRepository,
    /// # };
    /// let service = ProgramService::new(
    ///     Arc::new(FixtureProgramRepository),
    ///     Arc::new(FixtureAccountDirectory),
    ///     Arc::new(FixtureNotificationSink),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(
        programs: Arc<R>,
        accounts: Arc<A>,
        notifications: Arc<N>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            programs,
            accounts,
            notifications,
            clock,
        }
    }
}

impl<R, A, N> ProgramService<R, A, N>
where
    R: ProgramRepository,
    A: AccountDirectory,
    N: NotificationSink + 'static,
{
    /// Resolve a caller-supplied identity to an account.
    ///
    /// The identifier is tried as an account id first; if no account
    /// matches it is tried once as a profile id.
    async fn resolve_account(&self, raw: UserId, role: &'static str) -> Result<UserId, Error> {
        if let Some(account) = self
            .accounts
            .find_account(raw)
            .await
            .map_err(map_directory_error)?
        {
            return Ok(account.id);
        }

        self.accounts
            .resolve_profile(ProfileId::from(raw))
            .await
            .map_err(map_directory_error)?
            .ok_or_else(|| {
                Error::not_found(format!("{role} {raw} not found")).with_details(json!({
                    "field": format!("{role}Id"),
                    "value": raw.to_string(),
                }))
            })
    }

    fn dispatch(&self, draft: NotificationDraft) {
        let sink = Arc::clone(&self.notifications);
        tokio::spawn(TraceId::propagate(async move {
            if let Err(error) = sink.notify(&draft).await {
                warn!(
                    user_id = %draft.user_id,
                    category = draft.category.as_str(),
                    %error,
                    "failed to record notification"
                );
            }
        }));
    }
}

#[async_trait]
impl<R, A, N> ProgramCommand for ProgramService<R, A, N>
where
    R: ProgramRepository,
    A: AccountDirectory,
    N: NotificationSink + 'static,
{
    async fn create_program(
        &self,
        request: CreateProgramRequest,
    ) -> Result<ProgramPayload, Error> {
        let draft = ProgramDraft {
            id: ProgramId::random(),
            mentor_id: request.mentor_id,
            subject: request.subject,
            description: request.description,
            community_link: request.community_link,
            capacity: request.capacity,
            active: true,
            created_at: self.clock.utc(),
        };
        let program = Program::new(draft).map_err(map_validation_error)?;
        let mentor_id = self.resolve_account(request.mentor_id, "mentor").await?;
        let program = program.with_mentor(mentor_id);

        self.programs
            .create(&program)
            .await
            .map_err(map_repository_error)?;

        info!(
            program_id = %program.id(),
            mentor_id = %program.mentor_id(),
            capacity = program.capacity().get(),
            "program created"
        );
        Ok(program.into())
    }

    async fn join_program(
        &self,
        request: JoinProgramRequest,
    ) -> Result<EnrollmentPayload, Error> {
        let listing = self
            .programs
            .find_with_count(request.program_id, None)
            .await
            .map_err(map_repository_error)?
            .filter(|listing| listing.program.is_active())
            .ok_or_else(|| program_unavailable(request.program_id))?;
        let subject = listing.program.subject().as_ref().to_owned();

        let mentee_id = self.resolve_account(request.mentee_id, "mentee").await?;
        let enrollment = Enrollment::new(
            EnrollmentId::random(),
            request.program_id,
            mentee_id,
            self.clock.utc(),
        );

        let outcome = self
            .programs
            .enroll(&enrollment)
            .await
            .map_err(map_repository_error)?;

        match outcome {
            EnrollmentOutcome::Enrolled(enrollment) => {
                info!(
                    program_id = %enrollment.program_id(),
                    mentee_id = %enrollment.mentee_id(),
                    "mentee joined program"
                );
                self.dispatch(NotificationDraft::joined(mentee_id, &subject));
                Ok(enrollment.into())
            }
            EnrollmentOutcome::ProgramFull {
                capacity,
                joined_count,
            } => {
                info!(
                    program_id = %request.program_id,
                    %mentee_id,
                    capacity = capacity.get(),
                    joined_count,
                    "join rejected: program full"
                );
                self.dispatch(NotificationDraft::full(mentee_id, &subject));
                Err(Error::program_full("program is full").with_details(json!({
                    "programId": request.program_id.to_string(),
                    "capacity": capacity.get(),
                    "joinedCount": joined_count,
                })))
            }
            EnrollmentOutcome::AlreadyJoined => {
                info!(
                    program_id = %request.program_id,
                    %mentee_id,
                    "join rejected: already enrolled"
                );
                self.dispatch(NotificationDraft::already_joined(mentee_id, &subject));
                Err(
                    Error::already_joined("already joined this program").with_details(json!({
                        "programId": request.program_id.to_string(),
                    })),
                )
            }
            EnrollmentOutcome::ProgramUnavailable => Err(program_unavailable(request.program_id)),
        }
    }
}

#[async_trait]
impl<R, A, N> ProgramQuery for ProgramService<R, A, N>
where
    R: ProgramRepository,
    A: AccountDirectory,
    N: NotificationSink + 'static,
{
    async fn list_programs(
        &self,
        request: ListProgramsRequest,
    ) -> Result<Vec<ProgramPayload>, Error> {
        let listings = self
            .programs
            .list_with_counts(request.viewer_id)
            .await
            .map_err(map_repository_error)?;
        Ok(listings.into_iter().map(Into::into).collect())
    }

    async fn get_program(&self, request: GetProgramRequest) -> Result<ProgramPayload, Error> {
        self.programs
            .find_with_count(request.program_id, request.viewer_id)
            .await
            .map_err(map_repository_error)?
            .map(Into::into)
            .ok_or_else(|| Error::not_found(format!("program {} not found", request.program_id)))
    }

    async fn admin_list_programs(&self) -> Result<Vec<AdminProgramPayload>, Error> {
        let listings = self
            .programs
            .admin_list()
            .await
            .map_err(map_repository_error)?;
        Ok(listings.into_iter().map(Into::into).collect())
    }

    async fn list_notifications(
        &self,
        user_id: UserId,
    ) -> Result<Vec<NotificationPayload>, Error> {
        let notifications = self
            .notifications
            .list_for_user(user_id)
            .await
            .map_err(map_notification_error)?;
        Ok(notifications.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
#[path = "program_service_tests.rs"]
mod tests;
