//! Driving port for program creation and joining.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Enrollment, EnrollmentId, Error, Program, ProgramDraft, ProgramId, ProgramListing, UserId,
};

/// Serializable program payload annotated with its live count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramPayload {
    pub id: ProgramId,
    pub mentor_id: UserId,
    pub subject: String,
    pub description: Option<String>,
    pub community_link: String,
    pub capacity: u32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub joined_count: u32,
    pub joined_by_viewer: bool,
}

impl From<ProgramListing> for ProgramPayload {
    fn from(value: ProgramListing) -> Self {
        let ProgramListing {
            program,
            joined_count,
            joined_by_viewer,
        } = value;
        Self {
            id: program.id(),
            mentor_id: program.mentor_id(),
            subject: program.subject().as_ref().to_owned(),
            description: program.description().map(str::to_owned),
            community_link: program.community_link().as_ref().to_owned(),
            capacity: program.capacity().get(),
            active: program.is_active(),
            created_at: program.created_at(),
            joined_count,
            joined_by_viewer,
        }
    }
}

impl From<Program> for ProgramPayload {
    fn from(value: Program) -> Self {
        ProgramListing {
            program: value,
            joined_count: 0,
            joined_by_viewer: false,
        }
        .into()
    }
}

/// Serializable enrollment payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentPayload {
    pub id: EnrollmentId,
    pub program_id: ProgramId,
    pub mentee_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl From<Enrollment> for EnrollmentPayload {
    fn from(value: Enrollment) -> Self {
        Self {
            id: value.id(),
            program_id: value.program_id(),
            mentee_id: value.mentee_id(),
            created_at: value.created_at(),
        }
    }
}

/// Request to create a program.
///
/// `mentor_id` may be either an account identifier or a profile identifier;
/// the service resolves it to an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProgramRequest {
    pub mentor_id: UserId,
    pub subject: String,
    pub description: Option<String>,
    pub community_link: String,
    pub capacity: i64,
}

/// Request to join a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinProgramRequest {
    pub program_id: ProgramId,
    pub mentee_id: UserId,
}

/// Driving port for program write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgramCommand: Send + Sync {
    /// Create an active program owned by the resolved mentor.
    ///
    /// Fails with `invalid_request` for malformed fields and `not_found`
    /// when the mentor identity does not resolve.
    async fn create_program(
        &self,
        request: CreateProgramRequest,
    ) -> Result<ProgramPayload, Error>;

    /// Enroll a mentee in a program.
    ///
    /// Fails with `not_found` for unknown or inactive programs and unknown
    /// mentees, `program_full` when the program is at capacity, and
    /// `already_joined` when the mentee is already enrolled.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use mentorship::domain::{ErrorCode, ProgramId, UserId};
    /// # use mentorship::domain::ports::{FixtureProgramCommand, JoinProgramRequest, ProgramCommand};
    /// # async fn example() {
    /// let command = FixtureProgramCommand;
    /// let err = command
    ///     .join_program(JoinProgramRequest {
    ///         program_id: ProgramId::random(),
    ///         mentee_id: UserId::random(),
    ///     })
    ///     .await
    ///     .expect_err("fixture knows no programs");
    /// assert_eq!(err.code(), ErrorCode::NotFound);
    /// # }
    /// ```
    async fn join_program(
        &self,
        request: JoinProgramRequest,
    ) -> Result<EnrollmentPayload, Error>;
}

/// Fixture command implementation for tests that do not need persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProgramCommand;

#[async_trait]
impl ProgramCommand for FixtureProgramCommand {
    async fn create_program(
        &self,
        request: CreateProgramRequest,
    ) -> Result<ProgramPayload, Error> {
        let program = Program::new(ProgramDraft {
            id: ProgramId::random(),
            mentor_id: request.mentor_id,
            subject: request.subject,
            description: request.description,
            community_link: request.community_link,
            capacity: request.capacity,
            active: true,
            created_at: Utc::now(),
        })
        .map_err(|err| Error::invalid_request(err.to_string()))?;
        Ok(program.into())
    }

    async fn join_program(
        &self,
        _request: JoinProgramRequest,
    ) -> Result<EnrollmentPayload, Error> {
        Err(Error::not_found("program not found or inactive"))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    fn request(capacity: i64) -> CreateProgramRequest {
        CreateProgramRequest {
            mentor_id: UserId::random(),
            subject: "Interview prep".to_owned(),
            description: None,
            community_link: "https://chat.example.org/prep".to_owned(),
            capacity,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_create_returns_empty_active_program() {
        let payload = FixtureProgramCommand
            .create_program(request(4))
            .await
            .expect("fixture create");
        assert!(payload.active);
        assert_eq!(payload.capacity, 4);
        assert_eq!(payload.joined_count, 0);
        assert!(!payload.joined_by_viewer);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_create_validates_capacity() {
        let err = FixtureProgramCommand
            .create_program(request(0))
            .await
            .expect_err("zero capacity");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    fn payload_serialises_in_camel_case() {
        let payload = ProgramPayload {
            id: ProgramId::random(),
            mentor_id: UserId::random(),
            subject: "Rust".to_owned(),
            description: None,
            community_link: "https://chat.example.org".to_owned(),
            capacity: 1,
            active: true,
            created_at: Utc::now(),
            joined_count: 0,
            joined_by_viewer: false,
        };
        let value = serde_json::to_value(&payload).expect("serialise payload");
        assert!(value.get("communityLink").is_some());
        assert!(value.get("joinedCount").is_some());
        assert_eq!(value["joinedByViewer"], serde_json::json!(false));
    }
}
