//! Driving port for program and notification reads.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    AdminProgramListing, Error, MentorSummary, Notification, NotificationCategory,
    NotificationId, ProgramId, UserId,
};

use super::ProgramPayload;

/// Mentor summary attached to oversight rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorPayload {
    pub id: UserId,
    pub display_name: String,
    pub email: String,
}

impl From<MentorSummary> for MentorPayload {
    fn from(value: MentorSummary) -> Self {
        Self {
            id: value.id,
            display_name: value.display_name,
            email: value.email,
        }
    }
}

/// Oversight row for administrators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProgramPayload {
    pub program: ProgramPayload,
    pub mentor: MentorPayload,
}

impl From<AdminProgramListing> for AdminProgramPayload {
    fn from(value: AdminProgramListing) -> Self {
        let AdminProgramListing {
            program,
            mentor,
            joined_count,
        } = value;
        let mut program = ProgramPayload::from(program);
        program.joined_count = joined_count;
        Self {
            program,
            mentor: mentor.into(),
        }
    }
}

/// Serializable notification payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    pub id: NotificationId,
    pub title: String,
    pub message: String,
    pub category: NotificationCategory,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationPayload {
    fn from(value: Notification) -> Self {
        Self {
            id: value.id,
            title: value.title,
            message: value.message,
            category: value.category,
            read: value.read,
            created_at: value.created_at,
        }
    }
}

/// Request to list programs, optionally on behalf of a viewer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListProgramsRequest {
    pub viewer_id: Option<UserId>,
}

/// Request to fetch one program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetProgramRequest {
    pub program_id: ProgramId,
    pub viewer_id: Option<UserId>,
}

/// Driving port for read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgramQuery: Send + Sync {
    /// Every program, newest first, with live counts.
    async fn list_programs(
        &self,
        request: ListProgramsRequest,
    ) -> Result<Vec<ProgramPayload>, Error>;

    /// One program with its live count; `not_found` when absent.
    async fn get_program(&self, request: GetProgramRequest) -> Result<ProgramPayload, Error>;

    /// Oversight listing across all programs regardless of the active flag.
    async fn admin_list_programs(&self) -> Result<Vec<AdminProgramPayload>, Error>;

    /// Notifications recorded for a user, newest first.
    async fn list_notifications(
        &self,
        user_id: UserId,
    ) -> Result<Vec<NotificationPayload>, Error>;
}

/// Fixture query implementation returning empty results.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProgramQuery;

#[async_trait]
impl ProgramQuery for FixtureProgramQuery {
    async fn list_programs(
        &self,
        _request: ListProgramsRequest,
    ) -> Result<Vec<ProgramPayload>, Error> {
        Ok(Vec::new())
    }

    async fn get_program(&self, request: GetProgramRequest) -> Result<ProgramPayload, Error> {
        Err(Error::not_found(format!(
            "program {} not found",
            request.program_id
        )))
    }

    async fn admin_list_programs(&self) -> Result<Vec<AdminProgramPayload>, Error> {
        Ok(Vec::new())
    }

    async fn list_notifications(
        &self,
        _user_id: UserId,
    ) -> Result<Vec<NotificationPayload>, Error> {
        Ok(Vec::new())
    }
}
