//! In-app notifications emitted as a side effect of join attempts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{NotificationId, UserId};

/// Closed set of notification categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    ProgramJoined,
    ProgramFull,
    ProgramAlreadyJoined,
}

impl NotificationCategory {
    /// Stable tag persisted in the `category` column.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ProgramJoined => "program_joined",
            Self::ProgramFull => "program_full",
            Self::ProgramAlreadyJoined => "program_already_joined",
        }
    }

    /// Fixed title shown for the category.
    pub const fn title(self) -> &'static str {
        match self {
            Self::ProgramJoined => "Program joined",
            Self::ProgramFull => "Program full",
            Self::ProgramAlreadyJoined => "Already joined",
        }
    }
}

impl std::str::FromStr for NotificationCategory {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "program_joined" => Ok(Self::ProgramJoined),
            "program_full" => Ok(Self::ProgramFull),
            "program_already_joined" => Ok(Self::ProgramAlreadyJoined),
            other => Err(UnknownCategory(other.to_owned())),
        }
    }
}

/// Raised when a stored category tag is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown notification category: {0}")]
pub struct UnknownCategory(pub String);

/// Notification to be recorded for a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
    pub user_id: UserId,
    pub category: NotificationCategory,
    pub message: String,
}

impl NotificationDraft {
    /// The mentee joined the named program.
    pub fn joined(user_id: UserId, subject: &str) -> Self {
        Self {
            user_id,
            category: NotificationCategory::ProgramJoined,
            message: format!("You joined \"{subject}\"."),
        }
    }

    /// The named program had no free places.
    pub fn full(user_id: UserId, subject: &str) -> Self {
        Self {
            user_id,
            category: NotificationCategory::ProgramFull,
            message: format!("\"{subject}\" is full."),
        }
    }

    /// The mentee already belongs to the named program.
    pub fn already_joined(user_id: UserId, subject: &str) -> Self {
        Self {
            user_id,
            category: NotificationCategory::ProgramAlreadyJoined,
            message: format!("You have already joined \"{subject}\"."),
        }
    }

    pub fn title(&self) -> &'static str {
        self.category.title()
    }
}

/// A recorded notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub user_id: UserId,
    pub title: String,
    pub message: String,
    pub category: NotificationCategory,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}
