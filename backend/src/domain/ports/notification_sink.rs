//! Port for recording and reading in-app notifications.

use async_trait::async_trait;

use crate::domain::{Notification, NotificationDraft, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by notification sink adapters.
    pub enum NotificationSinkError {
        /// Sink connection could not be established.
        Connection { message: String } =>
            "notification sink connection failed: {message}",
        /// Write or read failed during execution.
        Query { message: String } =>
            "notification sink query failed: {message}",
    }
}

/// Accepts notifications for delivery and lists what a user has received.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Record a notification.
    async fn notify(&self, draft: &NotificationDraft) -> Result<(), NotificationSinkError>;

    /// Notifications for `user_id`, newest first.
    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Notification>, NotificationSinkError>;
}

/// Fixture sink that discards notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureNotificationSink;

#[async_trait]
impl NotificationSink for FixtureNotificationSink {
    async fn notify(&self, _draft: &NotificationDraft) -> Result<(), NotificationSinkError> {
        Ok(())
    }

    async fn list_for_user(
        &self,
        _user_id: UserId,
    ) -> Result<Vec<Notification>, NotificationSinkError> {
        Ok(Vec::new())
    }
}
