//! PostgreSQL-backed `NotificationSink` over the `notifications` table.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use mockable::Clock;

use crate::domain::ports::{NotificationSink, NotificationSinkError};
use crate::domain::{
    Notification, NotificationCategory, NotificationDraft, NotificationId, UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewNotificationRow, NotificationRow};
use super::pool::{DbPool, PoolError};
use super::schema::notifications;

/// Diesel-backed notification sink.
#[derive(Clone)]
pub struct DieselNotificationSink {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselNotificationSink {
    /// Create a sink stamping rows with `clock`.
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

fn map_pool_error(error: PoolError) -> NotificationSinkError {
    map_basic_pool_error(error, NotificationSinkError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> NotificationSinkError {
    map_basic_diesel_error(
        error,
        NotificationSinkError::query,
        NotificationSinkError::connection,
    )
}

fn row_to_notification(row: NotificationRow) -> Result<Notification, NotificationSinkError> {
    let category = row
        .category
        .parse::<NotificationCategory>()
        .map_err(|err| NotificationSinkError::query(err.to_string()))?;
    Ok(Notification {
        id: NotificationId::from_uuid(row.id),
        user_id: UserId::from_uuid(row.user_id),
        title: row.title,
        message: row.message,
        category,
        read: row.is_read,
        created_at: row.created_at,
    })
}

#[async_trait]
impl NotificationSink for DieselNotificationSink {
    async fn notify(&self, draft: &NotificationDraft) -> Result<(), NotificationSinkError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewNotificationRow {
            id: *NotificationId::random().as_uuid(),
            user_id: *draft.user_id.as_uuid(),
            title: draft.title(),
            message: &draft.message,
            category: draft.category.as_str(),
            is_read: false,
            created_at: self.clock.utc(),
        };

        diesel::insert_into(notifications::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Notification>, NotificationSinkError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<NotificationRow> = notifications::table
            .filter(notifications::user_id.eq(user_id.as_uuid()))
            .order((notifications::created_at.desc(), notifications::id.desc()))
            .select(NotificationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_notification).collect()
    }
}
