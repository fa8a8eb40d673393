//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer; adapters convert them into
//! validated domain values.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{notifications, program_enrollments, programs, users};

/// Row read from `users` for ownership checks and oversight listings.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
}

/// Row read from `programs`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = programs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProgramRow {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub subject: String,
    pub description: Option<String>,
    pub community_link: String,
    pub capacity: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Insertable program row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = programs)]
pub(crate) struct NewProgramRow<'a> {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub subject: &'a str,
    pub description: Option<&'a str>,
    pub community_link: &'a str,
    pub capacity: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Insertable enrollment row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = program_enrollments)]
pub(crate) struct NewEnrollmentRow {
    pub id: Uuid,
    pub program_id: Uuid,
    pub mentee_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Row read from `notifications`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NotificationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub category: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Insertable notification row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = notifications)]
pub(crate) struct NewNotificationRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: &'a str,
    pub message: &'a str,
    pub category: &'a str,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
