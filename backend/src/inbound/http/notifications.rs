//! Notification read handlers.
//!
//! ```text
//! GET /api/v1/users/{user_id}/notifications
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::NotificationPayload;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

/// Notification recorded for a user.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub id: String,
    pub title: String,
    pub message: String,
    /// One of `program_joined`, `program_full`, `program_already_joined`.
    #[schema(example = "program_joined")]
    pub category: String,
    pub read: bool,
    pub created_at: String,
}

impl From<NotificationPayload> for NotificationResponse {
    fn from(value: NotificationPayload) -> Self {
        Self {
            id: value.id.to_string(),
            title: value.title,
            message: value.message,
            category: value.category.as_str().to_owned(),
            read: value.read,
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UserPath {
    user_id: String,
}

/// List a user's notifications, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/notifications",
    params(("user_id" = String, Path, description = "Account identifier")),
    responses(
        (status = 200, description = "Notifications", body = [NotificationResponse]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "listNotifications"
)]
#[get("/users/{user_id}/notifications")]
pub async fn list_notifications(
    state: web::Data<HttpState>,
    path: web::Path<UserPath>,
) -> ApiResult<web::Json<Vec<NotificationResponse>>> {
    let user_id = parse_id(path.into_inner().user_id, FieldName::new("userId"))?;
    let notifications = state.programs_query.list_notifications(user_id).await?;
    Ok(web::Json(
        notifications
            .into_iter()
            .map(NotificationResponse::from)
            .collect(),
    ))
}
