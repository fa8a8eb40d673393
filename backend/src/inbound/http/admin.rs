//! Administrative oversight handlers.
//!
//! ```text
//! GET /api/v1/admin/programs
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{AdminProgramPayload, MentorPayload};
use crate::inbound::http::ApiResult;
use crate::inbound::http::programs::ProgramResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Mentor contact details shown to administrators.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MentorResponse {
    pub id: String,
    pub display_name: String,
    pub email: String,
}

impl From<MentorPayload> for MentorResponse {
    fn from(value: MentorPayload) -> Self {
        Self {
            id: value.id.to_string(),
            display_name: value.display_name,
            email: value.email,
        }
    }
}

/// One oversight row: the program, its owner, and its live count.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminProgramResponse {
    pub program: ProgramResponse,
    pub mentor: MentorResponse,
}

impl From<AdminProgramPayload> for AdminProgramResponse {
    fn from(value: AdminProgramPayload) -> Self {
        Self {
            program: value.program.into(),
            mentor: value.mentor.into(),
        }
    }
}

/// List every program, active or not, with mentor details and live counts.
#[utoipa::path(
    get,
    path = "/api/v1/admin/programs",
    responses(
        (status = 200, description = "Program oversight listing", body = [AdminProgramResponse]),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "listAdminPrograms"
)]
#[get("/admin/programs")]
pub async fn list_admin_programs(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<AdminProgramResponse>>> {
    let rows = state.programs_query.admin_list_programs().await?;
    Ok(web::Json(
        rows.into_iter().map(AdminProgramResponse::from).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProgramId;
    use crate::inbound::http::test_utils::{MemoryBackend, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[actix_web::test]
    async fn oversight_includes_inactive_programs_and_mentor_details() {
        let backend = MemoryBackend::new();
        let mentor = backend.account("Ada").await;
        let app = actix_test::init_service(test_app(backend.state.clone())).await;

        let create = actix_test::TestRequest::post()
            .uri("/api/v1/programs")
            .set_json(json!({
                "mentorId": mentor.to_string(),
                "subject": "Compilers",
                "communityLink": "https://chat.example.org/compilers",
                "capacity": 4,
            }))
            .to_request();
        let created: Value = actix_test::call_and_read_body_json(&app, create).await;
        let program_id: ProgramId = created["id"]
            .as_str()
            .expect("id")
            .parse()
            .expect("program id");
        assert!(backend.store.set_active(program_id, false).await);

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/admin/programs")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let rows: Value = actix_test::read_body_json(response).await;
        let row = &rows.as_array().expect("array")[0];
        assert_eq!(row["program"]["active"], json!(false));
        assert_eq!(row["program"]["joinedCount"], json!(0));
        assert_eq!(row["mentor"]["displayName"], json!("Ada"));
        assert_eq!(row["mentor"]["email"], json!("ada@example.org"));
    }
}
