//! Mentorship program HTTP handlers.
//!
//! ```text
//! POST /api/v1/programs
//! GET  /api/v1/programs?viewerId=
//! GET  /api/v1/programs/{program_id}?viewerId=
//! POST /api/v1/programs/{program_id}/join
//! ```

use actix_web::{HttpResponse, get, http::header, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{
    CreateProgramRequest, EnrollmentPayload, GetProgramRequest, JoinProgramRequest,
    ListProgramsRequest, ProgramPayload,
};
use crate::domain::{Error, ProgramId, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id, parse_optional_id, require};

/// Request payload for creating a program.
///
/// Fields are optional at the wire level so missing values surface as
/// structured `missing_field` errors rather than opaque decoding failures.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProgramRequestBody {
    /// Account or profile identifier of the owning mentor.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub mentor_id: Option<String>,
    #[schema(example = "Systems design interview prep")]
    pub subject: Option<String>,
    pub description: Option<String>,
    #[schema(example = "https://chat.example.org/invite/prep")]
    pub community_link: Option<String>,
    #[schema(example = 12, minimum = 1)]
    pub capacity: Option<i64>,
}

/// Request payload for joining a program.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JoinProgramRequestBody {
    /// Account or profile identifier of the joining mentee.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub mentee_id: Option<String>,
}

/// Optional viewer used to annotate `joinedByViewer`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ViewerQuery {
    /// Account identifier of the viewing user.
    pub viewer_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProgramPath {
    program_id: String,
}

/// Program annotated with its live enrollment count.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgramResponse {
    pub id: String,
    pub mentor_id: String,
    pub subject: String,
    pub description: Option<String>,
    pub community_link: String,
    pub capacity: u32,
    pub active: bool,
    pub created_at: String,
    pub joined_count: u32,
    pub joined_by_viewer: bool,
}

impl From<ProgramPayload> for ProgramResponse {
    fn from(value: ProgramPayload) -> Self {
        Self {
            id: value.id.to_string(),
            mentor_id: value.mentor_id.to_string(),
            subject: value.subject,
            description: value.description,
            community_link: value.community_link,
            capacity: value.capacity,
            active: value.active,
            created_at: value.created_at.to_rfc3339(),
            joined_count: value.joined_count,
            joined_by_viewer: value.joined_by_viewer,
        }
    }
}

/// Enrollment created by a successful join.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentResponse {
    pub id: String,
    pub program_id: String,
    pub mentee_id: String,
    pub created_at: String,
}

impl From<EnrollmentPayload> for EnrollmentResponse {
    fn from(value: EnrollmentPayload) -> Self {
        Self {
            id: value.id.to_string(),
            program_id: value.program_id.to_string(),
            mentee_id: value.mentee_id.to_string(),
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

fn parse_create_request(payload: CreateProgramRequestBody) -> Result<CreateProgramRequest, Error> {
    let mentor_id = require(payload.mentor_id, FieldName::new("mentorId"))?;
    Ok(CreateProgramRequest {
        mentor_id: parse_id(mentor_id, FieldName::new("mentorId"))?,
        subject: require(payload.subject, FieldName::new("subject"))?,
        description: payload.description,
        community_link: require(payload.community_link, FieldName::new("communityLink"))?,
        capacity: require(payload.capacity, FieldName::new("capacity"))?,
    })
}

fn parse_viewer(query: ViewerQuery) -> Result<Option<UserId>, Error> {
    parse_optional_id(query.viewer_id, FieldName::new("viewerId"))
}

fn parse_program_id(path: ProgramPath) -> Result<ProgramId, Error> {
    parse_id(path.program_id, FieldName::new("programId"))
}

/// Create a mentorship program.
#[utoipa::path(
    post,
    path = "/api/v1/programs",
    request_body = CreateProgramRequestBody,
    responses(
        (
            status = 201,
            description = "Program created",
            headers(("Location" = String, description = "URI of the created program")),
            body = ProgramResponse
        ),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Mentor not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["programs"],
    operation_id = "createProgram"
)]
#[post("/programs")]
pub async fn create_program(
    state: web::Data<HttpState>,
    payload: web::Json<CreateProgramRequestBody>,
) -> ApiResult<HttpResponse> {
    let request = parse_create_request(payload.into_inner())?;
    let program = state.programs.create_program(request).await?;
    info!(program_id = %program.id, "program created over HTTP");
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/v1/programs/{}", program.id)))
        .json(ProgramResponse::from(program)))
}

/// List every program with live enrollment counts, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/programs",
    params(ViewerQuery),
    responses(
        (status = 200, description = "Programs", body = [ProgramResponse]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["programs"],
    operation_id = "listPrograms"
)]
#[get("/programs")]
pub async fn list_programs(
    state: web::Data<HttpState>,
    query: web::Query<ViewerQuery>,
) -> ApiResult<web::Json<Vec<ProgramResponse>>> {
    let viewer_id = parse_viewer(query.into_inner())?;
    let programs = state
        .programs_query
        .list_programs(ListProgramsRequest { viewer_id })
        .await?;
    Ok(web::Json(
        programs.into_iter().map(ProgramResponse::from).collect(),
    ))
}

/// Fetch one program with its live enrollment count.
#[utoipa::path(
    get,
    path = "/api/v1/programs/{program_id}",
    params(
        ("program_id" = String, Path, description = "Program identifier"),
        ViewerQuery
    ),
    responses(
        (status = 200, description = "Program", body = ProgramResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["programs"],
    operation_id = "getProgram"
)]
#[get("/programs/{program_id}")]
pub async fn get_program(
    state: web::Data<HttpState>,
    path: web::Path<ProgramPath>,
    query: web::Query<ViewerQuery>,
) -> ApiResult<web::Json<ProgramResponse>> {
    let program_id = parse_program_id(path.into_inner())?;
    let viewer_id = parse_viewer(query.into_inner())?;
    let program = state
        .programs_query
        .get_program(GetProgramRequest {
            program_id,
            viewer_id,
        })
        .await?;
    Ok(web::Json(ProgramResponse::from(program)))
}

/// Join a program as a mentee.
#[utoipa::path(
    post,
    path = "/api/v1/programs/{program_id}/join",
    params(("program_id" = String, Path, description = "Program identifier")),
    request_body = JoinProgramRequestBody,
    responses(
        (status = 201, description = "Enrollment created", body = EnrollmentResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Program not found or inactive", body = ErrorSchema),
        (
            status = 409,
            description = "Program is full (`program_full`) or the mentee already joined (`already_joined`)",
            body = ErrorSchema
        ),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["programs"],
    operation_id = "joinProgram"
)]
#[post("/programs/{program_id}/join")]
pub async fn join_program(
    state: web::Data<HttpState>,
    path: web::Path<ProgramPath>,
    payload: web::Json<JoinProgramRequestBody>,
) -> ApiResult<HttpResponse> {
    let program_id = parse_program_id(path.into_inner())?;
    let mentee_id = require(payload.into_inner().mentee_id, FieldName::new("menteeId"))?;
    let mentee_id = parse_id(mentee_id, FieldName::new("menteeId"))?;
    let enrollment = state
        .programs
        .join_program(JoinProgramRequest {
            program_id,
            mentee_id,
        })
        .await?;
    Ok(HttpResponse::Created().json(EnrollmentResponse::from(enrollment)))
}

#[cfg(test)]
#[path = "programs_tests.rs"]
mod tests;
