//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: every handler in the inbound HTTP layer (programs, admin,
//!   notifications, health)
//! - **Schemas**: request and response bodies plus the domain error wrappers
//!   ([`ErrorSchema`], [`ErrorCodeSchema`]) that describe the error envelope
//!   without coupling domain types to utoipa
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::admin::{AdminProgramResponse, MentorResponse};
use crate::inbound::http::notifications::NotificationResponse;
use crate::inbound::http::programs::{
    CreateProgramRequestBody, EnrollmentResponse, JoinProgramRequestBody, ProgramResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mentorship backend API",
        description = "Program registry, capacity-bounded enrollment, and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::programs::create_program,
        crate::inbound::http::programs::list_programs,
        crate::inbound::http::programs::get_program,
        crate::inbound::http::programs::join_program,
        crate::inbound::http::admin::list_admin_programs,
        crate::inbound::http::notifications::list_notifications,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateProgramRequestBody,
        JoinProgramRequestBody,
        ProgramResponse,
        EnrollmentResponse,
        AdminProgramResponse,
        MentorResponse,
        NotificationResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "programs", description = "Mentorship programs and enrollment"),
        (name = "admin", description = "Administrative oversight"),
        (name = "notifications", description = "Enrollment outcome notifications"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
