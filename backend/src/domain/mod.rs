//! Domain primitives, aggregates, ports, and services.
//!
//! Purpose: Define strongly typed mentorship entities used by the API and
//! persistence layers, the ports adapters implement, and the enrollment
//! service that enforces the capacity and one-enrollment-per-mentee rules.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Program, Enrollment, ProgramListing: mentorship aggregates.
//! - ProgramService: implementation of the driving ports.

pub mod account;
pub mod error;
pub mod ids;
pub mod notification;
pub mod ports;
pub mod program_service;
pub mod programs;
pub mod trace_id;

pub use self::account::MentorSummary;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::ids::{EnrollmentId, IdParseError, NotificationId, ProfileId, ProgramId, UserId};
pub use self::notification::{
    Notification, NotificationCategory, NotificationDraft, UnknownCategory,
};
pub use self::program_service::ProgramService;
pub use self::programs::{
    AdminProgramListing, COMMUNITY_LINK_MAX, Capacity, CommunityLink, DESCRIPTION_MAX,
    Enrollment, EnrollmentOutcome, Program, ProgramDraft, ProgramListing,
    ProgramValidationError, SUBJECT_MAX, Subject,
};
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use mentorship::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("program not found or inactive"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
