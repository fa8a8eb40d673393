//! Shared validation helpers for inbound HTTP adapters.

use std::str::FromStr;

use serde_json::json;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a valid UUID"))
        .with_value(ErrorCode::InvalidUuid, value)
}

/// Unwrap a required field or report it as missing.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Parse a UUID-backed identifier, reporting the field on failure.
pub(crate) fn parse_id<T: FromStr>(value: String, field: FieldName) -> Result<T, Error> {
    value.parse().map_err(|_| invalid_uuid_error(field, &value))
}

/// Parse an optional identifier supplied as a query parameter.
pub(crate) fn parse_optional_id<T: FromStr>(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<T>, Error> {
    value.map(|raw| parse_id(raw, field)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode as DomainCode, ProgramId, UserId};
    use rstest::rstest;

    #[rstest]
    fn missing_field_reports_field_and_code() {
        let err = require::<String>(None, FieldName::new("menteeId")).expect_err("missing");
        assert_eq!(err.code(), DomainCode::InvalidRequest);
        assert_eq!(err.message(), "missing required field: menteeId");
        assert_eq!(
            err.details(),
            Some(&json!({"field": "menteeId", "code": "missing_field"}))
        );
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("3fa85f64-5717-4562-b3fc")]
    fn invalid_identifier_echoes_value(#[case] raw: &str) {
        let err = parse_id::<ProgramId>(raw.to_owned(), FieldName::new("programId"))
            .expect_err("invalid uuid");
        assert_eq!(err.message(), "programId must be a valid UUID");
        let details = err.details().expect("details");
        assert_eq!(details["value"], json!(raw));
        assert_eq!(details["code"], json!("invalid_uuid"));
    }

    #[rstest]
    fn optional_identifier_passes_through_absence() {
        let parsed = parse_optional_id::<UserId>(None, FieldName::new("viewerId"))
            .expect("absent viewer is fine");
        assert!(parsed.is_none());
    }
}
