//! Shared pool and Diesel error mapping for the mentorship adapters.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Constraint that rejected an enrollment insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EnrollmentViolation {
    /// `program_enrollments_program_mentee_key` fired.
    DuplicatePair,
    /// The `program_enrollments_capacity` trigger fired.
    CapacityExceeded,
}

const DUPLICATE_PAIR_CONSTRAINT: &str = "program_enrollments_program_mentee_key";
const CAPACITY_CONSTRAINT: &str = "program_enrollments_capacity";

/// Map pool errors into a port-specific connection error constructor.
pub(crate) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map Diesel errors into query or connection constructors.
pub(crate) fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::SerializationFailure, _) => {
            query("database serialization failure")
        }
        _ => query("database error"),
    }
}

/// Classify an enrollment insert failure raised by the uniqueness constraint
/// or the capacity trigger.
pub(crate) fn classify_enrollment_violation(error: &DieselError) -> Option<EnrollmentViolation> {
    let DieselError::DatabaseError(kind, info) = error else {
        return None;
    };
    match (kind, info.constraint_name()) {
        (DatabaseErrorKind::UniqueViolation, Some(DUPLICATE_PAIR_CONSTRAINT)) => {
            Some(EnrollmentViolation::DuplicatePair)
        }
        (DatabaseErrorKind::CheckViolation, Some(CAPACITY_CONSTRAINT)) => {
            Some(EnrollmentViolation::CapacityExceeded)
        }
        _ => None,
    }
}
