//! Strongly typed identifiers for accounts, profiles, programs, enrollments,
//! and notifications.
//!
//! Every identifier is a UUID. The wrappers exist so a profile identifier can
//! never be passed where an account identifier is expected without going
//! through the account directory.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error raised when parsing an identifier from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} must be a valid UUID")]
pub struct IdParseError {
    kind: &'static str,
}

macro_rules! define_uuid_id {
    ($(#[$meta:meta])* $name:ident => $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Generate a new random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Access the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                if value.trim() != value {
                    return Err(IdParseError { kind: $kind });
                }
                Uuid::parse_str(value)
                    .map(Self)
                    .map_err(|_| IdParseError { kind: $kind })
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }
    };
}

define_uuid_id! {
    /// Account identifier; the identity mentors and mentees act as.
    UserId => "user id"
}

define_uuid_id! {
    /// Alumni or student profile identifier, owned by exactly one account.
    ProfileId => "profile id"
}

define_uuid_id! {
    /// Mentorship program identifier.
    ProgramId => "program id"
}

define_uuid_id! {
    /// Enrollment identifier.
    EnrollmentId => "enrollment id"
}

define_uuid_id! {
    /// Notification identifier.
    NotificationId => "notification id"
}

impl From<UserId> for ProfileId {
    /// Reinterpret a caller-supplied account identifier as a profile
    /// identifier for the directory fallback lookup.
    fn from(value: UserId) -> Self {
        Self(value.0)
    }
}
