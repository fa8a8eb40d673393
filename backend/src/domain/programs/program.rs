//! Program entity and its validated field types.

use std::fmt;
use std::num::NonZeroU32;

use chrono::{DateTime, Utc};
use url::Url;

use crate::domain::{ProgramId, UserId};

use super::ProgramValidationError;

/// Maximum subject length in characters.
pub const SUBJECT_MAX: usize = 200;
/// Maximum description length in characters.
pub const DESCRIPTION_MAX: usize = 4_000;
/// Maximum community link length in characters.
pub const COMMUNITY_LINK_MAX: usize = 2_048;
/// Largest capacity representable in the `programs.capacity` column.
const CAPACITY_MAX: u32 = 2_147_483_647;

/// Non-empty, trimmed program subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject(String);

impl Subject {
    /// Validate and construct a subject, trimming surrounding whitespace.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ProgramValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ProgramValidationError::EmptySubject);
        }
        if trimmed.chars().count() > SUBJECT_MAX {
            return Err(ProgramValidationError::SubjectTooLong { max: SUBJECT_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Subject {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Absolute `http`/`https` link to the program's external chat community.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunityLink(String);

impl CommunityLink {
    /// Validate and construct a community link.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ProgramValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ProgramValidationError::EmptyCommunityLink);
        }
        if trimmed.chars().count() > COMMUNITY_LINK_MAX {
            return Err(ProgramValidationError::CommunityLinkTooLong {
                max: COMMUNITY_LINK_MAX,
            });
        }
        let parsed =
            Url::parse(trimmed).map_err(|_| ProgramValidationError::InvalidCommunityLink)?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(ProgramValidationError::InvalidCommunityLink);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for CommunityLink {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Positive enrollment limit fixed when the program is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Capacity(NonZeroU32);

impl Capacity {
    /// Validate a raw capacity value.
    ///
    /// # Examples
    /// ```
    /// use mentorship::domain::Capacity;
    ///
    /// assert!(Capacity::new(0).is_err());
    /// assert_eq!(Capacity::new(3).map(|c| c.get()), Ok(3));
    /// ```
    pub fn new(value: i64) -> Result<Self, ProgramValidationError> {
        if value <= 0 {
            return Err(ProgramValidationError::NonPositiveCapacity { value });
        }
        let bounded = u32::try_from(value)
            .ok()
            .filter(|v| *v <= CAPACITY_MAX)
            .ok_or(ProgramValidationError::CapacityTooLarge { max: CAPACITY_MAX })?;
        NonZeroU32::new(bounded)
            .map(Self)
            .ok_or(ProgramValidationError::NonPositiveCapacity { value })
    }

    /// Capacity as a plain integer.
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Whether another enrollment fits given the current count.
    pub fn has_room_for(self, joined_count: u32) -> bool {
        joined_count < self.get()
    }
}

/// Input payload for [`Program::new`].
#[derive(Debug, Clone)]
pub struct ProgramDraft {
    pub id: ProgramId,
    pub mentor_id: UserId,
    pub subject: String,
    pub description: Option<String>,
    pub community_link: String,
    pub capacity: i64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// A validated mentorship program.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub(super) id: ProgramId,
    pub(super) mentor_id: UserId,
    pub(super) subject: Subject,
    pub(super) description: Option<String>,
    pub(super) community_link: CommunityLink,
    pub(super) capacity: Capacity,
    pub(super) active: bool,
    pub(super) created_at: DateTime<Utc>,
}

impl Program {
    /// Creates a validated program.
    ///
    /// Blank descriptions are normalised to `None`.
    pub fn new(draft: ProgramDraft) -> Result<Self, ProgramValidationError> {
        Self::try_from(draft)
    }

    /// Reassign ownership to the resolved mentor account.
    #[must_use]
    pub fn with_mentor(mut self, mentor_id: UserId) -> Self {
        self.mentor_id = mentor_id;
        self
    }

    /// Copy of the program with the active flag replaced.
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Program identifier.
    pub fn id(&self) -> ProgramId {
        self.id
    }

    /// Account that owns the program.
    pub fn mentor_id(&self) -> UserId {
        self.mentor_id
    }

    /// Program subject.
    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    /// Optional free-text description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// External community link.
    pub fn community_link(&self) -> &CommunityLink {
        &self.community_link
    }

    /// Enrollment limit.
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Whether the program accepts joins.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
