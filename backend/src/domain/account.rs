//! Account summaries exposed by the account directory.

use crate::domain::UserId;

/// Minimal view of an account used for ownership checks and oversight
/// listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentorSummary {
    pub id: UserId,
    pub display_name: String,
    pub email: String,
}
