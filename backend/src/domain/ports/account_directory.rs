//! Port for resolving caller-supplied identities to accounts.

use async_trait::async_trait;

use crate::domain::{MentorSummary, ProfileId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by account directory adapters.
    pub enum AccountDirectoryError {
        /// Directory connection could not be established.
        Connection { message: String } =>
            "account directory connection failed: {message}",
        /// Lookup failed during execution.
        Query { message: String } =>
            "account directory query failed: {message}",
    }
}

/// Lookup-by-id plus the profile-to-account fallback.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Find an account by its identifier.
    async fn find_account(
        &self,
        account_id: UserId,
    ) -> Result<Option<MentorSummary>, AccountDirectoryError>;

    /// Translate a profile identifier to the owning account identifier.
    async fn resolve_profile(
        &self,
        profile_id: ProfileId,
    ) -> Result<Option<UserId>, AccountDirectoryError>;
}

/// Fixture directory that knows no accounts.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAccountDirectory;

#[async_trait]
impl AccountDirectory for FixtureAccountDirectory {
    async fn find_account(
        &self,
        _account_id: UserId,
    ) -> Result<Option<MentorSummary>, AccountDirectoryError> {
        Ok(None)
    }

    async fn resolve_profile(
        &self,
        _profile_id: ProfileId,
    ) -> Result<Option<UserId>, AccountDirectoryError> {
        Ok(None)
    }
}
