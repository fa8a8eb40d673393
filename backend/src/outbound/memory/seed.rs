//! Account directory seed for the in-memory store.
//!
//! Without PostgreSQL there is no `users` table to resolve mentors and
//! mentees against, so the store is primed from a JSON document:
//!
//! ```json
//! {
//!   "accounts": [
//!     {
//!       "id": "0b6f1c2e-6c1a-4d3e-9a51-3d1f0c6e2a01",
//!       "displayName": "Ada Mentor",
//!       "email": "ada@example.org",
//!       "profileIds": ["5a0e9c4b-2f7d-4b8e-8c1f-7e3a9d2b6c01"]
//!     }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use uuid::Uuid;

use crate::domain::{MentorSummary, ProfileId, UserId};

/// Errors raised while reading an account seed file.
#[derive(Debug, thiserror::Error)]
pub enum AccountSeedError {
    #[error("failed to read account seed {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse account seed {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One account plus the profile ids that resolve to it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedAccount {
    pub id: UserId,
    pub display_name: String,
    pub email: String,
    #[serde(default)]
    pub profile_ids: Vec<ProfileId>,
}

impl SeedAccount {
    pub(super) fn summary(&self) -> MentorSummary {
        MentorSummary {
            id: self.id,
            display_name: self.display_name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Accounts and profiles the in-memory store starts with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AccountSeed {
    pub accounts: Vec<SeedAccount>,
}

const DEMO_ACCOUNTS: [(u128, u128, &str, &str); 3] = [
    (
        0x0b6f_1c2e_6c1a_4d3e_9a51_3d1f_0c6e_2a01,
        0x5a0e_9c4b_2f7d_4b8e_8c1f_7e3a_9d2b_6c01,
        "Ada Mentor",
        "ada@example.org",
    ),
    (
        0x0b6f_1c2e_6c1a_4d3e_9a51_3d1f_0c6e_2a02,
        0x5a0e_9c4b_2f7d_4b8e_8c1f_7e3a_9d2b_6c02,
        "Grace Mentee",
        "grace@example.org",
    ),
    (
        0x0b6f_1c2e_6c1a_4d3e_9a51_3d1f_0c6e_2a03,
        0x5a0e_9c4b_2f7d_4b8e_8c1f_7e3a_9d2b_6c03,
        "Linus Mentee",
        "linus@example.org",
    ),
];

impl AccountSeed {
    /// Fixed demo directory: one mentor and two mentees, each with a
    /// profile, so a local server can create and join programs.
    #[must_use]
    pub fn demo() -> Self {
        let accounts = DEMO_ACCOUNTS
            .iter()
            .map(|(account, profile, display_name, email)| SeedAccount {
                id: UserId::from_uuid(Uuid::from_u128(*account)),
                display_name: (*display_name).to_owned(),
                email: (*email).to_owned(),
                profile_ids: vec![ProfileId::from_uuid(Uuid::from_u128(*profile))],
            })
            .collect();
        Self { accounts }
    }

    /// Load a seed from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`AccountSeedError`] when the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AccountSeedError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| AccountSeedError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| AccountSeedError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
