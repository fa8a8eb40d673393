//! PostgreSQL-backed `AccountDirectory` over the `users` and `profiles`
//! tables.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{AccountDirectory, AccountDirectoryError};
use crate::domain::{MentorSummary, ProfileId, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::AccountRow;
use super::pool::{DbPool, PoolError};
use super::schema::{profiles, users};

/// Diesel-backed account directory.
#[derive(Clone)]
pub struct DieselAccountDirectory {
    pool: DbPool,
}

impl DieselAccountDirectory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AccountDirectoryError {
    map_basic_pool_error(error, AccountDirectoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> AccountDirectoryError {
    map_basic_diesel_error(
        error,
        AccountDirectoryError::query,
        AccountDirectoryError::connection,
    )
}

#[async_trait]
impl AccountDirectory for DieselAccountDirectory {
    async fn find_account(
        &self,
        account_id: UserId,
    ) -> Result<Option<MentorSummary>, AccountDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::id.eq(account_id.as_uuid()))
            .select(AccountRow::as_select())
            .first::<AccountRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(|row| MentorSummary {
            id: UserId::from_uuid(row.id),
            display_name: row.display_name,
            email: row.email,
        }))
    }

    async fn resolve_profile(
        &self,
        profile_id: ProfileId,
    ) -> Result<Option<UserId>, AccountDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let owner: Option<Uuid> = profiles::table
            .filter(profiles::id.eq(profile_id.as_uuid()))
            .select(profiles::user_id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(owner.map(UserId::from_uuid))
    }
}
