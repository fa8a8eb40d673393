//! PostgreSQL-backed `ProgramRepository` implementation using Diesel ORM.
//!
//! `enroll` runs in one transaction that locks the program row with
//! `SELECT ... FOR UPDATE` before counting and inserting, so concurrent joins
//! for the same program queue behind each other. The capacity trigger and
//! the (program_id, mentee_id) unique constraint back this up for writers
//! that bypass the adapter.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{ProgramRepository, ProgramRepositoryError};
use crate::domain::{
    AdminProgramListing, Capacity, Enrollment, EnrollmentOutcome, MentorSummary, Program,
    ProgramDraft, ProgramId, ProgramListing, UserId,
};

use super::diesel_basic_error_mapping::{
    EnrollmentViolation, classify_enrollment_violation, map_basic_diesel_error,
    map_basic_pool_error,
};
use super::models::{AccountRow, NewEnrollmentRow, NewProgramRow, ProgramRow};
use super::pool::{DbPool, PoolError};
use super::schema::{program_enrollments, programs, users};

/// Diesel-backed implementation of the program repository port.
#[derive(Clone)]
pub struct DieselProgramRepository {
    pool: DbPool,
}

impl DieselProgramRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProgramRepositoryError {
    map_basic_pool_error(error, ProgramRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ProgramRepositoryError {
    map_basic_diesel_error(
        error,
        ProgramRepositoryError::query,
        ProgramRepositoryError::connection,
    )
}

fn to_count(value: i64) -> Result<u32, ProgramRepositoryError> {
    u32::try_from(value).map_err(|_| {
        ProgramRepositoryError::query(format!("enrollment count out of range: {value}"))
    })
}

fn row_to_program(row: ProgramRow) -> Result<Program, ProgramRepositoryError> {
    let ProgramRow {
        id,
        mentor_id,
        subject,
        description,
        community_link,
        capacity,
        active,
        created_at,
    } = row;

    Program::new(ProgramDraft {
        id: ProgramId::from_uuid(id),
        mentor_id: UserId::from_uuid(mentor_id),
        subject,
        description,
        community_link,
        capacity: i64::from(capacity),
        active,
        created_at,
    })
    .map_err(|err| ProgramRepositoryError::query(format!("invalid program row {id}: {err}")))
}

fn row_to_mentor(row: AccountRow) -> MentorSummary {
    MentorSummary {
        id: UserId::from_uuid(row.id),
        display_name: row.display_name,
        email: row.email,
    }
}

fn capacity_to_column(capacity: Capacity) -> Result<i32, ProgramRepositoryError> {
    i32::try_from(capacity.get())
        .map_err(|_| ProgramRepositoryError::query("capacity exceeds column range"))
}

/// Outcome of the locked section, before conversion to the domain outcome.
enum LockedAttempt {
    Unavailable,
    AlreadyJoined,
    Full { capacity: i32, joined: i64 },
    Inserted,
}

/// Live enrollment counts keyed by program, plus the viewer's memberships.
struct CountSnapshot {
    counts: HashMap<Uuid, i64>,
    viewer_programs: HashSet<Uuid>,
}

impl CountSnapshot {
    fn annotate(
        &self,
        program: Program,
        viewer: Option<UserId>,
    ) -> Result<ProgramListing, ProgramRepositoryError> {
        let id = *program.id().as_uuid();
        let joined_count = to_count(self.counts.get(&id).copied().unwrap_or(0))?;
        Ok(ProgramListing {
            program,
            joined_count,
            joined_by_viewer: viewer.is_some() && self.viewer_programs.contains(&id),
        })
    }
}

async fn load_counts(
    conn: &mut AsyncPgConnection,
    program_ids: Option<&[Uuid]>,
    viewer: Option<UserId>,
) -> Result<CountSnapshot, diesel::result::Error> {
    let counts: Vec<(Uuid, i64)> = match program_ids {
        Some(ids) => {
            program_enrollments::table
                .filter(program_enrollments::program_id.eq_any(ids))
                .group_by(program_enrollments::program_id)
                .select((program_enrollments::program_id, count_star()))
                .load(conn)
                .await?
        }
        None => {
            program_enrollments::table
                .group_by(program_enrollments::program_id)
                .select((program_enrollments::program_id, count_star()))
                .load(conn)
                .await?
        }
    };

    let viewer_programs: Vec<Uuid> = match viewer {
        Some(viewer) => {
            program_enrollments::table
                .filter(program_enrollments::mentee_id.eq(*viewer.as_uuid()))
                .select(program_enrollments::program_id)
                .load(conn)
                .await?
        }
        None => Vec::new(),
    };

    Ok(CountSnapshot {
        counts: counts.into_iter().collect(),
        viewer_programs: viewer_programs.into_iter().collect(),
    })
}

impl DieselProgramRepository {
    /// Read capacity and count after the trigger rejected an insert.
    async fn read_full_state(
        &self,
        program_id: Uuid,
    ) -> Result<EnrollmentOutcome, ProgramRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let capacity: i32 = programs::table
            .filter(programs::id.eq(program_id))
            .select(programs::capacity)
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let joined: i64 = program_enrollments::table
            .filter(program_enrollments::program_id.eq(program_id))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        full_outcome(capacity, joined)
    }
}

fn full_outcome(capacity: i32, joined: i64) -> Result<EnrollmentOutcome, ProgramRepositoryError> {
    let capacity = Capacity::new(i64::from(capacity))
        .map_err(|err| ProgramRepositoryError::query(err.to_string()))?;
    Ok(EnrollmentOutcome::ProgramFull {
        capacity,
        joined_count: to_count(joined)?,
    })
}

#[async_trait]
impl ProgramRepository for DieselProgramRepository {
    async fn create(&self, program: &Program) -> Result<(), ProgramRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewProgramRow {
            id: *program.id().as_uuid(),
            mentor_id: *program.mentor_id().as_uuid(),
            subject: program.subject().as_ref(),
            description: program.description(),
            community_link: program.community_link().as_ref(),
            capacity: capacity_to_column(program.capacity())?,
            active: program.is_active(),
            created_at: program.created_at(),
        };

        diesel::insert_into(programs::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn enroll(
        &self,
        enrollment: &Enrollment,
    ) -> Result<EnrollmentOutcome, ProgramRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewEnrollmentRow {
            id: *enrollment.id().as_uuid(),
            program_id: *enrollment.program_id().as_uuid(),
            mentee_id: *enrollment.mentee_id().as_uuid(),
            created_at: enrollment.created_at(),
        };
        let program_id = row.program_id;
        let mentee_id = row.mentee_id;

        let attempt = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let locked: Option<(i32, bool)> = programs::table
                        .filter(programs::id.eq(program_id))
                        .select((programs::capacity, programs::active))
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?;
                    let Some((capacity, true)) = locked else {
                        return Ok(LockedAttempt::Unavailable);
                    };

                    let existing: i64 = program_enrollments::table
                        .filter(program_enrollments::program_id.eq(program_id))
                        .filter(program_enrollments::mentee_id.eq(mentee_id))
                        .count()
                        .get_result(conn)
                        .await?;
                    if existing > 0 {
                        return Ok(LockedAttempt::AlreadyJoined);
                    }

                    let joined: i64 = program_enrollments::table
                        .filter(program_enrollments::program_id.eq(program_id))
                        .count()
                        .get_result(conn)
                        .await?;
                    if joined >= i64::from(capacity) {
                        return Ok(LockedAttempt::Full { capacity, joined });
                    }

                    diesel::insert_into(program_enrollments::table)
                        .values(&row)
                        .execute(conn)
                        .await?;
                    Ok(LockedAttempt::Inserted)
                }
                .scope_boxed()
            })
            .await;

        match attempt {
            Ok(LockedAttempt::Inserted) => Ok(EnrollmentOutcome::Enrolled(enrollment.clone())),
            Ok(LockedAttempt::AlreadyJoined) => Ok(EnrollmentOutcome::AlreadyJoined),
            Ok(LockedAttempt::Unavailable) => Ok(EnrollmentOutcome::ProgramUnavailable),
            Ok(LockedAttempt::Full { capacity, joined }) => full_outcome(capacity, joined),
            Err(error) => match classify_enrollment_violation(&error) {
                Some(EnrollmentViolation::DuplicatePair) => {
                    debug!(%program_id, %mentee_id, "unique constraint rejected enrollment");
                    Ok(EnrollmentOutcome::AlreadyJoined)
                }
                Some(EnrollmentViolation::CapacityExceeded) => {
                    debug!(%program_id, "capacity trigger rejected enrollment");
                    self.read_full_state(program_id).await
                }
                None => Err(map_diesel_error(error)),
            },
        }
    }

    async fn list_with_counts(
        &self,
        viewer: Option<UserId>,
    ) -> Result<Vec<ProgramListing>, ProgramRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Repeatable read: programs and counts come from one snapshot.
        let (rows, snapshot) = conn
            .build_transaction()
            .repeatable_read()
            .read_only()
            .run::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let rows: Vec<ProgramRow> = programs::table
                        .order((programs::created_at.desc(), programs::id.desc()))
                        .select(ProgramRow::as_select())
                        .load(conn)
                        .await?;
                    let snapshot = load_counts(conn, None, viewer).await?;
                    Ok((rows, snapshot))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|row| snapshot.annotate(row_to_program(row)?, viewer))
            .collect()
    }

    async fn find_with_count(
        &self,
        program_id: ProgramId,
        viewer: Option<UserId>,
    ) -> Result<Option<ProgramListing>, ProgramRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = *program_id.as_uuid();

        let found = conn
            .build_transaction()
            .repeatable_read()
            .read_only()
            .run::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let row: Option<ProgramRow> = programs::table
                        .filter(programs::id.eq(id))
                        .select(ProgramRow::as_select())
                        .first(conn)
                        .await
                        .optional()?;
                    let Some(row) = row else {
                        return Ok(None);
                    };
                    let snapshot =
                        load_counts(conn, Some(std::slice::from_ref(&id)), viewer).await?;
                    Ok(Some((row, snapshot)))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        found
            .map(|(row, snapshot)| snapshot.annotate(row_to_program(row)?, viewer))
            .transpose()
    }

    async fn admin_list(&self) -> Result<Vec<AdminProgramListing>, ProgramRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (rows, snapshot) = conn
            .build_transaction()
            .repeatable_read()
            .read_only()
            .run::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let rows: Vec<(ProgramRow, AccountRow)> = programs::table
                        .inner_join(users::table)
                        .order((programs::created_at.desc(), programs::id.desc()))
                        .select((ProgramRow::as_select(), AccountRow::as_select()))
                        .load(conn)
                        .await?;
                    let snapshot = load_counts(conn, None, None).await?;
                    Ok((rows, snapshot))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|(program_row, mentor_row)| -> Result<_, ProgramRepositoryError> {
                let listing = snapshot.annotate(row_to_program(program_row)?, None)?;
                Ok(AdminProgramListing {
                    program: listing.program,
                    mentor: row_to_mentor(mentor_row),
                    joined_count: listing.joined_count,
                })
            })
            .collect()
    }
}
