//! In-memory adapters for the program, account, and notification ports.
//!
//! A single mutex guards all state, so `enroll` is trivially atomic. Used by
//! the server when no database URL is configured and by behaviour tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tokio::sync::Mutex;

mod seed;

pub use seed::{AccountSeed, AccountSeedError, SeedAccount};

use crate::domain::ports::{
    AccountDirectory, AccountDirectoryError, NotificationSink, NotificationSinkError,
    ProgramRepository, ProgramRepositoryError,
};
use crate::domain::{
    AdminProgramListing, Enrollment, EnrollmentOutcome, MentorSummary, Notification,
    NotificationDraft, NotificationId, ProfileId, Program, ProgramId, ProgramListing, UserId,
};

#[derive(Default)]
struct State {
    accounts: HashMap<UserId, MentorSummary>,
    profiles: HashMap<ProfileId, UserId>,
    programs: Vec<Program>,
    enrollments: Vec<Enrollment>,
    notifications: Vec<Notification>,
}

impl State {
    fn joined_count(&self, program_id: ProgramId) -> u32 {
        let count = self
            .enrollments
            .iter()
            .filter(|enrollment| enrollment.program_id() == program_id)
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    fn is_member(&self, program_id: ProgramId, mentee_id: UserId) -> bool {
        self.enrollments.iter().any(|enrollment| {
            enrollment.program_id() == program_id && enrollment.mentee_id() == mentee_id
        })
    }

    fn listing(&self, program: &Program, viewer: Option<UserId>) -> ProgramListing {
        ProgramListing {
            program: program.clone(),
            joined_count: self.joined_count(program.id()),
            joined_by_viewer: viewer.is_some_and(|viewer| self.is_member(program.id(), viewer)),
        }
    }

    fn newest_first(&self) -> Vec<&Program> {
        let mut programs: Vec<&Program> = self.programs.iter().collect();
        programs.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        programs
    }
}

/// Process-local store implementing every driven port.
#[derive(Clone)]
pub struct InMemoryProgramStore {
    state: Arc<Mutex<State>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryProgramStore {
    /// Create an empty store stamping notifications with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
            clock,
        }
    }

    /// Create a store whose account directory is primed from `seed`.
    pub fn seeded(clock: Arc<dyn Clock>, seed: &AccountSeed) -> Self {
        let mut state = State::default();
        for account in &seed.accounts {
            state.accounts.insert(account.id, account.summary());
            for profile_id in &account.profile_ids {
                state.profiles.insert(*profile_id, account.id);
            }
        }
        Self {
            state: Arc::new(Mutex::new(state)),
            clock,
        }
    }

    /// Register an account so it can own or join programs.
    pub async fn insert_account(&self, account: MentorSummary) {
        self.state.lock().await.accounts.insert(account.id, account);
    }

    /// Register a profile owned by `account_id`.
    pub async fn insert_profile(&self, profile_id: ProfileId, account_id: UserId) {
        self.state
            .lock()
            .await
            .profiles
            .insert(profile_id, account_id);
    }

    /// Number of enrollments currently recorded for a program.
    pub async fn enrollment_count(&self, program_id: ProgramId) -> u32 {
        self.state.lock().await.joined_count(program_id)
    }

    /// Replace the active flag of a stored program.
    pub async fn set_active(&self, program_id: ProgramId, active: bool) -> bool {
        let mut state = self.state.lock().await;
        let Some(slot) = state.programs.iter_mut().find(|p| p.id() == program_id) else {
            return false;
        };
        *slot = slot.clone().with_active(active);
        true
    }
}

#[async_trait]
impl ProgramRepository for InMemoryProgramStore {
    async fn create(&self, program: &Program) -> Result<(), ProgramRepositoryError> {
        let mut state = self.state.lock().await;
        if state.programs.iter().any(|p| p.id() == program.id()) {
            return Err(ProgramRepositoryError::query(format!(
                "program {} already exists",
                program.id()
            )));
        }
        state.programs.push(program.clone());
        Ok(())
    }

    async fn enroll(
        &self,
        enrollment: &Enrollment,
    ) -> Result<EnrollmentOutcome, ProgramRepositoryError> {
        let mut state = self.state.lock().await;
        let Some(capacity) = state
            .programs
            .iter()
            .find(|p| p.id() == enrollment.program_id() && p.is_active())
            .map(Program::capacity)
        else {
            return Ok(EnrollmentOutcome::ProgramUnavailable);
        };

        if state.is_member(enrollment.program_id(), enrollment.mentee_id()) {
            return Ok(EnrollmentOutcome::AlreadyJoined);
        }
        let joined_count = state.joined_count(enrollment.program_id());
        if !capacity.has_room_for(joined_count) {
            return Ok(EnrollmentOutcome::ProgramFull {
                capacity,
                joined_count,
            });
        }

        state.enrollments.push(enrollment.clone());
        Ok(EnrollmentOutcome::Enrolled(enrollment.clone()))
    }

    async fn list_with_counts(
        &self,
        viewer: Option<UserId>,
    ) -> Result<Vec<ProgramListing>, ProgramRepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .newest_first()
            .into_iter()
            .map(|program| state.listing(program, viewer))
            .collect())
    }

    async fn find_with_count(
        &self,
        program_id: ProgramId,
        viewer: Option<UserId>,
    ) -> Result<Option<ProgramListing>, ProgramRepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .programs
            .iter()
            .find(|p| p.id() == program_id)
            .map(|program| state.listing(program, viewer)))
    }

    async fn admin_list(&self) -> Result<Vec<AdminProgramListing>, ProgramRepositoryError> {
        let state = self.state.lock().await;
        state
            .newest_first()
            .into_iter()
            .map(|program| -> Result<AdminProgramListing, ProgramRepositoryError> {
                let mentor = state.accounts.get(&program.mentor_id()).cloned().ok_or_else(|| {
                    ProgramRepositoryError::query(format!(
                        "mentor {} missing for program {}",
                        program.mentor_id(),
                        program.id()
                    ))
                })?;
                Ok(AdminProgramListing {
                    program: program.clone(),
                    mentor,
                    joined_count: state.joined_count(program.id()),
                })
            })
            .collect()
    }
}

#[async_trait]
impl AccountDirectory for InMemoryProgramStore {
    async fn find_account(
        &self,
        account_id: UserId,
    ) -> Result<Option<MentorSummary>, AccountDirectoryError> {
        Ok(self.state.lock().await.accounts.get(&account_id).cloned())
    }

    async fn resolve_profile(
        &self,
        profile_id: ProfileId,
    ) -> Result<Option<UserId>, AccountDirectoryError> {
        Ok(self.state.lock().await.profiles.get(&profile_id).copied())
    }
}

#[async_trait]
impl NotificationSink for InMemoryProgramStore {
    async fn notify(&self, draft: &NotificationDraft) -> Result<(), NotificationSinkError> {
        let notification = Notification {
            id: NotificationId::random(),
            user_id: draft.user_id,
            title: draft.title().to_owned(),
            message: draft.message.clone(),
            category: draft.category,
            read: false,
            created_at: self.clock.utc(),
        };
        self.state.lock().await.notifications.push(notification);
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Notification>, NotificationSinkError> {
        let state = self.state.lock().await;
        let mut listed: Vec<Notification> = state
            .notifications
            .iter()
            .rev()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        // Stable sort: later insertions win timestamp ties.
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listed)
    }
}
