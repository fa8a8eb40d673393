//! Tests for the mentorship program service.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, TimeZone, Utc};
use futures_util::future::join_all;
use mockable::Clock;
use rstest::{fixture, rstest};
use tokio::sync::mpsc;

use super::*;
use crate::domain::ports::{
    MockAccountDirectory, MockNotificationSink, MockProgramRepository,
};
use crate::domain::{
    Capacity, ErrorCode, MentorSummary, NotificationCategory, ProgramListing,
};
use crate::outbound::memory::InMemoryProgramStore;

struct FixtureClock;

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 1, 10, 30, 0)
            .single()
            .expect("valid timestamp")
    }
}

type MockService = ProgramService<MockProgramRepository, MockAccountDirectory, MockNotificationSink>;

fn service(
    programs: MockProgramRepository,
    accounts: MockAccountDirectory,
    notifications: MockNotificationSink,
) -> MockService {
    ProgramService::new(
        Arc::new(programs),
        Arc::new(accounts),
        Arc::new(notifications),
        Arc::new(FixtureClock),
    )
}

fn account(id: UserId) -> MentorSummary {
    MentorSummary {
        id,
        display_name: "Ada Mentor".to_owned(),
        email: "ada@example.org".to_owned(),
    }
}

fn create_request(mentor_id: UserId, capacity: i64) -> CreateProgramRequest {
    CreateProgramRequest {
        mentor_id,
        subject: "Career planning".to_owned(),
        description: Some("Fortnightly calls".to_owned()),
        community_link: "https://chat.example.org/career".to_owned(),
        capacity,
    }
}

fn active_listing(program_id: ProgramId, capacity: i64) -> ProgramListing {
    let program = Program::new(ProgramDraft {
        id: program_id,
        mentor_id: UserId::random(),
        subject: "Career planning".to_owned(),
        description: None,
        community_link: "https://chat.example.org/career".to_owned(),
        capacity,
        active: true,
        created_at: FixtureClock.utc(),
    })
    .expect("valid program");
    ProgramListing {
        program,
        joined_count: 0,
        joined_by_viewer: false,
    }
}

fn directory_knowing(id: UserId) -> MockAccountDirectory {
    let mut accounts = MockAccountDirectory::new();
    accounts
        .expect_find_account()
        .returning(move |requested| Ok((requested == id).then(|| account(id))));
    accounts
}

fn recording_sink() -> (MockNotificationSink, mpsc::UnboundedReceiver<NotificationDraft>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut sink = MockNotificationSink::new();
    sink.expect_notify().times(1).returning(move |draft| {
        let _ = tx.send(draft.clone());
        Ok(())
    });
    (sink, rx)
}

async fn next_notification(rx: &mut mpsc::UnboundedReceiver<NotificationDraft>) -> NotificationDraft {
    tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("notification dispatched in time")
        .expect("channel open")
}

#[rstest]
#[tokio::test]
async fn create_program_persists_active_program_for_known_mentor() {
    let mentor = UserId::random();
    let mut programs = MockProgramRepository::new();
    programs.expect_create().times(1).return_once(|_| Ok(()));

    let payload = service(programs, directory_knowing(mentor), MockNotificationSink::new())
        .create_program(create_request(mentor, 2))
        .await
        .expect("create succeeds");

    assert_eq!(payload.mentor_id, mentor);
    assert!(payload.active);
    assert_eq!(payload.capacity, 2);
    assert_eq!(payload.joined_count, 0);
    assert_eq!(payload.created_at, FixtureClock.utc());
}

#[rstest]
#[tokio::test]
async fn create_program_falls_back_to_profile_lookup_once() {
    let owner = UserId::random();
    let profile_as_user = UserId::random();

    let mut accounts = MockAccountDirectory::new();
    accounts
        .expect_find_account()
        .times(1)
        .return_once(|_| Ok(None));
    accounts
        .expect_resolve_profile()
        .times(1)
        .withf(move |profile| profile.as_uuid() == profile_as_user.as_uuid())
        .return_once(move |_| Ok(Some(owner)));
    let mut programs = MockProgramRepository::new();
    programs
        .expect_create()
        .times(1)
        .withf(move |program| program.mentor_id() == owner)
        .return_once(|_| Ok(()));

    let payload = service(programs, accounts, MockNotificationSink::new())
        .create_program(create_request(profile_as_user, 3))
        .await
        .expect("create succeeds");

    assert_eq!(payload.mentor_id, owner);
}

#[rstest]
#[tokio::test]
async fn create_program_rejects_unknown_mentor() {
    let mut accounts = MockAccountDirectory::new();
    accounts
        .expect_find_account()
        .times(1)
        .return_once(|_| Ok(None));
    accounts
        .expect_resolve_profile()
        .times(1)
        .return_once(|_| Ok(None));
    let mut programs = MockProgramRepository::new();
    programs.expect_create().times(0);

    let error = service(programs, accounts, MockNotificationSink::new())
        .create_program(create_request(UserId::random(), 2))
        .await
        .expect_err("unknown mentor");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(0)]
#[case(-3)]
#[tokio::test]
async fn create_program_rejects_non_positive_capacity(#[case] capacity: i64) {
    let mut accounts = MockAccountDirectory::new();
    accounts.expect_find_account().times(0);
    let mut programs = MockProgramRepository::new();
    programs.expect_create().times(0);

    let error = service(programs, accounts, MockNotificationSink::new())
        .create_program(create_request(UserId::random(), capacity))
        .await
        .expect_err("invalid capacity");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let field = error
        .details()
        .and_then(|details| details.get("field"))
        .and_then(|field| field.as_str());
    assert_eq!(field, Some("capacity"));
}

#[rstest]
#[tokio::test]
async fn create_program_maps_connection_error_to_service_unavailable() {
    let mentor = UserId::random();
    let mut programs = MockProgramRepository::new();
    programs
        .expect_create()
        .times(1)
        .return_once(|_| Err(ProgramRepositoryError::connection("pool exhausted")));

    let error = service(programs, directory_knowing(mentor), MockNotificationSink::new())
        .create_program(create_request(mentor, 2))
        .await
        .expect_err("store unavailable");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn join_program_enrolls_and_notifies_mentee() {
    let program_id = ProgramId::random();
    let mentee = UserId::random();
    let mut programs = MockProgramRepository::new();
    programs
        .expect_find_with_count()
        .times(1)
        .return_once(move |_, _| Ok(Some(active_listing(program_id, 2))));
    programs
        .expect_enroll()
        .times(1)
        .returning(|enrollment| Ok(EnrollmentOutcome::Enrolled(enrollment.clone())));
    let (sink, mut rx) = recording_sink();

    let payload = service(programs, directory_knowing(mentee), sink)
        .join_program(JoinProgramRequest {
            program_id,
            mentee_id: mentee,
        })
        .await
        .expect("join succeeds");

    assert_eq!(payload.program_id, program_id);
    assert_eq!(payload.mentee_id, mentee);
    let sent = next_notification(&mut rx).await;
    assert_eq!(sent.category, NotificationCategory::ProgramJoined);
    assert_eq!(sent.user_id, mentee);
}

#[rstest]
#[tokio::test]
async fn join_full_program_fails_with_program_full_and_notifies() {
    let program_id = ProgramId::random();
    let mentee = UserId::random();
    let mut programs = MockProgramRepository::new();
    programs
        .expect_find_with_count()
        .return_once(move |_, _| Ok(Some(active_listing(program_id, 1))));
    programs.expect_enroll().times(1).return_once(|_| {
        Ok(EnrollmentOutcome::ProgramFull {
            capacity: Capacity::new(1).expect("positive"),
            joined_count: 1,
        })
    });
    let (sink, mut rx) = recording_sink();

    let error = service(programs, directory_knowing(mentee), sink)
        .join_program(JoinProgramRequest {
            program_id,
            mentee_id: mentee,
        })
        .await
        .expect_err("program full");

    assert_eq!(error.code(), ErrorCode::ProgramFull);
    assert_eq!(error.message(), "program is full");
    let sent = next_notification(&mut rx).await;
    assert_eq!(sent.category, NotificationCategory::ProgramFull);
}

#[rstest]
#[tokio::test]
async fn join_twice_fails_with_already_joined_and_notifies() {
    let program_id = ProgramId::random();
    let mentee = UserId::random();
    let mut programs = MockProgramRepository::new();
    programs
        .expect_find_with_count()
        .return_once(move |_, _| Ok(Some(active_listing(program_id, 3))));
    programs
        .expect_enroll()
        .times(1)
        .return_once(|_| Ok(EnrollmentOutcome::AlreadyJoined));
    let (sink, mut rx) = recording_sink();

    let error = service(programs, directory_knowing(mentee), sink)
        .join_program(JoinProgramRequest {
            program_id,
            mentee_id: mentee,
        })
        .await
        .expect_err("duplicate join");

    assert_eq!(error.code(), ErrorCode::AlreadyJoined);
    assert_eq!(error.message(), "already joined this program");
    let sent = next_notification(&mut rx).await;
    assert_eq!(sent.category, NotificationCategory::ProgramAlreadyJoined);
}

#[rstest]
#[tokio::test]
async fn join_inactive_program_is_not_found() {
    let program_id = ProgramId::random();
    let mut programs = MockProgramRepository::new();
    programs.expect_find_with_count().return_once(move |_, _| {
        let mut listing = active_listing(program_id, 2);
        listing.program = listing.program.with_active(false);
        Ok(Some(listing))
    });
    programs.expect_enroll().times(0);
    let mut sink = MockNotificationSink::new();
    sink.expect_notify().times(0);

    let error = service(programs, MockAccountDirectory::new(), sink)
        .join_program(JoinProgramRequest {
            program_id,
            mentee_id: UserId::random(),
        })
        .await
        .expect_err("inactive program");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "program not found or inactive");
}

#[rstest]
#[tokio::test]
async fn notification_failure_does_not_fail_join() {
    let program_id = ProgramId::random();
    let mentee = UserId::random();
    let mut programs = MockProgramRepository::new();
    programs
        .expect_find_with_count()
        .return_once(move |_, _| Ok(Some(active_listing(program_id, 2))));
    programs
        .expect_enroll()
        .returning(|enrollment| Ok(EnrollmentOutcome::Enrolled(enrollment.clone())));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut sink = MockNotificationSink::new();
    sink.expect_notify().times(1).returning(move |_| {
        let _ = tx.send(());
        Err(NotificationSinkError::connection("sink offline"))
    });

    let result = service(programs, directory_knowing(mentee), sink)
        .join_program(JoinProgramRequest {
            program_id,
            mentee_id: mentee,
        })
        .await;

    assert!(result.is_ok());
    tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("dispatch attempted");
}

#[rstest]
#[tokio::test]
async fn get_program_returns_not_found_when_missing() {
    let mut programs = MockProgramRepository::new();
    programs
        .expect_find_with_count()
        .times(1)
        .return_once(|_, _| Ok(None));

    let error = service(
        programs,
        MockAccountDirectory::new(),
        MockNotificationSink::new(),
    )
    .get_program(GetProgramRequest {
        program_id: ProgramId::random(),
        viewer_id: None,
    })
    .await
    .expect_err("missing program");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

type StoreService = ProgramService<InMemoryProgramStore, InMemoryProgramStore, InMemoryProgramStore>;

struct StoreHarness {
    store: InMemoryProgramStore,
    service: StoreService,
}

impl StoreHarness {
    async fn account(&self) -> UserId {
        let id = UserId::random();
        self.store.insert_account(account(id)).await;
        id
    }

    async fn program(&self, capacity: i64) -> ProgramId {
        let mentor = self.account().await;
        self.service
            .create_program(create_request(mentor, capacity))
            .await
            .expect("create program")
            .id
    }

    async fn join(&self, program_id: ProgramId, mentee_id: UserId) -> Result<EnrollmentPayload, Error> {
        self.service
            .join_program(JoinProgramRequest {
                program_id,
                mentee_id,
            })
            .await
    }

    async fn joined_count(&self, program_id: ProgramId) -> u32 {
        self.service
            .get_program(GetProgramRequest {
                program_id,
                viewer_id: None,
            })
            .await
            .expect("program exists")
            .joined_count
    }
}

#[fixture]
fn harness() -> StoreHarness {
    let store = InMemoryProgramStore::new(Arc::new(FixtureClock));
    let shared = Arc::new(store.clone());
    StoreHarness {
        service: ProgramService::new(
            Arc::clone(&shared),
            Arc::clone(&shared),
            shared,
            Arc::new(FixtureClock),
        ),
        store,
    }
}

#[rstest]
#[tokio::test]
async fn capacity_two_scenario(harness: StoreHarness) {
    let program = harness.program(2).await;
    let (a, b, c) = (
        harness.account().await,
        harness.account().await,
        harness.account().await,
    );

    harness.join(program, a).await.expect("A joins");
    assert_eq!(harness.joined_count(program).await, 1);
    harness.join(program, b).await.expect("B joins");
    assert_eq!(harness.joined_count(program).await, 2);

    let full = harness.join(program, c).await.expect_err("C rejected");
    assert_eq!(full.code(), ErrorCode::ProgramFull);
    assert_eq!(harness.joined_count(program).await, 2);

    let again = harness.join(program, a).await.expect_err("A rejected");
    assert_eq!(again.code(), ErrorCode::AlreadyJoined);
    assert_eq!(harness.joined_count(program).await, 2);
}

#[rstest]
#[tokio::test]
async fn duplicate_join_with_room_is_already_joined(harness: StoreHarness) {
    let program = harness.program(3).await;
    let mentee = harness.account().await;

    harness.join(program, mentee).await.expect("first join");
    let again = harness.join(program, mentee).await.expect_err("second join");

    assert_eq!(again.code(), ErrorCode::AlreadyJoined);
    assert_eq!(harness.joined_count(program).await, 1);
}

#[rstest]
#[tokio::test]
async fn capacity_one_allows_exactly_one_join(harness: StoreHarness) {
    let program = harness.program(1).await;
    let first = harness.account().await;
    let second = harness.account().await;

    harness.join(program, first).await.expect("first join");
    let error = harness.join(program, second).await.expect_err("second join");

    assert_eq!(error.code(), ErrorCode::ProgramFull);
}

#[rstest]
#[tokio::test]
async fn listing_reports_counts_and_viewer_membership(harness: StoreHarness) {
    let program = harness.program(5).await;
    let mut members = Vec::new();
    for _ in 0..3 {
        let mentee = harness.account().await;
        harness.join(program, mentee).await.expect("join");
        members.push(mentee);
    }

    let as_member = harness
        .service
        .list_programs(ListProgramsRequest {
            viewer_id: members.first().copied(),
        })
        .await
        .expect("list as member");
    let as_outsider = harness
        .service
        .list_programs(ListProgramsRequest {
            viewer_id: Some(UserId::random()),
        })
        .await
        .expect("list as outsider");

    assert_eq!(as_member[0].joined_count, 3);
    assert!(as_member[0].joined_by_viewer);
    assert!(!as_outsider[0].joined_by_viewer);
}

#[rstest]
#[tokio::test]
async fn join_via_profile_id_enrolls_owning_account(harness: StoreHarness) {
    let program = harness.program(2).await;
    let owner = harness.account().await;
    let profile = crate::domain::ProfileId::random();
    harness.store.insert_profile(profile, owner).await;

    let enrollment = harness
        .join(program, UserId::from_uuid(*profile.as_uuid()))
        .await
        .expect("join through profile");

    assert_eq!(enrollment.mentee_id, owner);
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn parallel_joins_admit_exactly_capacity(harness: StoreHarness) {
    const CAPACITY: usize = 4;
    const ATTEMPTS: usize = 16;
    let program = harness.program(CAPACITY as i64).await;
    let mut mentees = Vec::with_capacity(ATTEMPTS);
    for _ in 0..ATTEMPTS {
        mentees.push(harness.account().await);
    }

    let attempts = mentees.into_iter().map(|mentee| {
        let service = harness.service.clone();
        tokio::spawn(async move {
            service
                .join_program(JoinProgramRequest {
                    program_id: program,
                    mentee_id: mentee,
                })
                .await
        })
    });
    let results: Vec<_> = join_all(attempts)
        .await
        .into_iter()
        .map(|joined| joined.expect("task completes"))
        .collect();

    let succeeded = results.iter().filter(|result| result.is_ok()).count();
    let full = results
        .iter()
        .filter(|result| matches!(result, Err(err) if err.code() == ErrorCode::ProgramFull))
        .count();
    assert_eq!(succeeded, CAPACITY);
    assert_eq!(full, ATTEMPTS - CAPACITY);
    assert_eq!(harness.store.enrollment_count(program).await, CAPACITY as u32);
}

#[rstest]
#[tokio::test]
async fn notifications_record_join_outcomes(harness: StoreHarness) {
    let program = harness.program(1).await;
    let mentee = harness.account().await;
    let late = harness.account().await;
    harness.join(program, mentee).await.expect("join");
    let _ = harness.join(program, late).await;

    let mut listed = Vec::new();
    for _ in 0..50 {
        listed = harness
            .service
            .list_notifications(late)
            .await
            .expect("list notifications");
        if !listed.is_empty() {
            break;
        }
        tokio::task::yield_now().await;
    }

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].category, NotificationCategory::ProgramFull);
    assert_eq!(listed[0].title, "Program full");
}
