//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::Trace;
use crate::domain::{MentorSummary, ProgramService, UserId};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{admin, json_config, notifications, programs, query_config};
use crate::outbound::memory::InMemoryProgramStore;

/// Clock pinned to a fixed instant so handler payloads are deterministic.
pub struct FixedClock;

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 12, 9, 30, 0)
            .single()
            .expect("valid fixed timestamp")
    }
}

/// Build an app exposing every `/api/v1` handler over the given state.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .app_data(query_config())
        .wrap(Trace)
        .service(
            web::scope("/api/v1")
                .service(programs::create_program)
                .service(programs::list_programs)
                .service(programs::get_program)
                .service(programs::join_program)
                .service(admin::list_admin_programs)
                .service(notifications::list_notifications),
        )
}

/// In-memory store plus HTTP state wired through the real service.
pub struct MemoryBackend {
    pub store: InMemoryProgramStore,
    pub state: HttpState,
}

impl MemoryBackend {
    pub fn new() -> Self {
        let store = InMemoryProgramStore::new(Arc::new(FixedClock));
        let shared = Arc::new(store.clone());
        let service = ProgramService::new(
            shared.clone(),
            shared.clone(),
            shared,
            Arc::new(FixedClock),
        );
        Self {
            store,
            state: HttpState::from_service(Arc::new(service)),
        }
    }

    /// Register an account and return its identifier.
    pub async fn account(&self, display_name: &str) -> UserId {
        let id = UserId::random();
        self.store
            .insert_account(MentorSummary {
                id,
                display_name: display_name.to_owned(),
                email: format!("{}@example.org", display_name.to_lowercase()),
            })
            .await;
        id
    }
}
