//! Builders wiring the program service onto its driven adapters.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use mentorship::domain::ProgramService;
use mentorship::inbound::http::state::HttpState;
use mentorship::outbound::memory::{AccountSeed, InMemoryProgramStore};
use mentorship::outbound::persistence::{
    DbPool, DieselAccountDirectory, DieselNotificationSink, DieselProgramRepository,
};

use super::ServerConfig;

fn diesel_state(pool: &DbPool, clock: Arc<dyn Clock>) -> HttpState {
    let service = ProgramService::new(
        Arc::new(DieselProgramRepository::new(pool.clone())),
        Arc::new(DieselAccountDirectory::new(pool.clone())),
        Arc::new(DieselNotificationSink::new(pool.clone(), clock.clone())),
        clock,
    );
    HttpState::from_service(Arc::new(service))
}

fn memory_state(clock: Arc<dyn Clock>, seed: &AccountSeed) -> HttpState {
    let store = Arc::new(InMemoryProgramStore::seeded(clock.clone(), seed));
    let service = ProgramService::new(store.clone(), store.clone(), store, clock);
    HttpState::from_service(Arc::new(service))
}

/// Build HTTP state backed by PostgreSQL when a pool is configured and by
/// process memory otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let state = match &config.db_pool {
        Some(pool) => {
            info!(adapter = "diesel", "program service wired to PostgreSQL");
            diesel_state(pool, clock)
        }
        None => {
            let seed = config.account_seed.clone().unwrap_or_else(AccountSeed::demo);
            warn!(
                adapter = "memory",
                accounts = seed.accounts.len(),
                "no database configured; programs are kept in process memory"
            );
            for account in &seed.accounts {
                info!(
                    account_id = %account.id,
                    display_name = %account.display_name,
                    "seeded in-memory account"
                );
            }
            memory_state(clock, &seed)
        }
    };
    web::Data::new(state)
}
