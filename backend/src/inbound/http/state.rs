//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureProgramCommand, FixtureProgramQuery, ProgramCommand, ProgramQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub programs: Arc<dyn ProgramCommand>,
    pub programs_query: Arc<dyn ProgramQuery>,
}

impl HttpState {
    /// Construct state from the program command and query ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mentorship::domain::ports::{FixtureProgramCommand, FixtureProgramQuery};
    /// use mentorship::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixtureProgramCommand), Arc::new(FixtureProgramQuery));
    /// let _programs = state.programs.clone();
    /// ```
    pub fn new(programs: Arc<dyn ProgramCommand>, programs_query: Arc<dyn ProgramQuery>) -> Self {
        Self {
            programs,
            programs_query,
        }
    }

    /// Build state from one service implementing both driving ports.
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: ProgramCommand + ProgramQuery + 'static,
    {
        Self {
            programs: service.clone(),
            programs_query: service,
        }
    }
}

impl Default for HttpState {
    fn default() -> Self {
        Self::new(Arc::new(FixtureProgramCommand), Arc::new(FixtureProgramQuery))
    }
}
