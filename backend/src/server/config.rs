//! HTTP server configuration object and helpers.

use mentorship::outbound::memory::AccountSeed;
use mentorship::outbound::persistence::DbPool;
use std::net::SocketAddr;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) account_seed: Option<AccountSeed>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: PrometheusMetrics,
}

impl ServerConfig {
    /// Construct a server configuration bound to `bind_addr`.
    #[cfg(not(feature = "metrics"))]
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            account_seed: None,
        }
    }

    /// Construct a server configuration bound to `bind_addr` that records
    /// request metrics into `prometheus`.
    #[cfg(feature = "metrics")]
    #[must_use]
    pub fn new(bind_addr: SocketAddr, prometheus: PrometheusMetrics) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            account_seed: None,
            prometheus,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// Without a pool the server keeps programs, enrollments, and
    /// notifications in process memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Accounts the in-memory store starts with when no pool is attached.
    ///
    /// Without a seed the store starts from [`AccountSeed::demo`].
    #[must_use]
    pub fn with_account_seed(mut self, seed: AccountSeed) -> Self {
        self.account_seed = Some(seed);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
