//! Backend entry-point: loads settings, wires persistence, and serves the
//! REST API with OpenAPI docs.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use mentorship::inbound::http::health::HealthState;
use mentorship::outbound::memory::AccountSeed;
use mentorship::outbound::persistence::{DbPool, run_pending_migrations};
use server::{ServerConfig, ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        ServerSettings::load().map_err(|err| eyre!("failed to load server settings: {err}"))?;
    let bind_addr = settings.bind_addr()?;
    let pool_config = settings.pool_config()?;

    #[cfg(feature = "metrics")]
    let config = ServerConfig::new(bind_addr, make_metrics()?);
    #[cfg(not(feature = "metrics"))]
    let config = ServerConfig::new(bind_addr);

    let mut health = HealthState::new();
    let config = match pool_config {
        Some(pool_config) => {
            if settings.run_migrations {
                let url = pool_config.database_url().to_owned();
                let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&url))
                    .await
                    .wrap_err("migration task panicked")??;
                info!(count = applied.len(), "applied pending migrations");
            }
            let pool = DbPool::new(pool_config)
                .await
                .wrap_err("failed to build database pool")?;
            health = health.with_pool(pool.clone());
            config.with_db_pool(pool)
        }
        None => match settings.accounts_file.as_deref() {
            Some(path) => config.with_account_seed(AccountSeed::from_path(path)?),
            None => config,
        },
    };

    let health_state = web::Data::new(health);
    info!(addr = %config.bind_addr(), "starting mentorship server");
    let server = create_server(health_state, config)?;
    server.await?;
    Ok(())
}

#[cfg(feature = "metrics")]
fn make_metrics() -> Result<actix_web_prom::PrometheusMetrics> {
    PrometheusMetricsBuilder::new("mentorship")
        .endpoint("/metrics")
        .build()
        .map_err(|err| eyre!("failed to configure Prometheus metrics: {err}"))
}
