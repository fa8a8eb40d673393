//! Apply embedded database migrations and exit.
//!
//! ```text
//! migrate --database-url postgres://localhost/mentorship
//! ```

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use mentorship::outbound::persistence::run_pending_migrations;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

/// Command-line arguments for the migration runner.
#[derive(Debug, Parser)]
#[command(name = "migrate", about = "Apply pending mentorship schema migrations")]
struct Args {
    /// PostgreSQL connection URL.
    #[arg(long, env = "MENTORSHIP_DATABASE_URL")]
    database_url: String,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();
    let applied = run_pending_migrations(&args.database_url)
        .wrap_err("failed to apply migrations")?;
    for version in &applied {
        info!(%version, "applied migration");
    }
    if applied.is_empty() {
        info!("schema already up to date");
    }
    Ok(())
}
