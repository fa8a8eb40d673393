//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Adapters translate between Diesel rows and domain types and contain no
//! business rules beyond the enrollment lock. Row structs (`models.rs`) and
//! table definitions (`schema.rs`) stay private to this module.
//!
//! # Example
//!
//! ```ignore
//! use mentorship::outbound::persistence::{DbPool, DieselProgramRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/mentorship")).await?;
//! let repo = DieselProgramRepository::new(pool);
//! ```

mod diesel_account_directory;
mod diesel_basic_error_mapping;
mod diesel_notification_sink;
mod diesel_program_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_account_directory::DieselAccountDirectory;
pub use diesel_notification_sink::DieselNotificationSink;
pub use diesel_program_repository::DieselProgramRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
