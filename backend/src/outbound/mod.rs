//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL-backed adapters using Diesel ORM.
//! - **memory**: process-local adapters used when no database is configured.
//!
//! Adapters translate between domain types and storage representations and
//! contain no business logic.

pub mod memory;
pub mod persistence;
