//! HTTP inbound adapter exposing REST endpoints.

pub mod admin;
pub mod error;
pub mod health;
pub mod notifications;
pub mod programs;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::{ApiResult, json_config, query_config};
