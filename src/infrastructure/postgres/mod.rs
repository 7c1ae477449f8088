//! PostgreSQL connectivity module.
//!
//! Provides a single-shot connector for readiness probing and the mapping
//! from driver errors to readiness failure kinds.

mod classify;
mod connector;

pub use classify::{classify, classify_sqlstate};
pub use connector::PgConnector;
