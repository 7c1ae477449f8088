//! Infrastructure layer modules
//!
//! This module contains shared infrastructure components:
//! - `config`: Connection parameters and retry settings from the environment
//! - `error`: Unified error types and exit status mapping
//! - `postgres`: Single-shot PostgreSQL connector and failure classification

pub mod config;
pub mod error;
pub mod postgres;
