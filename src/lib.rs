// Infrastructure layer (shared components)
pub mod infrastructure;

// Re-export infrastructure modules at the crate root
pub use infrastructure::config;
pub use infrastructure::error;
pub use infrastructure::postgres;

// Readiness probing
pub mod readiness;

// Entrypoint adapters
pub mod commands;

// Supporting modules
pub mod telemetry;
