mod settings;

pub use settings::{DatabaseConfig, Settings, SettingsError, WaitConfig};
