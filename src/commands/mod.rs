//! Management commands and their dispatcher.
//!
//! `manage <command>` mirrors the host framework's command runner: each
//! command reports progress on stdout, failures on stderr, and signals
//! failure through `AppError` rather than exiting by itself.

pub mod wait_for_db;

pub use wait_for_db::WaitForDb;

use clap::{Parser, Subcommand};

use crate::config::Settings;
use crate::error::Result;
use crate::readiness::ProbeReporter;

#[derive(Debug, Parser)]
#[command(name = "manage", version, about = "Project management commands")]
pub struct Cli {
    #[command(subcommand)]
    pub command: ManageCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum ManageCommand {
    #[command(
        name = wait_for_db::NAME,
        about = wait_for_db::HELP,
        visible_alias = "wait-for-db"
    )]
    WaitForDb,
}

impl ManageCommand {
    pub fn name(&self) -> &'static str {
        match self {
            ManageCommand::WaitForDb => wait_for_db::NAME,
        }
    }

    /// Run the command with settings that were loaded once at startup.
    pub async fn dispatch(
        self,
        settings: Settings,
        reporter: &mut dyn ProbeReporter,
    ) -> Result<()> {
        tracing::debug!(command = self.name(), "Dispatching management command");

        match self {
            ManageCommand::WaitForDb => {
                WaitForDb::from_settings(&settings)
                    .handle(reporter)
                    .await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wait_for_db() {
        let cli = Cli::try_parse_from(["manage", "wait_for_db"]).unwrap();
        assert_eq!(cli.command, ManageCommand::WaitForDb);

        let cli = Cli::try_parse_from(["manage", "wait-for-db"]).unwrap();
        assert_eq!(cli.command.name(), "wait_for_db");
    }

    #[test]
    fn test_wait_for_db_takes_no_flags() {
        assert!(Cli::try_parse_from(["manage", "wait_for_db", "--retries", "3"]).is_err());
        assert!(Cli::try_parse_from(["manage"]).is_err());
    }
}
