//! Command-line interface for bmitrack.
//!
//! This module provides the CLI structure for the `bmit` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ComputeCommand, ConfigCommand, HistoryCommand, StatusCommand};

/// bmit - compute and track your Body Mass Index
///
/// Computes BMI from weight (pounds) and height (inches), stores every
/// computation locally, and shows the history most-recent-first.
#[derive(Debug, Parser)]
#[command(name = "bmit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute a BMI and record it
    Compute(ComputeCommand),

    /// Show recorded measurements, most recent first
    History(HistoryCommand),

    /// Show database location and record count
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "bmit");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_compute() {
        let cli = Cli::try_parse_from(["bmit", "compute", "150", "70"]).unwrap();
        match cli.command {
            Command::Compute(cmd) => {
                assert_eq!(cmd.weight, "150");
                assert_eq!(cmd.height, "70");
                assert!(!cmd.json);
            }
            _ => panic!("expected compute command"),
        }
    }

    #[test]
    fn test_parse_compute_accepts_empty_fields() {
        // Empty args flow through to input validation, like empty text fields.
        let cli = Cli::try_parse_from(["bmit", "compute", "", "70"]).unwrap();
        match cli.command {
            Command::Compute(cmd) => assert_eq!(cmd.weight, ""),
            _ => panic!("expected compute command"),
        }
    }

    #[test]
    fn test_parse_history_with_limit() {
        let cli = Cli::try_parse_from(["bmit", "history", "--limit", "10"]).unwrap();
        match cli.command {
            Command::History(cmd) => assert_eq!(cmd.limit, Some(10)),
            _ => panic!("expected history command"),
        }
    }

    #[test]
    fn test_parse_status_json() {
        let cli = Cli::try_parse_from(["bmit", "status", "--json"]).unwrap();
        match cli.command {
            Command::Status(cmd) => assert!(cmd.json),
            _ => panic!("expected status command"),
        }
    }

    #[test]
    fn test_parse_config_show() {
        let cli = Cli::try_parse_from(["bmit", "config", "show"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Show { json: false })
        ));
    }

    #[test]
    fn test_parse_config_validate_with_file() {
        let cli =
            Cli::try_parse_from(["bmit", "config", "validate", "-f", "/tmp/config.toml"]).unwrap();
        match cli.command {
            Command::Config(ConfigCommand::Validate { file }) => {
                assert_eq!(file, Some(PathBuf::from("/tmp/config.toml")));
            }
            _ => panic!("expected config validate command"),
        }
    }

    #[test]
    fn test_parse_with_config_flag() {
        let cli = Cli::try_parse_from(["bmit", "-c", "/custom/config.toml", "history"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_verbosity_mapping() {
        let quiet = Cli::try_parse_from(["bmit", "-q", "history"]).unwrap();
        assert_eq!(quiet.verbosity(), crate::logging::Verbosity::Quiet);

        let normal = Cli::try_parse_from(["bmit", "history"]).unwrap();
        assert_eq!(normal.verbosity(), crate::logging::Verbosity::Normal);

        let verbose = Cli::try_parse_from(["bmit", "-v", "history"]).unwrap();
        assert_eq!(verbose.verbosity(), crate::logging::Verbosity::Verbose);

        let trace = Cli::try_parse_from(["bmit", "-vv", "history"]).unwrap();
        assert_eq!(trace.verbosity(), crate::logging::Verbosity::Trace);
    }
}
