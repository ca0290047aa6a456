// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `highway`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "highway",
    version,
    about = "Build the project's highway bundle and run the operations it provides.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// If omitted, `Highway.toml` in the current directory is used when it
    /// exists, otherwise built-in defaults.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `HIGHWAY_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the operations offered by the bundle.
    List,

    /// Build the bundle and run one of its operations.
    Run {
        /// Operation name.
        name: String,

        /// Extra arguments passed to the operation verbatim.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Build the bundle and print the path of its executable.
    Build,

    /// Update the bundle's dependencies.
    Update,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_keeps_trailing_arguments_verbatim() {
        let args = CliArgs::try_parse_from(["highway", "run", "deploy", "--force", "a b"]).unwrap();
        match args.command {
            Command::Run { name, args } => {
                assert_eq!(name, "deploy");
                assert_eq!(args, vec!["--force".to_string(), "a b".to_string()]);
            }
            other => panic!("expected run, got {other:?}"),
        }
    }

    #[test]
    fn global_flags_before_subcommand() {
        let args =
            CliArgs::try_parse_from(["highway", "--config", "x.toml", "--log-level", "debug", "list"])
                .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("x.toml")));
        assert!(matches!(args.log_level, Some(LogLevel::Debug)));
        assert!(matches!(args.command, Command::List));
    }
}
