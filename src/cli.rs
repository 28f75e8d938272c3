//! Command line interface built on clap.
//!
//! Defines [`Cli`] with the [`Command`] subcommands (run, once, check) and the
//! global `--config` and `--verbose` flags.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Watches the Practicum homework status API and reports changes to Telegram.
#[derive(Debug, Parser)]
#[command(name = "homework-watch", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the TOML config file (defaults to ./homework-watch.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Poll the status API until the process is stopped.
    Run {
        /// Seconds between polls, overriding the config file.
        #[arg(long)]
        interval: Option<u64>,

        /// Unix timestamp to start polling from (defaults to now).
        #[arg(long)]
        from_date: Option<i64>,

        /// Stop after this many iterations.
        #[arg(long)]
        iterations: Option<u64>,
    },

    /// Run a single poll iteration and exit.
    Once {
        /// Unix timestamp to start polling from (defaults to now).
        #[arg(long)]
        from_date: Option<i64>,
    },

    /// Verify credentials and print the effective configuration.
    Check,
}
