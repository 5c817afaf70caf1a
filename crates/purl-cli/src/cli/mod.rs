//! CLI for the purl redirect toolkit.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use purl_core::config;
use std::path::PathBuf;

use commands::{
    run_check, run_completions, run_import, run_man, run_readme, run_sync, run_utm, run_verify,
};

/// Top-level CLI for the purl redirect toolkit.
#[derive(Debug, Parser)]
#[command(name = "purl")]
#[command(about = "purl: redirect table, static redirect pages and URL checks", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Generate or refresh redirect pages from the redirect table.
    Sync,

    /// Append URLs from a column of another CSV file to the redirect table.
    Import {
        /// Source CSV (delimiter is detected).
        source: PathBuf,
        /// 0-based index of the column holding the URLs.
        column: usize,
    },

    /// Add default utm_source/utm_campaign parameters to every URL.
    Utm,

    /// Check that every URL responds and notify the chat channel on failures.
    Check,

    /// Verify that every page on disk matches its table row.
    Verify,

    /// Regenerate the PURL list in the README.
    Readme,

    /// Print shell completions to stdout.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print the man page to stdout.
    Man,
}

impl CliCommand {
    /// Parse arguments, run the command, and return the process exit code.
    pub fn run_from_args() -> Result<i32> {
        let cli = Cli::parse();

        // Generators don't need config.
        match cli.command {
            CliCommand::Completions { shell } => return run_completions(shell).map(|_| 0),
            CliCommand::Man => return run_man().map(|_| 0),
            _ => {}
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let code = match cli.command {
            CliCommand::Sync => run_sync(&cfg)?,
            CliCommand::Import { source, column } => run_import(&cfg, &source, column)?,
            CliCommand::Utm => run_utm(&cfg)?,
            CliCommand::Check => run_check(&cfg)?,
            CliCommand::Verify => run_verify(&cfg)?,
            CliCommand::Readme => run_readme(&cfg)?,
            CliCommand::Completions { .. } | CliCommand::Man => 0,
        };

        Ok(code)
    }
}

#[cfg(test)]
mod tests;
