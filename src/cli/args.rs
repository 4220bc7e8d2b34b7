//! CLI argument definitions using clap.
//!
//! This module defines the command-line interface structure for all
//! locgrub commands. It uses clap's derive API for declarative argument
//! parsing.
//!
//! ## Commands
//!
//! - `update`: Scan source files and rewrite locale dictionaries
//! - `check`: Verify locale dictionaries are up to date (no writes)
//! - `init`: Initialize a locgrub configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::config::CONFIG_FILE_NAME;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Update(cmd)) => cmd.common.verbose,
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by scanning commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Path to the configuration file
    #[arg(short, long, default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct UpdateCommand {
    /// Root directories to scan for module directories
    #[arg(required = true)]
    pub dirs: Vec<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Root directories to scan for module directories
    #[arg(required = true)]
    pub dirs: Vec<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract translation keys and rewrite per-language locale files
    Update(UpdateCommand),
    /// Verify locale files are up to date without writing anything
    Check(CheckCommand),
    /// Initialize a new locale-grubber.config.json configuration file
    Init,
}
