//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `scan`: analyze source files, report hardcoded text and key usage
//! - `sync`: reconcile code keys with the catalog (missing / unused / review)
//! - `health`: run health rules over all locales and score the catalog
//! - `init`: write a default `.keysyncrc.json`

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Print help and return `None` when no command was given.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Scan(args)) => args.common.verbose,
            Some(Command::Sync(args)) => args.common.verbose,
            Some(Command::Health(args)) => args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Arguments shared by every analysis command.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Project directory; the config file is searched upward from here
    #[arg(long, env = "KEYSYNC_SOURCE_ROOT")]
    pub source_root: Option<PathBuf>,

    /// Messages directory path (overrides config file)
    #[arg(long)]
    pub messages_root: Option<PathBuf>,

    /// Source locale (overrides config file)
    #[arg(long, alias = "primary-locale")]
    pub source_locale: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct SyncArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct HealthArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Minimum passing score, 0-100 (overrides `scoreThreshold`)
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
    pub threshold: Option<u32>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze source files: hardcoded text, translation key usage
    Scan(ScanArgs),
    /// Compare keys used in code with the catalog: missing, unused, needs review
    Sync(SyncArgs),
    /// Run health rules over every locale and compute a score
    Health(HealthArgs),
    /// Initialize a new .keysyncrc.json configuration file
    Init,
}
