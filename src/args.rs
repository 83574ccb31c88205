//! Command-line argument definition for the diagnostic CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// tscat - context-scoped translation catalog and lookup engine
#[derive(Parser, Debug)]
#[command(name = "tscat")]
#[command(version)]
#[command(about = "Resolve and inspect Qt Linguist TS locale resources", long_about = None)]
pub struct Cli {
    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve one message against the loaded catalogs
    Resolve {
        /// Directory containing `.ts` locale resources
        #[arg(long)]
        locales_dir: PathBuf,

        /// Locale to activate (auto-detected from the environment if omitted)
        #[arg(long)]
        locale: Option<String>,

        /// Optional i18n.yml with default locale and fallback mappings
        #[arg(long)]
        config: Option<PathBuf>,

        /// Context grouping name (e.g., "AboutDialog")
        #[arg(long)]
        context: String,

        /// Source-language string to resolve
        source: String,

        /// Positional argument for `%1`..`%9` (repeatable, in order)
        #[arg(long = "arg")]
        args: Vec<String>,

        /// Plural count; selects the plural variant and substitutes `%n`
        #[arg(long)]
        count: Option<i64>,
    },

    /// Parse every resource in a directory and report entry totals
    Check {
        /// Directory containing `.ts` locale resources
        #[arg(long)]
        locales_dir: PathBuf,
    },
}
