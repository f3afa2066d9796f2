//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for ontoctl using the `clap` crate.
//!
//! # Commands
//!
//! - **console**: Interactive terminal console (default)
//! - **list**, **show**: Browse versions
//! - **create**, **update**, **delete**: Manage versions
//! - **validate**: Generate graph, tree and table views for a file
//! - **download**: Save a version as `{name}.zip`
//! - **config**: Inspect and change settings
//!
//! # Examples
//!
//! ```
//! use clap::Parser;
//! use ontoctl::cli::{Cli, Commands};
//!
//! let cli = Cli::parse_from(["ontoctl", "list", "-s", "pizza"]);
//! assert!(matches!(cli.get_command(), Commands::List { .. }));
//! ```

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key=value (e.g., api_url=http://localhost:5000/api)
        #[arg(value_name = "KEY=VALUE")]
        setting: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve (e.g., download_dir)
        #[arg(value_name = "KEY")]
        key: String,
    },

    /// Print the config file location
    Path,
}

#[derive(Parser, Debug)]
#[command(name = "ontoctl")]
#[command(about = "Manage versioned ontology documents", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Version service base URL (overrides config and ONTOCTL_API_URL)
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Write logs to this file
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Open the interactive console
    #[command(visible_alias = "ui")]
    Console,

    /// List versions, newest first
    #[command(visible_alias = "ls")]
    List {
        /// Only versions whose name or description contains TERM
        #[arg(short = 's', long = "search", value_name = "TERM", default_value = "")]
        search: String,

        /// Page to show, starting at 1
        #[arg(short = 'p', long = "page", default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,

        /// Fetch every page
        #[arg(long = "all", conflicts_with = "page")]
        all: bool,
    },

    /// Show one version
    Show {
        id: i64,

        /// Also page through the source text
        #[arg(long = "source")]
        source: bool,
    },

    /// Create a version from a file
    #[command(visible_alias = "new")]
    Create {
        #[arg(short = 'n', long = "name")]
        name: Option<String>,

        #[arg(short = 'd', long = "description", default_value = "")]
        description: String,

        /// OWL/RDF or JSON-LD file
        file: PathBuf,
    },

    /// Update a version's name, description or source
    Update {
        id: i64,

        #[arg(short = 'n', long = "name")]
        name: Option<String>,

        #[arg(short = 'd', long = "description")]
        description: Option<String>,

        /// Replace the source with this file
        file: Option<PathBuf>,
    },

    /// Delete a version
    #[command(visible_alias = "rm")]
    Delete {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },

    /// Generate graph, tree and table views for a file
    Validate {
        file: PathBuf,

        /// Print the class tree
        #[arg(long = "tree")]
        tree: bool,

        /// Print the triple table
        #[arg(long = "table")]
        table: bool,

        /// Write the triple table as CSV
        #[arg(long = "csv", value_name = "OUT")]
        csv: Option<PathBuf>,

        /// Write the graph markup as an HTML file
        #[arg(long = "graph", value_name = "OUT")]
        graph: Option<PathBuf>,
    },

    /// Download a version as {name}.zip
    #[command(visible_alias = "dl")]
    Download {
        id: i64,

        /// Target directory (defaults to the configured download directory)
        #[arg(short = 'o', long = "output", value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to Console if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Console)
    }
}

/// Split `key=value`
///
/// # Errors
///
/// Returns a message when there is no `=` or the key is empty.
pub fn parse_setting(setting: &str) -> Result<(&str, &str), String> {
    match setting.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
        _ => Err(format!("Invalid setting '{setting}', expected KEY=VALUE")),
    }
}
