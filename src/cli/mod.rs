//! CLI module for the LawboxAI client registry
//!
//! Provides command-line parsing for the `lawbox-registry` binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod init;
pub mod output;
pub mod show;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// LawboxAI client registry
///
/// Inspects and scaffolds the configuration used to build the chat LLM,
/// cloud LLM and vector-database handles.
#[derive(Parser, Debug)]
#[command(
    name = "lawbox-registry",
    version,
    about = "Inspect and scaffold LawboxAI client configuration",
    after_help = "EXAMPLES:\n    \
                  lawbox-registry init                  # Write lawbox.toml and .env.example\n    \
                  lawbox-registry config                # Show the handles that would be built\n    \
                  lawbox-registry config --validate     # Only check the configuration\n    \
                  lawbox-registry --config my.toml config --full"
)]
pub struct Cli {
    /// Path to the configuration file (the environment is used when absent)
    #[arg(short, long, default_value = "lawbox.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default lawbox.toml and .env.example
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,

        /// Enable the Groq secondary model in the generated file
        #[arg(long)]
        with_secondary: bool,
    },

    /// Show configuration information
    Config {
        /// Also print the fully resolved configuration
        #[arg(short = 'f', long)]
        full: bool,

        /// Only validate the configuration
        #[arg(long)]
        validate: bool,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
