//! CLI parse: clap types for scicopilot. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Science Copilot - manage a document corpus and query its knowledge graph
#[derive(Parser)]
#[command(name = "scicopilot")]
#[command(about = "Manage a document corpus and query its knowledge graph")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (for config/config.toml)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Namespace to work in (overrides session.namespace from config)
    #[arg(long, short = 'n')]
    pub namespace: Option<String>,

    /// Analysis service origin (overrides service.base_url from config)
    #[arg(long)]
    pub service_url: Option<String>,

    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Refresh and show the documents stored by the service
    List,
    /// Upload a document into the namespace
    Upload {
        /// Path of the file to upload
        path: PathBuf,
    },
    /// Delete a document by name
    Delete {
        /// Document name as shown by `list`
        name: String,
    },
    /// Select up to three documents and build a graph from them
    Build {
        /// Documents to select (names beyond the third are ignored)
        names: Vec<String>,
        /// Extract phrases from the raw text instead of noun phrases
        #[arg(long)]
        raw_text: bool,
    },
    /// Ask a question against the namespace graph
    Ask {
        /// Question text
        question: String,
    },
    /// Interactive session keeping selection and results between commands
    Shell,
    /// Print the effective configuration
    Config,
}
