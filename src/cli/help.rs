//! CLI command-name contract for logging spans.

use crate::cli::parse::Commands;

/// Command name string used in log spans (e.g. "upload", "build").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::List => "list",
        Commands::Upload { .. } => "upload",
        Commands::Delete { .. } => "delete",
        Commands::Build { .. } => "build",
        Commands::Ask { .. } => "ask",
        Commands::Shell => "shell",
        Commands::Config => "config",
    }
}
