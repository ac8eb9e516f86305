//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration; single route table dispatches to the session.

mod help;
mod output;
mod parse;
mod presentation;
mod route;
mod shell;

pub use help::command_name;
pub use output::{map_error, ConsoleSink};
pub use parse::{Cli, Commands};
pub use presentation::{
    format_answer, format_artifact_json, format_artifact_text, format_documents_json,
    format_documents_text, format_status_text,
};
pub use route::RunContext;
pub use shell::{parse_shell_line, ShellCommand};
