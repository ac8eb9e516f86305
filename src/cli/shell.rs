//! Interactive shell: one live session driven by typed commands.

use crate::cli::presentation::{
    format_answer, format_artifact_text, format_documents_text, format_status_text,
};
use crate::cli::route::RunContext;
use crate::error::ApiError;
use crate::notify::Notification;
use crate::selection::ToggleOutcome;
use crate::types::UploadFile;
use dialoguer::Input;
use std::path::PathBuf;

const SHELL_HELP: &str = "\
Commands:
  refresh                 fetch the document list
  upload <path>           upload a file into the namespace
  delete <name>           delete a document
  select <name>           toggle a document in the selection (max 3)
  clear                   empty the selection
  build [--raw-text]      build a graph from the selection
  ask <question>          query the graph
  namespace [<name>]      show or change the namespace
  status                  show session state
  help                    show this help
  quit                    leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Empty,
    Refresh,
    Upload(PathBuf),
    Delete(String),
    Select(String),
    Clear,
    Build { raw_text: bool },
    Ask(String),
    Namespace(Option<String>),
    Status,
    Help,
    Quit,
}

/// Parse one shell line. Arguments run to the end of the line, so document
/// names and questions may contain spaces.
pub fn parse_shell_line(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ShellCommand::Empty);
    }
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    let required = |what: &str| -> Result<String, String> {
        if rest.is_empty() {
            Err(format!("usage: {} <{}>", head, what))
        } else {
            Ok(rest.to_string())
        }
    };

    match head {
        "refresh" | "ls" | "list" => Ok(ShellCommand::Refresh),
        "upload" => required("path").map(|p| ShellCommand::Upload(PathBuf::from(p))),
        "delete" | "rm" => required("name").map(ShellCommand::Delete),
        "select" | "toggle" => required("name").map(ShellCommand::Select),
        "clear" => Ok(ShellCommand::Clear),
        "build" => match rest {
            "" => Ok(ShellCommand::Build { raw_text: false }),
            "--raw-text" | "raw" => Ok(ShellCommand::Build { raw_text: true }),
            other => Err(format!("unknown build option: {}", other)),
        },
        "ask" => Ok(ShellCommand::Ask(rest.to_string())),
        "namespace" | "ns" => Ok(ShellCommand::Namespace(
            (!rest.is_empty()).then(|| rest.to_string()),
        )),
        "status" => Ok(ShellCommand::Status),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" => Ok(ShellCommand::Quit),
        other => Err(format!("unknown command: {} (try 'help')", other)),
    }
}

/// Run the interactive loop until `quit` or end of input.
pub(crate) fn run_shell(ctx: &RunContext) -> Result<String, ApiError> {
    let session = ctx.session();
    println!("Connected to {}. Type 'help' for commands.", ctx.service_origin());
    ctx.block_on(session.refresh()).ok();

    loop {
        let prompt = match session.namespace() {
            ns if ns.is_empty() => "scicopilot".to_string(),
            ns => format!("scicopilot[{}]", ns),
        };
        let line: String = match Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => line,
            Err(e) => {
                tracing::debug!(error = %e, "Shell input closed");
                break;
            }
        };

        let command = match parse_shell_line(&line) {
            Ok(command) => command,
            Err(msg) => {
                eprintln!("{}", msg);
                continue;
            }
        };

        match command {
            ShellCommand::Empty => {}
            ShellCommand::Quit => break,
            ShellCommand::Help => println!("{}", SHELL_HELP),
            ShellCommand::Refresh => {
                if let Ok(documents) = ctx.block_on(session.refresh()) {
                    println!(
                        "{}",
                        format_documents_text(&documents, &session.selection().names())
                    );
                }
            }
            ShellCommand::Upload(path) => match UploadFile::from_path(&path) {
                Ok(file) => {
                    ctx.block_on(session.upload(Some(&file))).ok();
                }
                Err(e) => ctx.report(Notification::failure(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                ))),
            },
            ShellCommand::Delete(name) => {
                ctx.block_on(session.delete(&name)).ok();
            }
            ShellCommand::Select(name) => {
                // Mirrors the selection indicator; a full selection stays silent.
                let state = match session.toggle(&name) {
                    ToggleOutcome::Added => "selected",
                    ToggleOutcome::Removed => "deselected",
                    ToggleOutcome::AtCapacity => "not selected",
                };
                println!("{}: {}", name, state);
            }
            ShellCommand::Clear => session.clear_selection(),
            ShellCommand::Build { raw_text } => {
                if let Ok(artifact) = ctx.block_on(session.build(raw_text)) {
                    print!("{}", format_artifact_text(&artifact));
                }
            }
            ShellCommand::Ask(question) => {
                ctx.block_on(session.ask(&question)).ok();
                if let Some(answer) = session.answer() {
                    println!("{}", format_answer(&answer));
                }
            }
            ShellCommand::Namespace(Some(ns)) => session.set_namespace(ns),
            ShellCommand::Namespace(None) => println!("{}", session.namespace()),
            ShellCommand::Status => print!("{}", format_status_text(&session.snapshot())),
        }
    }

    Ok("Session closed.".to_string())
}
