//! CLI route: single route table and run context. Dispatches to the session and presentation.

use crate::cli::help::command_name;
use crate::cli::output::ConsoleSink;
use crate::cli::parse::{Cli, Commands};
use crate::cli::presentation::{
    format_answer, format_artifact_json, format_artifact_text, format_documents_json,
    format_documents_text,
};
use crate::config::{ConfigLoader, CopilotConfig};
use crate::error::ApiError;
use crate::notify::{Notification, NotificationSink};
use crate::service::{AnalysisService, HttpAnalysisClient};
use crate::session::Session;
use crate::types::UploadFile;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Runtime context for CLI execution: config, the live session, and the async runtime.
///
/// Every `Err` returned by `execute` has already been reported to the sink.
pub struct RunContext {
    config: CopilotConfig,
    session: Session,
    sink: Arc<dyn NotificationSink>,
    runtime: tokio::runtime::Runtime,
    json: bool,
}

impl RunContext {
    /// Load configuration the way the CLI flags ask for, with flag overrides applied.
    pub fn load_config(cli: &Cli) -> Result<CopilotConfig, ApiError> {
        let mut config = if let Some(ref path) = cli.config {
            ConfigLoader::load_from_file(path)?
        } else {
            ConfigLoader::load(&cli.workspace)?
        };
        if let Some(ref namespace) = cli.namespace {
            config.session.namespace = namespace.clone();
        }
        if let Some(ref url) = cli.service_url {
            config.service.base_url = url.clone();
        }
        config.validated()
    }

    /// Create a run context talking to the configured HTTP service.
    pub fn new(cli: &Cli) -> Result<Self, ApiError> {
        let config = Self::load_config(cli)?;
        let service = HttpAnalysisClient::with_timeouts(
            config.service.base_url.clone(),
            Duration::from_secs(config.service.connect_timeout_secs),
            config.service.request_timeout_secs.map(Duration::from_secs),
        )?;
        let sink = Arc::new(ConsoleSink::new(config.logging.color));
        Self::with_service(config, Arc::new(service), sink, cli.format == "json")
    }

    /// Create a run context over any service implementation.
    pub fn with_service(
        config: CopilotConfig,
        service: Arc<dyn AnalysisService>,
        sink: Arc<dyn NotificationSink>,
        json: bool,
    ) -> Result<Self, ApiError> {
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| ApiError::Config(format!("Failed to create async runtime: {}", e)))?;
        let session = Session::new(
            config.session.namespace.clone(),
            service,
            Arc::clone(&sink),
        );
        info!(
            origin = %config.service.base_url,
            namespace = %config.session.namespace,
            "Session created"
        );
        Ok(Self {
            config,
            session,
            sink,
            runtime,
            json,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn service_origin(&self) -> &str {
        &self.config.service.base_url
    }

    pub(crate) fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    pub(crate) fn report(&self, notification: Notification) {
        self.sink.notify(notification);
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let _span = tracing::info_span!("command", name = command_name(command)).entered();
        match command {
            Commands::List => {
                let documents = self.block_on(self.session.refresh())?;
                let selection = self.session.selection().names();
                Ok(if self.json {
                    format_documents_json(&documents, &selection)
                } else {
                    format_documents_text(&documents, &selection)
                })
            }
            Commands::Upload { path } => {
                let file = UploadFile::from_path(path).map_err(|e| {
                    self.report(Notification::failure(format!(
                        "Failed to read {}: {}",
                        path.display(),
                        e
                    )));
                    e
                })?;
                let receipt = self.block_on(self.session.upload(Some(&file)))?;
                Ok(if self.json {
                    serde_json::to_string_pretty(&receipt).unwrap_or_else(|_| "{}".to_string())
                } else {
                    format!(
                        "Uploaded {} into namespace {}",
                        receipt.filename, receipt.namespace
                    )
                })
            }
            Commands::Delete { name } => {
                self.block_on(self.session.delete(name))?;
                Ok(format!("Deleted {}", name))
            }
            Commands::Build { names, raw_text } => {
                self.session.clear_selection();
                for name in names {
                    self.session.toggle(name);
                }
                let artifact = self.block_on(self.session.build(*raw_text))?;
                Ok(if self.json {
                    format_artifact_json(&artifact)
                } else {
                    format_artifact_text(&artifact)
                })
            }
            Commands::Ask { question } => {
                let answer = self.block_on(self.session.ask(question))?;
                Ok(if self.json {
                    serde_json::json!({ "answer": answer.as_str() }).to_string()
                } else {
                    format_answer(&answer)
                })
            }
            Commands::Shell => super::shell::run_shell(self),
            Commands::Config => self.config.to_toml().map_err(|e| {
                self.report(Notification::failure(e.to_string()));
                e
            }),
        }
    }
}
