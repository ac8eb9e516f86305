//! Config facade: one entry point that assembles every source in order.

use super::merge::merge_policy;
use super::sources::{environment, global_file, workspace_file};
use super::CopilotConfig;
use crate::error::ApiError;
use config::{File, FileFormat};
use std::path::Path;
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load defaults, global file, workspace files, then environment.
    pub fn load(workspace_root: &Path) -> Result<CopilotConfig, ApiError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);

        let config: CopilotConfig = builder.build()?.try_deserialize()?;
        debug!(workspace = %workspace_root.display(), "Configuration loaded");
        config.validated()
    }

    /// Load defaults, the given file (which must exist), then environment.
    pub fn load_from_file(path: &Path) -> Result<CopilotConfig, ApiError> {
        let builder = merge_policy::builder_with_defaults()?.add_source(
            File::from(path)
                .format(FileFormat::Toml)
                .required(true),
        );
        let builder = environment::add_to_builder(builder);

        let config: CopilotConfig = builder.build()?.try_deserialize()?;
        debug!(path = %path.display(), "Configuration loaded from file");
        config.validated()
    }

    /// Global config file location, if one can be determined.
    pub fn global_config_path() -> Option<std::path::PathBuf> {
        global_file::global_config_path()
    }
}
