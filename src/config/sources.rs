//! Configuration sources, applied in ascending precedence.

pub mod environment;
pub mod global_file;
pub mod workspace_file;
