//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `parquet_viewer_core::api` instead of reaching into internal modules.

pub use crate::backend::{JsonLines, ParquetBackend};
pub use crate::cancel::{CancellationFlag, CancellationSignal, Never};
pub use crate::config::{
    default_config_path, FileSettings, JsonConfig, JsonSpace, LoggingConfig,
    ParquetToolsConfig, Settings, SettingsSource,
};
pub use crate::error::{CliError, ViewerError};
pub use crate::json::reindent;
pub use crate::logging::{LogFormat, LogSink, LOG_FILE_NAME, LOG_LABEL};
pub use crate::provider::{Notifier, ParquetContentProvider, StderrNotifier, VirtualUri};
pub use crate::runner::{RunOutcome, RunnerPlugin, RunnerSession, ToolCommand};
