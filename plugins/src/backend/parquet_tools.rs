use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_stream::try_stream;
use futures::Stream;
use parquet_viewer_core::api::{
    reindent, CancellationSignal, JsonLines, ParquetBackend, RunnerPlugin, SettingsSource,
    ToolCommand, ViewerError,
};
use parquet_viewer_core::runner::{LineReader, StderrTail};

use crate::runner::ParquetToolsRunnerPlugin;

/// Converts through `parquet-tools cat -j`, re-indenting every row with the
/// configured JSON spacing.
pub struct ParquetToolsBackend<R = ParquetToolsRunnerPlugin> {
    runner: Arc<R>,
    settings: Arc<dyn SettingsSource>,
}

impl ParquetToolsBackend<ParquetToolsRunnerPlugin> {
    pub fn new(settings: Arc<dyn SettingsSource>) -> Self {
        Self::with_runner(ParquetToolsRunnerPlugin::new(), settings)
    }
}

impl<R: RunnerPlugin + 'static> ParquetToolsBackend<R> {
    pub fn with_runner(runner: R, settings: Arc<dyn SettingsSource>) -> Self {
        Self {
            runner: Arc::new(runner),
            settings,
        }
    }
}

impl<R: RunnerPlugin + 'static> ParquetBackend for ParquetToolsBackend<R> {
    fn name(&self) -> &str {
        self.runner.name()
    }

    fn to_json(&self, path: &Path, cancel: Arc<dyn CancellationSignal>) -> JsonLines {
        Box::pin(rows(
            self.runner.clone(),
            self.settings.clone(),
            path.to_path_buf(),
            cancel,
        ))
    }
}

fn rows<R: RunnerPlugin + 'static>(
    runner: Arc<R>,
    settings: Arc<dyn SettingsSource>,
    path: PathBuf,
    cancel: Arc<dyn CancellationSignal>,
) -> impl Stream<Item = Result<String, ViewerError>> + Send {
    try_stream! {
        let settings = settings
            .load()
            .map_err(|e| ViewerError::Config(e.to_string()))?;

        tokio::fs::metadata(&path)
            .await
            .map_err(|e| stat_error(&path, e))?;
        let absolute = tokio::fs::canonicalize(&path)
            .await
            .map_err(|e| stat_error(&path, e))?;

        let cmd = ToolCommand::cat_json(&settings.parquet_tools, &absolute.to_string_lossy());
        let mut session = runner.start_session(&cmd).await.map_err(plugin_error)?;
        let stderr = StderrTail::spawn(session.stderr());
        let stdout = session.stdout().ok_or_else(|| ViewerError::StreamIo {
            stream: "stdout",
            source: io::Error::new(io::ErrorKind::BrokenPipe, "stdout was not captured"),
        })?;

        let space = settings.json.space.clone();
        let mut lines = LineReader::new(stdout, "stdout");
        let mut rows = 0u64;
        let mut cancelled = false;

        while let Some(line) = lines.next_line().await? {
            if cancel.is_cancellation_requested() {
                cancelled = true;
                break;
            }
            if line.trim().is_empty() {
                continue;
            }
            let row = reindent(&line, &space)?;
            rows += 1;
            yield row;
        }

        if cancelled {
            if let Err(e) = session.kill().await {
                tracing::warn!(error = %e, "failed to stop parquet-tools after cancellation");
            }
            tracing::debug!(rows, path = %absolute.display(), "conversion cancelled");
            return;
        }

        let outcome = session.wait().await.map_err(plugin_error)?;
        let stderr = stderr.finish().await;
        if !outcome.success() {
            tracing::error!(code = ?outcome.exit_code, "parquet-tools failed: {stderr}");
            Err::<(), _>(ViewerError::ToolFailed {
                code: outcome.exit_code,
                stderr,
            })?;
        }

        tracing::debug!(
            rows,
            duration_ms = ?outcome.duration_ms,
            path = %absolute.display(),
            "conversion finished"
        );
    }
}

fn stat_error(path: &Path, e: io::Error) -> ViewerError {
    if e.kind() == io::ErrorKind::NotFound {
        ViewerError::NotFound {
            path: path.to_path_buf(),
        }
    } else {
        ViewerError::Io(e)
    }
}

/// Keep typed errors raised by the runner, wrap anything else.
fn plugin_error(e: anyhow::Error) -> ViewerError {
    match e.downcast::<ViewerError>() {
        Ok(v) => v,
        Err(e) => ViewerError::Plugin(e),
    }
}
