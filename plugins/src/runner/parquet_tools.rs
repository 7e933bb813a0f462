use std::process::Stdio;
use std::time::Instant;

use anyhow::Result;
use async_trait::async_trait;
use parquet_viewer_core::api::{RunOutcome, RunnerPlugin, RunnerSession, ToolCommand, ViewerError};
use tokio::io::AsyncRead;
use tokio::process::{Child, Command};

/// Runs parquet-tools as a child process with captured stdout and stderr.
pub struct ParquetToolsRunnerPlugin {}

impl ParquetToolsRunnerPlugin {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for ParquetToolsRunnerPlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RunnerPlugin for ParquetToolsRunnerPlugin {
    fn name(&self) -> &str {
        "parquet-tools"
    }

    async fn start_session(&self, cmd: &ToolCommand) -> Result<Box<dyn RunnerSession>> {
        tracing::debug!("spawning {cmd}");
        let child = Command::new(&cmd.program)
            .args(&cmd.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ViewerError::Spawn {
                program: cmd.program.clone(),
                source,
            })?;

        Ok(Box::new(ParquetToolsSession {
            child,
            started: Instant::now(),
        }))
    }
}

struct ParquetToolsSession {
    child: Child,
    started: Instant,
}

#[async_trait]
impl RunnerSession for ParquetToolsSession {
    fn stdout(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>> {
        self.child
            .stdout
            .take()
            .map(|s| Box::new(s) as Box<dyn AsyncRead + Unpin + Send>)
    }

    fn stderr(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>> {
        self.child
            .stderr
            .take()
            .map(|s| Box::new(s) as Box<dyn AsyncRead + Unpin + Send>)
    }

    async fn kill(&mut self) -> Result<()> {
        self.child.kill().await?;
        Ok(())
    }

    async fn wait(&mut self) -> Result<RunOutcome> {
        let status = self.child.wait().await?;
        Ok(RunOutcome {
            exit_code: status.code(),
            duration_ms: Some(self.started.elapsed().as_millis() as u64),
        })
    }
}
