use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Viewer(#[from] ViewerError),
    #[error("command failed: {0}")]
    Command(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("no such file or directory, stat '{}'", .path.display())]
    NotFound { path: PathBuf },
    #[error("spawn failed: {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("stream io error: {stream} {source}")]
    StreamIo {
        stream: &'static str,
        source: std::io::Error,
    },
    #[error("error when running parquet-tools (exit code {}):\n{stderr}", exit_label(.code))]
    ToolFailed { code: Option<i32>, stderr: String },
    #[error("invalid JSON row from parquet-tools: {line}")]
    InvalidJson {
        line: String,
        source: serde_json::Error,
    },
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("plugin error: {0}")]
    Plugin(#[from] anyhow::Error),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => c.to_string(),
        None => "none".to_string(),
    }
}

impl ViewerError {
    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        // 11: config error
        // 20: missing input / spawn / IO error
        // 30: parquet-tools failed
        // 50: internal/uncategorized
        match self {
            ViewerError::Config(_) => 11,
            ViewerError::NotFound { .. }
            | ViewerError::Spawn { .. }
            | ViewerError::StreamIo { .. }
            | ViewerError::Io(_) => 20,
            ViewerError::ToolFailed { .. } | ViewerError::InvalidJson { .. } => 30,
            ViewerError::Plugin(_) => 50,
        }
    }
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Viewer(e) => e.exit_code(),
            CliError::Config(_) => 11,
            CliError::Io(_) | CliError::Command(_) => 20,
            CliError::Anyhow(_) => 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_mentions_stat_and_path() {
        let err = ViewerError::NotFound {
            path: PathBuf::from("no-such-file"),
        };
        assert_eq!(
            err.to_string(),
            "no such file or directory, stat 'no-such-file'"
        );
        assert_eq!(err.exit_code(), 20);
    }

    #[test]
    fn tool_failure_carries_stderr() {
        let err = ViewerError::ToolFailed {
            code: Some(1),
            stderr: "java.io.IOException: not a Parquet file".into(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("error when running parquet-tools (exit code 1):\n"));
        assert!(msg.ends_with("not a Parquet file"));
        assert_eq!(CliError::from(err).exit_code(), 30);
    }
}
