use std::fmt;

use crate::config::ParquetToolsConfig;

/// Launcher used when no parquet-tools path is configured.
pub const DEFAULT_PROGRAM: &str = "parquet-tools";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolCommand {
    /// Resolve how parquet-tools is launched: a jar goes through
    /// `java -jar`, anything else is executed directly.
    pub fn for_params<I, S>(cfg: &ParquetToolsConfig, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let params = params.into_iter().map(Into::into);
        let path = cfg
            .path
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        match path {
            None => Self {
                program: DEFAULT_PROGRAM.to_string(),
                args: params.collect(),
            },
            Some(jar) if jar.to_ascii_lowercase().ends_with(".jar") => Self {
                program: cfg.java.clone(),
                args: ["-jar".to_string(), jar.to_string()]
                    .into_iter()
                    .chain(params)
                    .collect(),
            },
            Some(bin) => Self {
                program: bin.to_string(),
                args: params.collect(),
            },
        }
    }

    pub fn cat_json(cfg: &ParquetToolsConfig, path: &str) -> Self {
        Self::for_params(cfg, ["cat", "-j", path])
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutcome {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub duration_ms: Option<u64>,
}

impl RunOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}
