//! Settings as seen by the CLI: the settings file plus command-line flags.
use std::path::PathBuf;

use parquet_viewer_core::api::{
    default_config_path, FileSettings, JsonSpace, Settings, SettingsSource,
};

use crate::commands::cli::Args;

#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub parquet_tools: Option<String>,
    pub java: Option<String>,
    pub space: Option<JsonSpace>,
    pub log_level: Option<String>,
    pub log_folder: Option<String>,
    pub log_console: bool,
}

impl Overrides {
    pub fn from_args(args: &Args) -> Self {
        Self {
            parquet_tools: args.parquet_tools.clone(),
            java: args.java.clone(),
            space: args.space.clone(),
            log_level: args.log_level.clone(),
            log_folder: args.log_folder.clone(),
            log_console: args.log_console,
        }
    }

    pub fn apply(&self, settings: &mut Settings) {
        if let Some(v) = &self.parquet_tools {
            settings.parquet_tools.path = Some(v.clone());
        }
        if let Some(v) = &self.java {
            settings.parquet_tools.java = v.clone();
        }
        if let Some(v) = &self.space {
            settings.json.space = v.clone();
        }
        if let Some(v) = &self.log_level {
            settings.logging.level = v.clone();
        }
        if let Some(v) = &self.log_folder {
            settings.set_log_folder(Some(v.clone()));
        }
        if self.log_console {
            settings.logging.console = true;
        }
    }
}

/// The settings file, re-read on each load, with flags layered on top.
pub struct CliSettings {
    file: FileSettings,
    overrides: Overrides,
}

impl CliSettings {
    pub fn new(file: FileSettings, overrides: Overrides) -> Self {
        Self { file, overrides }
    }

    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        let path: PathBuf = match &args.config {
            Some(p) => p.clone(),
            None => default_config_path()?,
        };
        Ok(Self::new(FileSettings::new(path), Overrides::from_args(args)))
    }

    pub fn file(&self) -> &FileSettings {
        &self.file
    }
}

impl SettingsSource for CliSettings {
    fn load(&self) -> anyhow::Result<Settings> {
        let mut settings = self.file.load()?;
        self.overrides.apply(&mut settings);
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parquet-viewer.toml");
        std::fs::write(
            &path,
            "[json]\nspace = 2\n\n[parquet_tools]\npath = \"/opt/a.jar\"\n",
        )
        .unwrap();

        let overrides = Overrides {
            space: Some(JsonSpace::Text("\t".into())),
            log_console: true,
            ..Default::default()
        };
        let source = CliSettings::new(FileSettings::new(&path).without_env_overrides(), overrides);
        let settings = source.load().unwrap();

        assert_eq!(settings.json.space, JsonSpace::Text("\t".into()));
        assert_eq!(settings.parquet_tools_path(), Some("/opt/a.jar"));
        assert!(settings.logging.console);
    }
}
