use std::path::{Path, PathBuf};

use super::load::{apply_env_overrides, load_from_path};
use super::types::Settings;

/// Where the host keeps its configuration.
///
/// Backends call [`SettingsSource::load`] once per request so that edits made
/// while the process runs take effect on the next conversion.
pub trait SettingsSource: Send + Sync {
    fn load(&self) -> anyhow::Result<Settings>;
}

impl SettingsSource for Settings {
    fn load(&self) -> anyhow::Result<Settings> {
        Ok(self.clone())
    }
}

impl<T: SettingsSource + ?Sized> SettingsSource for std::sync::Arc<T> {
    fn load(&self) -> anyhow::Result<Settings> {
        (**self).load()
    }
}

/// A TOML settings file, re-read on every `load`.
#[derive(Debug, Clone)]
pub struct FileSettings {
    path: PathBuf,
    env_overrides: bool,
}

impl FileSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            env_overrides: true,
        }
    }

    pub fn without_env_overrides(mut self) -> Self {
        self.env_overrides = false;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist a new log folder, keeping the rest of the file intact.
    pub fn set_log_folder(&self, folder: Option<String>) -> anyhow::Result<Settings> {
        let mut settings = load_from_path(&self.path)?;
        settings.set_log_folder(folder);
        settings.save(&self.path)?;
        tracing::debug!(path = %self.path.display(), folder = ?settings.logging.folder, "log folder updated");
        Ok(settings)
    }
}

impl SettingsSource for FileSettings {
    fn load(&self) -> anyhow::Result<Settings> {
        let mut settings = load_from_path(&self.path)?;
        if self.env_overrides {
            apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JsonSpace;

    #[test]
    fn reloads_after_edit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parquet-viewer.toml");
        let source = FileSettings::new(&path).without_env_overrides();

        assert_eq!(source.load().unwrap().json.space, JsonSpace::Number(0));

        std::fs::write(&path, "[json]\nspace = 2\n").unwrap();
        assert_eq!(source.load().unwrap().json.space, JsonSpace::Number(2));
    }

    #[test]
    fn set_log_folder_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parquet-viewer.toml");
        std::fs::write(&path, "[json]\nspace = 2\n").unwrap();
        let source = FileSettings::new(&path).without_env_overrides();

        source.set_log_folder(Some("/tmp/logs".into())).unwrap();
        let reloaded = source.load().unwrap();
        assert_eq!(reloaded.logging.folder.as_deref(), Some("/tmp/logs"));
        assert_eq!(reloaded.json.space, JsonSpace::Number(2));

        source.set_log_folder(None).unwrap();
        assert_eq!(source.load().unwrap().logging.folder, None);
    }
}
