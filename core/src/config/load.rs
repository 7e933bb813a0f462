use std::path::{Path, PathBuf};

use super::types::{JsonSpace, Settings};

/// Get the default data directory: ~/.parquet-viewer
pub fn get_viewer_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".parquet-viewer"))
}

pub fn local_config_path() -> PathBuf {
    PathBuf::from("parquet-viewer.toml")
}

pub fn load_from_path(path: &Path) -> anyhow::Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let s = std::fs::read_to_string(path)?;
    let cfg = toml::from_str::<Settings>(&s)
        .map_err(|e| anyhow::anyhow!("invalid settings in {}: {e}", path.display()))?;
    Ok(cfg)
}

/// The settings file to use when none is given explicitly.
///
/// Priority: ~/.parquet-viewer/config.toml, then ./parquet-viewer.toml.
pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let user_config = get_viewer_data_dir()?.join("config.toml");
    if user_config.exists() {
        return Ok(user_config);
    }
    Ok(local_config_path())
}

/// Environment variable overrides (Priority 0: highest)
pub(crate) fn apply_env_overrides<F>(cfg: &mut Settings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("PARQUET_VIEWER_LOG_LEVEL") {
        cfg.logging.level = v;
    }
    if let Some(v) = get("PARQUET_VIEWER_LOG_FOLDER") {
        cfg.logging.folder = Some(v);
    }
    // Not trimmed: whitespace is a meaningful indent.
    if let Some(v) = lookup("PARQUET_VIEWER_JSON_SPACE").filter(|v| !v.is_empty()) {
        cfg.json.space = v.parse::<JsonSpace>().unwrap_or_default();
    }
    if let Some(v) = get("PARQUET_VIEWER_PARQUET_TOOLS") {
        cfg.parquet_tools.path = Some(v);
    }
}
