use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub json: JsonConfig,

    #[serde(default)]
    pub parquet_tools: ParquetToolsConfig,
}

impl Settings {
    pub fn log_level(&self) -> &str {
        &self.logging.level
    }

    /// Log folder with `~` expanded. Blank values count as unset.
    pub fn log_folder(&self) -> Option<String> {
        self.logging
            .folder
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| shellexpand::tilde(s).into_owned())
    }

    pub fn set_log_folder(&mut self, folder: Option<String>) {
        self.logging.folder = folder.filter(|s| !s.trim().is_empty());
    }

    pub fn json_space(&self) -> &JsonSpace {
        &self.json.space
    }

    pub fn parquet_tools_path(&self) -> Option<&str> {
        self.parquet_tools
            .path
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn save(&self, path: &std::path::Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// EnvFilter string, e.g. "info" or "parquet_viewer_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Directory receiving `parquet-viewer.log`. Unset disables the file.
    #[serde(default)]
    pub folder: Option<String>,

    /// If true, also log to stderr.
    #[serde(default)]
    pub console: bool,
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_logging_level(),
            folder: None,
            console: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonConfig {
    #[serde(default)]
    pub space: JsonSpace,
}

/// Indentation applied to every emitted row, with the same meaning as the
/// `space` argument of `JSON.stringify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum JsonSpace {
    Number(u64),
    Text(String),
}

impl JsonSpace {
    /// Widths below one mean no indent; fractions round down.
    pub fn width(n: f64) -> Self {
        if n >= 1.0 {
            JsonSpace::Number(n.floor() as u64)
        } else {
            JsonSpace::Number(0)
        }
    }
}

impl<'de> Deserialize<'de> for JsonSpace {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Float(f64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => JsonSpace::width(n as f64),
            Raw::Float(n) => JsonSpace::width(n),
            Raw::Text(s) => JsonSpace::Text(s),
        })
    }
}

impl Default for JsonSpace {
    fn default() -> Self {
        JsonSpace::Number(0)
    }
}

impl std::str::FromStr for JsonSpace {
    type Err = std::convert::Infallible;

    /// Finite numbers become a width, anything else is used verbatim.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<f64>() {
            Ok(n) if n.is_finite() => JsonSpace::width(n),
            _ => JsonSpace::Text(s.to_string()),
        })
    }
}

impl fmt::Display for JsonSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonSpace::Number(n) => write!(f, "{n}"),
            JsonSpace::Text(s) => write!(f, "{s:?}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParquetToolsConfig {
    /// `parquet-tools` launcher or jar. Unset means `parquet-tools` on PATH.
    #[serde(default)]
    pub path: Option<String>,

    /// Java executable used for `.jar` paths.
    #[serde(default = "default_java")]
    pub java: String,
}

fn default_java() -> String {
    "java".to_string()
}

impl Default for ParquetToolsConfig {
    fn default() -> Self {
        Self {
            path: None,
            java: default_java(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_toml_yields_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.log_level(), "info");
        assert_eq!(settings.json_space(), &JsonSpace::Number(0));
        assert_eq!(settings.parquet_tools.java, "java");
    }

    #[test]
    fn space_accepts_numbers_and_strings() {
        let s: Settings = toml::from_str("[json]\nspace = 4\n").unwrap();
        assert_eq!(s.json.space, JsonSpace::Number(4));

        let s: Settings = toml::from_str("[json]\nspace = \"\\t\"\n").unwrap();
        assert_eq!(s.json.space, JsonSpace::Text("\t".into()));
    }

    #[test]
    fn blank_folder_is_unset() {
        let mut s = Settings::default();
        s.logging.folder = Some("   ".into());
        assert_eq!(s.log_folder(), None);

        s.set_log_folder(Some(String::new()));
        assert_eq!(s.logging.folder, None);

        s.set_log_folder(Some("/var/log/pv".into()));
        assert_eq!(s.log_folder().as_deref(), Some("/var/log/pv"));
    }

    #[test]
    fn space_from_str() {
        assert_eq!("10".parse::<JsonSpace>().unwrap(), JsonSpace::Number(10));
        assert_eq!("###".parse::<JsonSpace>().unwrap(), JsonSpace::Text("###".into()));
        assert_eq!("  ".parse::<JsonSpace>().unwrap(), JsonSpace::Text("  ".into()));
        assert_eq!("inf".parse::<JsonSpace>().unwrap(), JsonSpace::Text("inf".into()));
    }

    #[test]
    fn negative_and_fractional_widths_follow_stringify() {
        assert_eq!("-1".parse::<JsonSpace>().unwrap(), JsonSpace::Number(0));
        assert_eq!("0.5".parse::<JsonSpace>().unwrap(), JsonSpace::Number(0));
        assert_eq!("2.5".parse::<JsonSpace>().unwrap(), JsonSpace::Number(2));

        let s: Settings = toml::from_str("[json]\nspace = -1\n").unwrap();
        assert_eq!(s.json.space, JsonSpace::Number(0));
        let s: Settings = toml::from_str("[json]\nspace = 2.5\n").unwrap();
        assert_eq!(s.json.space, JsonSpace::Number(2));
    }

    #[test]
    fn save_round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut s = Settings::default();
        s.json.space = JsonSpace::Text("  ".into());
        s.parquet_tools.path = Some("/opt/parquet-tools.jar".into());
        s.save(&path).unwrap();

        let loaded: Settings = toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, s);
    }
}
