mod load;
mod source;
mod types;

pub use load::{
    default_config_path, get_viewer_data_dir, load_from_path, local_config_path,
};
pub use source::{FileSettings, SettingsSource};
pub use types::{JsonConfig, JsonSpace, LoggingConfig, ParquetToolsConfig, Settings};
