use parquet_viewer_core::api::{CliError, SettingsSource};

use crate::commands::cli::SetLogFolderArgs;
use crate::settings::CliSettings;

pub fn handle_show(settings: &CliSettings) -> Result<i32, CliError> {
    let effective = settings.load().map_err(|e| CliError::Config(e.to_string()))?;
    let text = toml::to_string_pretty(&effective).map_err(|e| CliError::Config(e.to_string()))?;
    println!("# {}", settings.file().path().display());
    print!("{text}");
    Ok(0)
}

pub fn handle_set_log_folder(
    args: SetLogFolderArgs,
    settings: &CliSettings,
) -> Result<i32, CliError> {
    let updated = settings
        .file()
        .set_log_folder(args.folder)
        .map_err(|e| CliError::Config(e.to_string()))?;
    match updated.log_folder() {
        Some(folder) => println!("log folder: {folder}"),
        None => println!("log folder cleared"),
    }
    Ok(0)
}
