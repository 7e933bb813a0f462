use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use parquet_viewer_core::api::JsonSpace;

#[derive(Parser, Debug)]
#[command(
    name = "parquet-viewer",
    version,
    about = "View Parquet files as JSON through parquet-tools"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file. Defaults to ~/.parquet-viewer/config.toml, then ./parquet-viewer.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// parquet-tools launcher or jar.
    #[arg(long, global = true)]
    pub parquet_tools: Option<String>,

    /// Java executable used for jar launchers.
    #[arg(long, global = true)]
    pub java: Option<String>,

    /// Indentation for each row: a width (0 for compact) or a literal string.
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub space: Option<JsonSpace>,

    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[arg(long, global = true)]
    pub log_folder: Option<String>,

    /// Also log to stderr.
    #[arg(long, global = true)]
    pub log_console: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct CatArgs {
    pub file: PathBuf,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct OpenArgs {
    /// `parquet-viewer:<path>.as.json` or a plain file path.
    pub uri: String,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct UriArgs {
    pub file: PathBuf,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct SetLogFolderArgs {
    /// Omit to stop writing the log file.
    pub folder: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Stream rows as JSON, one document per row.
    Cat(CatArgs),
    /// Render the virtual JSON document for a URI.
    Open(OpenArgs),
    /// Print the virtual document URI for a Parquet file.
    Uri(UriArgs),
    /// Print the effective settings.
    Config,
    /// Persist the log folder setting.
    SetLogFolder(SetLogFolderArgs),
}
