//! Command dispatch: build the settings source and hand off to a subcommand.
use std::sync::Arc;

use parquet_viewer_core::api::{CliError, VirtualUri};

use crate::commands::cli::{Args, Commands};
use crate::commands::{cat, config, open};
use crate::settings::CliSettings;

#[tracing::instrument(name = "cli.dispatch", skip_all)]
pub async fn dispatch(args: Args, settings: Arc<CliSettings>) -> Result<i32, CliError> {
    match args.command {
        Commands::Cat(cat_args) => cat::handle_cat(cat_args, settings).await,
        Commands::Open(open_args) => open::handle_open(open_args, settings).await,
        Commands::Uri(uri_args) => {
            let file = std::path::absolute(&uri_args.file)?;
            println!("{}", VirtualUri::for_file(file));
            Ok(0)
        }
        Commands::Config => config::handle_show(&settings),
        Commands::SetLogFolder(folder_args) => config::handle_set_log_folder(folder_args, &settings),
    }
}
