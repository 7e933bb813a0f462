use std::sync::Arc;

use parquet_viewer_core::api::{
    CancellationFlag, CliError, ParquetContentProvider, SettingsSource, StderrNotifier, VirtualUri,
};
use parquet_viewer_plugins::backend::ParquetToolsBackend;
use tokio::io::AsyncWriteExt;

use crate::commands::cli::OpenArgs;

pub async fn handle_open(
    args: OpenArgs,
    settings: Arc<dyn SettingsSource>,
) -> Result<i32, CliError> {
    let provider =
        ParquetContentProvider::new(ParquetToolsBackend::new(settings), StderrNotifier);
    let uri = VirtualUri::parse(&args.uri);

    let cancel = CancellationFlag::new();
    super::cancel_on_ctrl_c(cancel.clone());

    match provider
        .provide_text_document_content(&uri, Arc::new(cancel))
        .await
    {
        Ok(text) => {
            let mut out = tokio::io::stdout();
            out.write_all(text.as_bytes()).await?;
            out.flush().await?;
            Ok(0)
        }
        // The notifier has already told the user.
        Err(e) => Ok(e.exit_code()),
    }
}
