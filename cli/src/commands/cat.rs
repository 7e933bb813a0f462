use std::io;
use std::sync::Arc;

use futures::StreamExt;
use parquet_viewer_core::api::{
    CancellationFlag, CancellationSignal, CliError, ParquetBackend, SettingsSource,
};
use parquet_viewer_plugins::backend::ParquetToolsBackend;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};

use crate::commands::cli::CatArgs;

/// Exit code used when the user interrupts a conversion.
pub const EXIT_CANCELLED: i32 = 130;

pub async fn handle_cat(
    args: CatArgs,
    settings: Arc<dyn SettingsSource>,
) -> Result<i32, CliError> {
    let backend = ParquetToolsBackend::new(settings);
    let cancel = CancellationFlag::new();
    super::cancel_on_ctrl_c(cancel.clone());

    let out = BufWriter::new(tokio::io::stdout());
    write_rows(&backend, &args, cancel, out).await
}

pub async fn write_rows<B, W>(
    backend: &B,
    args: &CatArgs,
    cancel: CancellationFlag,
    mut out: W,
) -> Result<i32, CliError>
where
    B: ParquetBackend,
    W: AsyncWrite + Unpin,
{
    let mut rows = backend.to_json(&args.file, Arc::new(cancel.clone()));
    let mut count = 0u64;

    while let Some(row) = rows.next().await {
        let row = row?;
        match write_line(&mut out, &row).await {
            Ok(()) => count += 1,
            // Reader went away (`| head`); stop quietly.
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => return Ok(0),
            Err(e) => return Err(CliError::Io(e)),
        }
    }
    match out.flush().await {
        Err(e) if e.kind() != io::ErrorKind::BrokenPipe => return Err(CliError::Io(e)),
        _ => {}
    }

    tracing::debug!(rows = count, file = %args.file.display(), "cat finished");
    if cancel.is_cancellation_requested() {
        return Ok(EXIT_CANCELLED);
    }
    Ok(0)
}

async fn write_line<W: AsyncWrite + Unpin>(out: &mut W, row: &str) -> io::Result<()> {
    out.write_all(row.as_bytes()).await?;
    out.write_all(b"\n").await
}
