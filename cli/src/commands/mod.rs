pub mod cat;
pub mod cli;
pub mod config;
pub mod open;

use parquet_viewer_core::api::CancellationFlag;

/// Raise `flag` on Ctrl-C. Conversions notice it before the next row.
pub fn cancel_on_ctrl_c(flag: CancellationFlag) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("cancellation requested");
            flag.cancel();
        }
    });
}
