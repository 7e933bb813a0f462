//! Host-facing adapter: virtual document URI in, converted text out.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::TryStreamExt;
use tokio::sync::broadcast;

use crate::backend::ParquetBackend;
use crate::cancel::CancellationSignal;
use crate::error::ViewerError;

pub const URI_SCHEME: &str = "parquet-viewer";
const JSON_SUFFIX: &str = ".as.json";

/// `parquet-viewer:<path>.as.json`, the document a Parquet file is shown as.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VirtualUri {
    path: PathBuf,
}

impl VirtualUri {
    pub fn for_file(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Accepts the full URI form, a bare `parquet-viewer:<path>`, or a plain
    /// file path.
    pub fn parse(text: &str) -> Self {
        let rest = text
            .strip_prefix(URI_SCHEME)
            .and_then(|r| r.strip_prefix(':'))
            .map(|r| match r.strip_prefix("//") {
                Some(tail) if tail.starts_with('/') => tail,
                _ => r,
            })
            .unwrap_or(text);
        let rest = rest.strip_suffix(JSON_SUFFIX).unwrap_or(rest);
        Self::for_file(rest)
    }

    pub fn parquet_path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for VirtualUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{URI_SCHEME}:{}{JSON_SUFFIX}", self.path.display())
    }
}

/// The host's way of telling the user something went wrong.
pub trait Notifier: Send + Sync {
    fn show_error_message(&self, message: &str);
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn show_error_message(&self, message: &str) {
        (**self).show_error_message(message)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn show_error_message(&self, message: &str) {
        eprintln!("error: {message}");
    }
}

pub struct ParquetContentProvider<B, N> {
    backend: B,
    notifier: N,
    changes: broadcast::Sender<VirtualUri>,
}

impl<B, N> ParquetContentProvider<B, N>
where
    B: ParquetBackend,
    N: Notifier,
{
    pub fn new(backend: B, notifier: N) -> Self {
        let (changes, _) = broadcast::channel(16);
        Self {
            backend,
            notifier,
            changes,
        }
    }

    /// Fires with the URI whenever a document should be re-rendered.
    pub fn on_did_change(&self) -> broadcast::Receiver<VirtualUri> {
        self.changes.subscribe()
    }

    /// Ask listeners to reload `uri`. Returns how many were told.
    pub fn refresh(&self, uri: &VirtualUri) -> usize {
        self.changes.send(uri.clone()).unwrap_or(0)
    }

    /// Full document text, one row per line. Failures are shown to the user
    /// and returned.
    #[tracing::instrument(name = "provider.content", skip(self, cancel), fields(uri = %uri, backend = self.backend.name()))]
    pub async fn provide_text_document_content(
        &self,
        uri: &VirtualUri,
        cancel: Arc<dyn CancellationSignal>,
    ) -> Result<String, ViewerError> {
        let rows = self.backend.to_json(uri.parquet_path(), cancel);
        let text = rows
            .try_fold(String::new(), |mut text, row| async move {
                text.push_str(&row);
                text.push('\n');
                Ok::<_, ViewerError>(text)
            })
            .await;

        match text {
            Ok(text) => {
                tracing::debug!(bytes = text.len(), "document rendered");
                Ok(text)
            }
            Err(e) => {
                let message = e.to_string();
                tracing::error!("{message}");
                self.notifier.show_error_message(&message);
                Err(e)
            }
        }
    }
}
