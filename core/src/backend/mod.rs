use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;

use futures::Stream;

use crate::cancel::CancellationSignal;
use crate::error::ViewerError;

/// Lazy, finite, non-restartable sequence of JSON documents, one per row.
pub type JsonLines = Pin<Box<dyn Stream<Item = Result<String, ViewerError>> + Send>>;

/// Something that can turn a Parquet file into JSON rows.
pub trait ParquetBackend: Send + Sync {
    fn name(&self) -> &str;

    /// Rows of `path` as JSON. The stream ends early, without an error, once
    /// `cancel` is raised; it is polled before each row is yielded.
    fn to_json(&self, path: &Path, cancel: Arc<dyn CancellationSignal>) -> JsonLines;
}

impl<T: ParquetBackend + ?Sized> ParquetBackend for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn to_json(&self, path: &Path, cancel: Arc<dyn CancellationSignal>) -> JsonLines {
        (**self).to_json(path, cancel)
    }
}
