//! Process-wide log file whose folder can change while the process runs.
//!
//! Every event becomes a pretty-printed JSON object with the fields `label`,
//! `level`, `message` and `time`, appended to `<folder>/parquet-viewer.log`.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::{DefaultFields, Writer};
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, MakeWriter};
use tracing_subscriber::registry::LookupSpan;

pub const LOG_LABEL: &str = "parquet-viewer";
pub const LOG_FILE_NAME: &str = "parquet-viewer.log";

struct FileTarget {
    folder: PathBuf,
    writer: NonBlocking,
    // Dropping the guard flushes pending lines to disk.
    _guard: WorkerGuard,
}

/// A [`MakeWriter`] that writes to the currently configured log folder, or
/// nowhere when no folder is set.
#[derive(Clone, Default)]
pub struct LogSink {
    target: Arc<RwLock<Option<FileTarget>>>,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The sink shared by the whole process.
    pub fn global() -> &'static LogSink {
        static SINK: OnceLock<LogSink> = OnceLock::new();
        SINK.get_or_init(LogSink::new)
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<FileTarget>> {
        self.target.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<FileTarget>> {
        self.target.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Point the sink at `folder`, or stop writing when `None`. Lines written
    /// to the previous folder are flushed before this returns.
    pub fn set_log_folder(&self, folder: Option<&Path>) -> io::Result<()> {
        let next = match folder {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                let appender = RollingFileAppender::builder()
                    .rotation(Rotation::NEVER)
                    .filename_prefix(LOG_FILE_NAME)
                    .build(dir)
                    .map_err(io::Error::other)?;
                let (writer, guard) = tracing_appender::non_blocking(appender);
                Some(FileTarget {
                    folder: dir.to_path_buf(),
                    writer,
                    _guard: guard,
                })
            }
            None => None,
        };

        let previous = std::mem::replace(&mut *self.write(), next);
        drop(previous);
        Ok(())
    }

    pub fn log_folder(&self) -> Option<PathBuf> {
        self.read().as_ref().map(|t| t.folder.clone())
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_folder().map(|dir| dir.join(LOG_FILE_NAME))
    }
}

pub enum SinkWriter {
    File(NonBlocking),
    Discard,
}

impl io::Write for SinkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            SinkWriter::File(w) => w.write(buf),
            SinkWriter::Discard => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            SinkWriter::File(w) => w.flush(),
            SinkWriter::Discard => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for LogSink {
    type Writer = SinkWriter;

    fn make_writer(&'a self) -> Self::Writer {
        match self.read().as_ref() {
            Some(target) => SinkWriter::File(target.writer.clone()),
            None => SinkWriter::Discard,
        }
    }
}

#[derive(Serialize)]
struct LogRecord<'a> {
    label: &'static str,
    level: &'a str,
    message: String,
    time: String,
}

/// Event formatter producing one JSON object per event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFormat;

impl<S, N> FormatEvent<S, N> for LogFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let mut message = visitor.message;
        for (name, value) in visitor.fields {
            push_part(&mut message, &format!("{name}={value}"));
        }

        let level = event.metadata().level().as_str().to_ascii_lowercase();
        let record = LogRecord {
            label: LOG_LABEL,
            level: &level,
            message,
            time: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        };
        let json = serde_json::to_string_pretty(&record).map_err(|_| fmt::Error)?;
        writeln!(writer, "{json}")
    }
}

fn push_part(message: &mut String, part: &str) {
    if !message.is_empty() {
        message.push(' ');
    }
    message.push_str(part);
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: Vec<(&'static str, String)>,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push((field.name(), value.to_string()));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields.push((field.name(), format!("{value:?}")));
        }
    }
}

/// File layer writing [`LogFormat`] records through `sink`.
pub fn file_layer<S>(
    sink: LogSink,
) -> tracing_subscriber::fmt::Layer<S, DefaultFields, LogFormat, LogSink>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer()
        .event_format(LogFormat)
        .with_ansi(false)
        .with_writer(sink)
}
