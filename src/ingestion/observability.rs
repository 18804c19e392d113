//! Reporting ingestion outcomes.
//!
//! [`super::ingest_from_path`] reports exactly one [`IngestionEvent`] per attempt to an optional
//! [`IngestionObserver`]. [`LogObserver`] forwards events to the `log` facade, [`FileObserver`]
//! appends them to a local file and [`CompositeObserver`] fans out to several observers.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use log::{error, info, warn};

use crate::error::IngestionError;

use super::csv::TextEncoding;
use super::unified::DelimitedFormat;

/// How serious an ingestion failure is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IngestionSeverity {
    /// A cell or the text encoding was rejected; the same file may load with other options.
    Warning,
    /// The file was readable but its structure was rejected.
    Error,
    /// The file could not be read at all.
    Critical,
}

impl IngestionSeverity {
    /// Classify an ingestion error.
    pub fn of(error: &IngestionError) -> Self {
        match error {
            IngestionError::Io(_) => Self::Critical,
            IngestionError::Csv(err) if matches!(err.kind(), ::csv::ErrorKind::Io(_)) => Self::Critical,
            IngestionError::Csv(_) | IngestionError::SchemaMismatch { .. } => Self::Error,
            IngestionError::Decode(_) | IngestionError::ParseError { .. } => Self::Warning,
        }
    }
}

/// Which file was ingested and how.
#[derive(Debug, Clone)]
pub struct IngestionContext {
    pub path: PathBuf,
    pub format: DelimitedFormat,
    pub encoding: TextEncoding,
}

/// Shape of a successfully ingested dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestionStats {
    pub rows: usize,
    pub columns: usize,
}

/// Outcome of one ingestion attempt.
#[derive(Debug, Clone, Copy)]
pub enum IngestionEvent<'a> {
    /// The file was loaded.
    Loaded(IngestionStats),
    /// The file was rejected. `alert` is set when `severity` reached the configured threshold.
    Failed {
        severity: IngestionSeverity,
        alert: bool,
        error: &'a IngestionError,
    },
}

impl fmt::Display for IngestionEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loaded(stats) => write!(f, "ok rows={} columns={}", stats.rows, stats.columns),
            Self::Failed {
                severity,
                alert,
                error,
            } => {
                if *alert {
                    f.write_str("ALERT ")?;
                }
                write!(f, "fail severity={severity:?} err={error}")
            }
        }
    }
}

/// Receives ingestion outcomes.
pub trait IngestionObserver: Send + Sync {
    fn on_event(&self, ctx: &IngestionContext, event: &IngestionEvent<'_>);
}

/// Forwards every event to each inner observer, in order.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn IngestionObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn IngestionObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl IngestionObserver for CompositeObserver {
    fn on_event(&self, ctx: &IngestionContext, event: &IngestionEvent<'_>) {
        self.observers.iter().for_each(|o| o.on_event(ctx, event));
    }
}

/// Logs events through the `log` facade.
///
/// Loads go to `info`; failures go to `error` when they raise an alert and to `warn` otherwise.
#[derive(Debug, Default)]
pub struct LogObserver;

impl IngestionObserver for LogObserver {
    fn on_event(&self, ctx: &IngestionContext, event: &IngestionEvent<'_>) {
        let path = ctx.path.display();
        match event {
            IngestionEvent::Loaded(_) => {
                info!("[ingest] {:?}/{:?} {path}: {event}", ctx.format, ctx.encoding)
            }
            IngestionEvent::Failed { alert: true, .. } => {
                error!("[ingest] {:?}/{:?} {path}: {event}", ctx.format, ctx.encoding)
            }
            IngestionEvent::Failed { .. } => {
                warn!("[ingest] {:?}/{:?} {path}: {event}", ctx.format, ctx.encoding)
            }
        }
    }
}

/// Appends one line per event to a local file.
///
/// Lines look like `<unix-seconds> <format> <path> <event>`. Writes are best-effort; failures to
/// open or write the file are ignored.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }
}

impl IngestionObserver for FileObserver {
    fn on_event(&self, ctx: &IngestionContext, event: &IngestionEvent<'_>) {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        let line = format!("{secs} {:?} {} {event}", ctx.format, ctx.path.display());

        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}
