//! Unified ingestion entrypoint.
//!
//! [`ingest_from_path`] loads a delimited text file into an in-memory
//! [`crate::types::DataSet`]. The delimiter comes from the file extension unless
//! [`IngestionOptions::format`] is set, and column types are inferred unless
//! [`IngestionOptions::schema`] is set.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{DataSet, Schema};

use super::csv::{ingest_delimited_from_path, CsvOptions, TextEncoding};
use super::observability::{IngestionContext, IngestionEvent, IngestionObserver, IngestionSeverity, IngestionStats};

/// Supported delimited-text formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimitedFormat {
    /// Comma-separated values (`.csv`).
    Csv,
    /// Tab-separated values (`.tsv`, `.tab`).
    Tsv,
}

impl DelimitedFormat {
    /// Parse a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        if ext.eq_ignore_ascii_case("csv") {
            Some(Self::Csv)
        } else if ext.eq_ignore_ascii_case("tsv") || ext.eq_ignore_ascii_case("tab") {
            Some(Self::Tsv)
        } else {
            None
        }
    }

    /// Infer the format from the extension of `path`.
    pub fn from_path(path: &Path) -> IngestionResult<Self> {
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or_default();
        Self::from_extension(ext).ok_or_else(|| IngestionError::SchemaMismatch {
            message: format!(
                "cannot infer format from extension '{ext}' ({}); expected .csv, .tsv or .tab",
                path.display()
            ),
        })
    }

    /// Field delimiter byte.
    pub fn delimiter(self) -> u8 {
        match self {
            Self::Csv => b',',
            Self::Tsv => b'\t',
        }
    }
}

/// Options controlling [`ingest_from_path`].
///
/// The [`Default`] infers the format from the extension, decodes ISO-8859-1, infers column types
/// and reports to no observer.
#[derive(Clone)]
pub struct IngestionOptions {
    /// If `None`, auto-detect format from file extension.
    pub format: Option<DelimitedFormat>,
    pub encoding: TextEncoding,
    /// If `None`, infer one type per column from the data.
    pub schema: Option<Schema>,
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Failures at or above this severity are reported with `alert: true`.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("format", &self.format)
            .field("encoding", &self.encoding)
            .field("schema_fields", &self.schema.as_ref().map(|s| s.fields.len()))
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            format: None,
            encoding: TextEncoding::default(),
            schema: None,
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Load `path` into a [`DataSet`].
///
/// When an observer is configured it receives one [`IngestionEvent`] for the attempt. A failure
/// to infer the format from the extension is returned before anything is read and is not
/// reported.
///
/// # Examples
///
/// ## Inferred types (auto-detect by extension)
///
/// ```no_run
/// use tabular_lens::ingestion::{ingest_from_path, IngestionOptions};
///
/// # fn main() -> Result<(), tabular_lens::IngestionError> {
/// let ds = ingest_from_path("measurements.csv", &IngestionOptions::default())?;
/// println!("rows={} columns={}", ds.row_count(), ds.column_count());
/// # Ok(())
/// # }
/// ```
///
/// ## Fixed schema, UTF-8 tab-separated input
///
/// ```no_run
/// use tabular_lens::ingestion::{ingest_from_path, DelimitedFormat, IngestionOptions, TextEncoding};
/// use tabular_lens::types::{DataType, Field, Schema};
///
/// # fn main() -> Result<(), tabular_lens::IngestionError> {
/// let opts = IngestionOptions {
///     format: Some(DelimitedFormat::Tsv),
///     encoding: TextEncoding::Utf8,
///     schema: Some(Schema::new(vec![
///         Field::new("id", DataType::Int64),
///         Field::new("name", DataType::Utf8),
///     ])),
///     ..Default::default()
/// };
/// let ds = ingest_from_path("export_without_extension", &opts)?;
/// println!("rows={}", ds.row_count());
/// # Ok(())
/// # }
/// ```
///
/// ## Log output with alerts
///
/// ```no_run
/// use std::sync::Arc;
///
/// use tabular_lens::ingestion::{ingest_from_path, IngestionOptions, IngestionSeverity, LogObserver};
///
/// let opts = IngestionOptions {
///     observer: Some(Arc::new(LogObserver)),
///     alert_at_or_above: IngestionSeverity::Error,
///     ..Default::default()
/// };
/// let _err = ingest_from_path("does_not_exist.csv", &opts).unwrap_err();
/// ```
pub fn ingest_from_path(path: impl AsRef<Path>, options: &IngestionOptions) -> IngestionResult<DataSet> {
    let path = path.as_ref();
    let format = match options.format {
        Some(f) => f,
        None => DelimitedFormat::from_path(path)?,
    };
    let csv_options = CsvOptions {
        delimiter: format.delimiter(),
        encoding: options.encoding,
    };

    let result = ingest_delimited_from_path(path, options.schema.as_ref(), &csv_options);

    if let Some(observer) = options.observer.as_deref() {
        let ctx = IngestionContext {
            path: path.to_path_buf(),
            format,
            encoding: options.encoding,
        };
        let event = match &result {
            Ok(ds) => IngestionEvent::Loaded(IngestionStats {
                rows: ds.row_count(),
                columns: ds.column_count(),
            }),
            Err(error) => {
                let severity = IngestionSeverity::of(error);
                IngestionEvent::Failed {
                    severity,
                    alert: severity >= options.alert_at_or_above,
                    error,
                }
            }
        };
        observer.on_event(&ctx, &event);
    }

    result
}
