//! Ingestion entrypoints and implementations.
//!
//! Most callers should use [`ingest_from_path`] (from [`unified`]) which:
//!
//! - picks the delimiter from the file extension (or you can override via [`IngestionOptions`])
//! - decodes the file (ISO-8859-1 unless told otherwise)
//! - uses a given [`crate::types::Schema`] or infers one type per column
//! - optionally reports the outcome to an [`IngestionObserver`]
//!
//! Reader-level functions live in [`csv`].

pub mod csv;
pub mod observability;
pub mod unified;

pub use csv::{CsvOptions, TextEncoding};
pub use observability::{
    CompositeObserver, FileObserver, IngestionContext, IngestionEvent, IngestionObserver, IngestionSeverity,
    IngestionStats, LogObserver,
};
pub use unified::{ingest_from_path, DelimitedFormat, IngestionOptions};
