//! Delimited-text ingestion.
//!
//! Files are decoded with a [`TextEncoding`] (ISO-8859-1 by default) before being handed to the
//! CSV reader. Column types come either from a caller-provided [`Schema`] or are inferred once
//! from the data, see [`infer_csv_from_reader`].

use std::io::Cursor;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{IngestionError, IngestionResult};
use crate::types::{parse_bool, DataSet, DataType, Field, Schema, Value};

/// Text encoding of the input bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextEncoding {
    /// ISO-8859-1: every byte maps to the code point of the same value, so decoding never fails.
    #[default]
    Latin1,
    /// Strict UTF-8.
    Utf8,
}

impl TextEncoding {
    /// Decode `bytes` into a string.
    pub fn decode(self, bytes: Vec<u8>) -> IngestionResult<String> {
        match self {
            Self::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
            Self::Utf8 => Ok(String::from_utf8(bytes)?),
        }
    }
}

/// Reader settings for delimited text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Encoding of the file.
    pub encoding: TextEncoding,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            encoding: TextEncoding::Latin1,
        }
    }
}

/// Open `path`, decode it and return a CSV reader over the decoded text.
pub fn open_delimited(
    path: impl AsRef<Path>,
    options: &CsvOptions,
) -> IngestionResult<csv::Reader<Cursor<String>>> {
    let bytes = std::fs::read(path)?;
    let text = options.encoding.decode(bytes)?;
    Ok(csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(options.delimiter)
        .from_reader(Cursor::new(text)))
}

/// Ingest a delimited file, using `schema` when given and inferring column types otherwise.
pub fn ingest_delimited_from_path(
    path: impl AsRef<Path>,
    schema: Option<&Schema>,
    options: &CsvOptions,
) -> IngestionResult<DataSet> {
    let mut rdr = open_delimited(path, options)?;
    match schema {
        Some(schema) => ingest_csv_from_reader(&mut rdr, schema),
        None => infer_csv_from_reader(&mut rdr),
    }
}

/// Ingest a comma-separated, Latin-1 encoded file into an in-memory [`DataSet`].
///
/// Rules:
///
/// - CSV must have headers.
/// - Headers must contain all schema fields (order can differ).
/// - Each value is parsed according to the schema field type.
pub fn ingest_csv_from_path(path: impl AsRef<Path>, schema: &Schema) -> IngestionResult<DataSet> {
    ingest_delimited_from_path(path, Some(schema), &CsvOptions::default())
}

/// Ingest CSV data from an existing CSV reader.
pub fn ingest_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    schema: &Schema,
) -> IngestionResult<DataSet> {
    let headers = rdr.headers()?.clone();

    // Map schema fields -> CSV column indexes (allows re-ordered CSV columns).
    let mut col_idxs = Vec::with_capacity(schema.fields.len());
    for field in &schema.fields {
        match headers.iter().position(|h| h.trim() == field.name) {
            Some(idx) => col_idxs.push(idx),
            None => {
                return Err(IngestionError::SchemaMismatch {
                    message: format!(
                        "missing required column '{field}'. headers={:?}",
                        headers.iter().collect::<Vec<_>>(),
                        field = field.name
                    ),
                });
            }
        }
    }

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // Report 1-based row number for users; +1 again because header is row 1.
        let user_row = row_idx0 + 2;
        let record = result?;

        let mut row: Vec<Value> = Vec::with_capacity(schema.fields.len());
        for (field, &csv_idx) in schema.fields.iter().zip(col_idxs.iter()) {
            let raw = record.get(csv_idx).unwrap_or("");
            row.push(parse_typed_value(user_row, &field.name, field.data_type, raw)?);
        }
        rows.push(row);
    }

    Ok(DataSet::new(schema.clone(), rows))
}

/// Ingest CSV data, inferring one [`DataType`] per column from its non-empty cells.
///
/// A column is `Int64` if every cell parses as an integer, otherwise `Float64` if every cell
/// parses as a float, otherwise `Bool` if every cell is `true`/`false` (any case), otherwise
/// `Utf8`. A column with no non-empty cells is `Float64` (all nulls).
///
/// Duplicate header names get a `.1`, `.2`, ... suffix and blank headers become
/// `Unnamed: <index>`, so column names are unique.
pub fn infer_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
) -> IngestionResult<DataSet> {
    let names = unique_column_names(rdr.headers()?.iter());

    let mut records = Vec::new();
    for result in rdr.records() {
        records.push(result?);
    }

    let fields: Vec<Field> = names
        .into_iter()
        .enumerate()
        .map(|(idx, name)| {
            let cells = records.iter().map(|r| r.get(idx).unwrap_or(""));
            Field::new(name, infer_data_type(cells))
        })
        .collect();

    let mut rows = Vec::with_capacity(records.len());
    for (row_idx0, record) in records.iter().enumerate() {
        let user_row = row_idx0 + 2;
        let row = fields
            .iter()
            .enumerate()
            .map(|(idx, field)| {
                parse_typed_value(
                    user_row,
                    &field.name,
                    field.data_type,
                    record.get(idx).unwrap_or(""),
                )
            })
            .collect::<IngestionResult<Vec<Value>>>()?;
        rows.push(row);
    }

    Ok(DataSet::new(Schema::new(fields), rows))
}

fn unique_column_names<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for (idx, header) in headers.enumerate() {
        let base = match header.trim() {
            "" => format!("Unnamed: {idx}"),
            h => h.to_string(),
        };
        let mut candidate = base.clone();
        let mut suffix = 1;
        while names.contains(&candidate) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }
        names.push(candidate);
    }
    names
}

fn infer_data_type<'a>(cells: impl Iterator<Item = &'a str>) -> DataType {
    let mut all_int = true;
    let mut all_float = true;
    let mut all_bool = true;
    for cell in cells.map(str::trim).filter(|c| !c.is_empty()) {
        all_int &= cell.parse::<i64>().is_ok();
        all_float &= cell.parse::<f64>().is_ok();
        all_bool &= cell.eq_ignore_ascii_case("true") || cell.eq_ignore_ascii_case("false");
        if !(all_int || all_float || all_bool) {
            return DataType::Utf8;
        }
    }
    if all_int && !all_bool {
        DataType::Int64
    } else if all_float && !all_bool {
        DataType::Float64
    } else if all_bool && !all_float {
        DataType::Bool
    } else {
        // Only reachable when there were no non-empty cells at all.
        DataType::Float64
    }
}

fn parse_typed_value(
    row: usize,
    column: &str,
    data_type: DataType,
    raw: &str,
) -> IngestionResult<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }

    let parse_error = |message: String| IngestionError::ParseError {
        row,
        column: column.to_owned(),
        raw: raw.to_owned(),
        message,
    };

    match data_type {
        DataType::Utf8 => Ok(Value::Utf8(trimmed.to_owned())),
        DataType::Int64 => trimmed
            .parse::<i64>()
            .map(Value::Int64)
            .map_err(|e| parse_error(e.to_string())),
        DataType::Float64 => trimmed
            .parse::<f64>()
            .map(Value::Float64)
            .map_err(|e| parse_error(e.to_string())),
        DataType::Bool => parse_bool(trimmed)
            .map(Value::Bool)
            .ok_or_else(|| parse_error("expected bool (true/false/1/0/yes/no)".to_string())),
    }
}
