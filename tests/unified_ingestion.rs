use tabular_lens::ingestion::{ingest_from_path, DelimitedFormat, IngestionOptions};
use tabular_lens::types::{DataType, Field, Schema, Value};

#[test]
fn ingest_from_path_infers_csv_from_extension() {
    let ds = ingest_from_path("tests/fixtures/people.csv", &IngestionOptions::default()).unwrap();
    assert_eq!(ds.row_count(), 3);
    assert_eq!(ds.column_count(), 5);
}

#[test]
fn ingest_from_path_reads_tsv() {
    let ds = ingest_from_path("tests/fixtures/cores.tsv", &IngestionOptions::default()).unwrap();

    let types: Vec<_> = ds.schema.fields.iter().map(|f| f.data_type).collect();
    assert_eq!(types, vec![DataType::Utf8, DataType::Float64, DataType::Int64]);
    assert_eq!(ds.rows[0][0], Value::Utf8("a".to_string()));
    assert_eq!(ds.rows[2][1], Value::Float64(f64::INFINITY));
    assert_eq!(ds.rows[2][2], Value::Null);
}

#[test]
fn explicit_format_overrides_extension() {
    let opts = IngestionOptions {
        format: Some(DelimitedFormat::Csv),
        ..Default::default()
    };
    // Read as comma-separated, each TSV line is a single column.
    let ds = ingest_from_path("tests/fixtures/cores.tsv", &opts).unwrap();
    assert_eq!(ds.column_count(), 1);
    assert_eq!(ds.column_names(), vec!["sample\tdepth\tcount"]);
}

#[test]
fn explicit_schema_is_used_as_is() {
    let opts = IngestionOptions {
        schema: Some(Schema::new(vec![
            Field::new("name", DataType::Utf8),
            Field::new("id", DataType::Float64),
        ])),
        ..Default::default()
    };
    let ds = ingest_from_path("tests/fixtures/people.csv", &opts).unwrap();
    assert_eq!(ds.column_names(), vec!["name", "id"]);
    assert_eq!(ds.rows[0][1], Value::Float64(1.0));
}

#[test]
fn unknown_extension_is_rejected() {
    let err = ingest_from_path("tests/fixtures/viewer.json", &IngestionOptions::default()).unwrap_err();
    assert!(err.to_string().contains("cannot infer format from extension 'json'"));
}
