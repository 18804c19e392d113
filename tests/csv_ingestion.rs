use tabular_lens::ingestion::csv::{
    ingest_csv_from_path, ingest_csv_from_reader, ingest_delimited_from_path, infer_csv_from_reader, CsvOptions,
};
use tabular_lens::ingestion::TextEncoding;
use tabular_lens::types::{DataType, Field, Schema, Value};

fn people_schema() -> Schema {
    Schema::new(vec![
        Field::new("id", DataType::Int64),
        Field::new("name", DataType::Utf8),
        Field::new("score", DataType::Float64),
        Field::new("active", DataType::Bool),
    ])
}

#[test]
fn ingest_csv_from_path_decodes_latin1() {
    let schema = people_schema();
    let ds = ingest_csv_from_path("tests/fixtures/people.csv", &schema).unwrap();

    assert_eq!(ds.row_count(), 3);
    assert_eq!(
        ds.rows[1],
        vec![
            Value::Int64(2),
            Value::Utf8("René".to_string()),
            Value::Float64(72.0),
            Value::Bool(false),
        ]
    );
    assert_eq!(ds.rows[2][2], Value::Null);
}

#[test]
fn ingest_csv_as_utf8_rejects_latin1_bytes() {
    let opts = CsvOptions {
        encoding: TextEncoding::Utf8,
        ..Default::default()
    };
    let err = ingest_delimited_from_path("tests/fixtures/people.csv", None, &opts).unwrap_err();
    assert!(err.to_string().contains("decode error"));
}

#[test]
fn ingest_csv_infers_schema_when_none_given() {
    let ds = ingest_delimited_from_path("tests/fixtures/people.csv", None, &CsvOptions::default()).unwrap();

    assert_eq!(
        ds.schema,
        Schema::new(vec![
            Field::new("id", DataType::Int64),
            Field::new("name", DataType::Utf8),
            Field::new("city", DataType::Utf8),
            Field::new("score", DataType::Float64),
            Field::new("active", DataType::Bool),
        ])
    );
    assert_eq!(ds.rows[0][2], Value::Utf8("Zürich".to_string()));
}

#[test]
fn ingest_csv_allows_reordered_columns() {
    let schema = people_schema();
    let input = "name,id,active,score\nAda,1,true,98.5\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let ds = ingest_csv_from_reader(&mut rdr, &schema).unwrap();
    assert_eq!(ds.row_count(), 1);
    assert_eq!(ds.rows[0][0], Value::Int64(1));
    assert_eq!(ds.rows[0][1], Value::Utf8("Ada".to_string()));
}

#[test]
fn ingest_csv_errors_on_missing_required_column() {
    let schema = people_schema();
    let input = "id,name,score\n1,Ada,98.5\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let err = ingest_csv_from_reader(&mut rdr, &schema).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("schema mismatch"));
    assert!(msg.contains("missing required column 'active'"));
}

#[test]
fn ingest_csv_errors_on_type_parse() {
    let schema = people_schema();
    let input = "id,name,score,active\nnot_an_int,Ada,98.5,true\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let err = ingest_csv_from_reader(&mut rdr, &schema).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("failed to parse value"));
    assert!(msg.contains("column 'id'"));
}

#[test]
fn inferred_ingestion_of_header_only_input_has_no_rows() {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader("a,b\n".as_bytes());

    let ds = infer_csv_from_reader(&mut rdr).unwrap();
    assert_eq!(ds.row_count(), 0);
    assert_eq!(ds.column_names(), vec!["a", "b"]);
}
