use std::io::Write;
use std::sync::Arc;

use arrow::array::{Float32Array, Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use launch_dash::data::loader::load_file;
use launch_dash::data::{DataLoadError, OutcomeClass};
use parquet::arrow::ArrowWriter;
use tempfile::Builder;

fn temp_with(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut f = Builder::new().suffix(suffix).tempfile().unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    f.flush().unwrap();
    f
}

#[test]
fn test_load_csv_file() {
    let f = temp_with(
        ".csv",
        "Launch Site,Payload Mass (kg),Booster Version Category,class\n\
         CCAFS LC-40,525,v1.0,0\n\
         KSC LC-39A,5300,FT,1\n",
    );
    let ds = load_file(f.path()).unwrap();
    assert_eq!(ds.len(), 2);
    assert_eq!(ds.min_payload(), 525.0);
    assert_eq!(ds.max_payload(), 5300.0);
}

#[test]
fn test_load_json_file() {
    let f = temp_with(
        ".json",
        r#"[{"Launch Site": "VAFB SLC-4E", "Payload Mass (kg)": 9600, "Booster Version Category": "B5", "class": 1}]"#,
    );
    let ds = load_file(f.path()).unwrap();
    assert_eq!(ds.records()[0].site, "VAFB SLC-4E");
}

#[test]
fn test_load_parquet_file_with_narrow_types() {
    let schema = Arc::new(Schema::new(vec![
        Field::new("site", DataType::Utf8, false),
        Field::new("payload_mass_kg", DataType::Float32, false),
        Field::new("booster_category", DataType::Utf8, false),
        Field::new("outcome_class", DataType::Int32, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(vec!["A", "B", "A"])),
            Arc::new(Float32Array::from(vec![100.0, 2500.5, 0.0])),
            Arc::new(StringArray::from(vec!["FT", "B4", "FT"])),
            Arc::new(Int32Array::from(vec![1, 0, 1])),
        ],
    )
    .unwrap();

    let f = Builder::new().suffix(".parquet").tempfile().unwrap();
    let mut writer = ArrowWriter::try_new(f.reopen().unwrap(), schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let ds = load_file(f.path()).unwrap();
    assert_eq!(ds.len(), 3);
    assert_eq!(ds.sites(), ["A", "B"]);
    assert_eq!(ds.max_payload(), 2500.5);
    assert_eq!(ds.records()[1].outcome, OutcomeClass::Failure);
}

#[test]
fn test_parquet_missing_column() {
    let schema = Arc::new(Schema::new(vec![
        Field::new("site", DataType::Utf8, false),
        Field::new("payload_mass_kg", DataType::Float32, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(vec!["A"])),
            Arc::new(Float32Array::from(vec![100.0])),
        ],
    )
    .unwrap();

    let f = Builder::new().suffix(".parquet").tempfile().unwrap();
    let mut writer = ArrowWriter::try_new(f.reopen().unwrap(), schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    assert!(matches!(
        load_file(f.path()),
        Err(DataLoadError::MissingColumn("Booster Version Category"))
    ));
}

#[test]
fn test_nan_payload_rejected() {
    let f = temp_with(
        ".csv",
        "Launch Site,Payload Mass (kg),Booster Version Category,class\nA,NaN,FT,1\n",
    );
    assert!(matches!(
        load_file(f.path()),
        Err(DataLoadError::InvalidPayload { row: 0, .. })
    ));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.csv");
    assert!(matches!(load_file(&path), Err(DataLoadError::Io { .. })));
}

#[test]
fn test_parquet_without_row_groups_reports_missing_column() {
    let schema = Arc::new(Schema::new(vec![
        Field::new("site", DataType::Utf8, false),
        Field::new("payload_mass_kg", DataType::Float64, false),
    ]));

    let f = Builder::new().suffix(".parquet").tempfile().unwrap();
    let writer = ArrowWriter::try_new(f.reopen().unwrap(), schema, None).unwrap();
    writer.close().unwrap();

    assert!(matches!(
        load_file(f.path()),
        Err(DataLoadError::MissingColumn("Booster Version Category"))
    ));
}

#[test]
fn test_parquet_text_in_payload_column_is_malformed() {
    let schema = Arc::new(Schema::new(vec![
        Field::new("site", DataType::Utf8, false),
        Field::new("payload_mass_kg", DataType::Utf8, false),
        Field::new("booster_category", DataType::Utf8, false),
        Field::new("outcome_class", DataType::Int32, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(vec!["A", "B"])),
            Arc::new(StringArray::from(vec!["1200", "heavy"])),
            Arc::new(StringArray::from(vec!["FT", "B4"])),
            Arc::new(Int32Array::from(vec![1, 0])),
        ],
    )
    .unwrap();

    let f = Builder::new().suffix(".parquet").tempfile().unwrap();
    let mut writer = ArrowWriter::try_new(f.reopen().unwrap(), schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    assert!(matches!(load_file(f.path()), Err(DataLoadError::Arrow(_))));
}

#[test]
fn test_empty_json_array_rejected() {
    let f = temp_with(".json", "[]");
    assert!(matches!(load_file(f.path()), Err(DataLoadError::Empty)));
}

#[test]
fn test_csv_out_of_range_class_rejected() {
    let f = temp_with(
        ".csv",
        "Launch Site,Payload Mass (kg),Booster Version Category,class\n\
         A,100,FT,1\n\
         A,200,FT,2\n",
    );
    assert!(matches!(
        load_file(f.path()),
        Err(DataLoadError::InvalidOutcome { row: 1, value }) if value == 2.0
    ));
}
