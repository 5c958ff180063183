use std::fs::File;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::kernels::cast::{cast_with_options, CastOptions};
use arrow::datatypes::{DataType, Float64Type, Schema};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::error::DataLoadError;
use super::model::{Dataset, RawRecord, REQUIRED_COLUMNS};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row; `Launch Site`, `Payload Mass (kg)`,
///   `Booster Version Category`, `class` (extra columns are ignored)
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – flat columns with the same names
///
/// The snake-case names `site`, `payload_mass_kg`, `booster_category` and
/// `outcome_class` are accepted everywhere in place of the source headers.
pub fn load_file(path: &Path) -> Result<Dataset, DataLoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DataLoadError::UnsupportedFormat(other.to_string())),
    }?;

    log::info!(
        "Loaded {} launch records from {} ({} sites, payload {}..={} kg)",
        dataset.len(),
        path.display(),
        dataset.sites().len(),
        dataset.min_payload(),
        dataset.max_payload()
    );
    Ok(dataset)
}

fn open(path: &Path) -> Result<File, DataLoadError> {
    File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Position of a required column, looked up by source header then alias.
fn column_position<'a>(
    names: impl Iterator<Item = &'a str> + Clone,
    (header, alias): (&'static str, &'static str),
) -> Result<usize, DataLoadError> {
    names
        .clone()
        .position(|n| n.trim() == header)
        .or_else(|| names.clone().position(|n| n.trim() == alias))
        .ok_or(DataLoadError::MissingColumn(header))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Read a CSV reader into a dataset. Split out from [`load_csv`] so that
/// in-memory sources can be parsed too.
pub fn read_csv<R: std::io::Read>(source: R) -> Result<Dataset, DataLoadError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(source);
    let headers = reader.headers()?.clone();

    for required in REQUIRED_COLUMNS {
        column_position(headers.iter(), required)?;
    }

    let rows = reader
        .deserialize::<RawRecord>()
        .collect::<Result<Vec<_>, _>>()?;

    Dataset::from_raw(rows)
}

fn load_csv(path: &Path) -> Result<Dataset, DataLoadError> {
    read_csv(open(path)?)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 525.0,
///     "Booster Version Category": "v1.0",
///     "class": 0
///   },
///   ...
/// ]
/// ```
pub fn read_json(text: &str) -> Result<Dataset, DataLoadError> {
    let rows: Vec<RawRecord> = serde_json::from_str(text)?;
    Dataset::from_raw(rows)
}

fn load_json(path: &Path) -> Result<Dataset, DataLoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_json(&text)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of launch records.
///
/// Expected schema: the four required columns as flat columns. Numeric
/// columns may be any integer or float type, text columns Utf8 or
/// LargeUtf8. Other columns are ignored.
fn load_parquet(path: &Path) -> Result<Dataset, DataLoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;

    // Resolved once from the file schema, so a file without row groups
    // still reports missing columns.
    let [site_idx, payload_idx, booster_idx, class_idx] = {
        let schema = builder.schema();
        let positions = REQUIRED_COLUMNS.map(|required| schema_position(schema, required));
        let [a, b, c, d] = positions;
        [a?, b?, c?, d?]
    };
    let reader = builder.build()?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;

        let site_col = strict_cast(batch.column(site_idx), &DataType::Utf8)?;
        let payload_col = strict_cast(batch.column(payload_idx), &DataType::Float64)?;
        let booster_col = strict_cast(batch.column(booster_idx), &DataType::Utf8)?;
        let class_col = strict_cast(batch.column(class_idx), &DataType::Float64)?;

        for row in 0..batch.num_rows() {
            rows.push(RawRecord {
                site: string_at(&site_col, row),
                payload_mass_kg: f64_at(&payload_col, row),
                booster_category: string_at(&booster_col, row),
                outcome_class: f64_at(&class_col, row),
            });
        }
    }

    Dataset::from_raw(rows)
}

// -- Parquet / Arrow helpers --

fn schema_position(
    schema: &Schema,
    required: (&'static str, &'static str),
) -> Result<usize, DataLoadError> {
    column_position(schema.fields().iter().map(|f| f.name().as_str()), required)
}

/// Cast that fails on unconvertible values instead of nulling them, so
/// text in a numeric column is a load error rather than a missing value.
fn strict_cast(col: &ArrayRef, to: &DataType) -> Result<ArrayRef, DataLoadError> {
    let options = CastOptions {
        safe: false,
        ..Default::default()
    };
    Ok(cast_with_options(col, to, &options)?)
}

/// Value of a Utf8 column at `row`, `None` for nulls.
fn string_at(col: &ArrayRef, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    Some(col.as_string::<i32>().value(row).to_string())
}

/// Value of a Float64 column at `row`, `None` for nulls.
fn f64_at(col: &ArrayRef, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    Some(col.as_primitive::<Float64Type>().value(row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::OutcomeClass;

    const SOURCE_CSV: &str = "\
Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
2,CCAFS LC-40,0,0.0,F9 v1.0  B0004,v1.0
3,VAFB SLC-4E,1,500.0,F9 v1.1  B1003,v1.1
4,KSC LC-39A,1,2490.0,F9 FT B1031.1,FT
";

    #[test]
    fn test_csv_with_source_headers() {
        let ds = read_csv(SOURCE_CSV.as_bytes()).unwrap();
        assert_eq!(ds.len(), 4);
        assert_eq!(ds.sites(), ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A"]);
        assert_eq!(ds.max_payload(), 2490.0);
        assert_eq!(ds.records()[2].booster_category, "v1.1");
        assert_eq!(ds.records()[3].outcome, OutcomeClass::Success);
    }

    #[test]
    fn test_csv_with_snake_case_headers() {
        let csv = "site,payload_mass_kg,booster_category,outcome_class\nA,100,FT,1\n";
        let ds = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(ds.records()[0].payload_mass_kg, 100.0);
    }

    #[test]
    fn test_csv_missing_column() {
        let csv = "Launch Site,Payload Mass (kg),class\nA,100,1\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::MissingColumn("Booster Version Category")
        ));
    }

    #[test]
    fn test_csv_header_only_is_empty() {
        let csv = "Launch Site,Payload Mass (kg),Booster Version Category,class\n";
        assert!(matches!(read_csv(csv.as_bytes()), Err(DataLoadError::Empty)));
    }

    #[test]
    fn test_csv_missing_cell() {
        let csv = "Launch Site,Payload Mass (kg),Booster Version Category,class\nA,,FT,1\n";
        assert!(matches!(
            read_csv(csv.as_bytes()),
            Err(DataLoadError::MissingValue { row: 0, .. })
        ));
    }

    #[test]
    fn test_json_records() {
        let json = r#"[
            {"Launch Site": "A", "Payload Mass (kg)": 1200.5, "Booster Version Category": "B4", "class": 1},
            {"site": "B", "payload_mass_kg": 0, "booster_category": "B5", "outcome_class": 0}
        ]"#;
        let ds = read_json(json).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.min_payload(), 0.0);
        assert_eq!(ds.records()[1].outcome, OutcomeClass::Failure);
    }

    #[test]
    fn test_json_negative_payload() {
        let json = r#"[{"site": "A", "payload_mass_kg": -5, "booster_category": "FT", "outcome_class": 1}]"#;
        assert!(matches!(
            read_json(json),
            Err(DataLoadError::InvalidPayload { row: 0, .. })
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_file(Path::new("launches.xlsx")).unwrap_err();
        assert!(matches!(err, DataLoadError::UnsupportedFormat(ext) if ext == "xlsx"));
    }
}
