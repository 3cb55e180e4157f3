use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{
    Array, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray, StringArray,
};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use thiserror::Error;

use super::model::{Dataset, Outcome, Record};

/// Required source columns, named as in the original launch-records export.
pub const COL_SITE: &str = "Launch Site";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER: &str = "Booster Version";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a dataset source could not be turned into a [`Dataset`]. Always
/// surfaced to the caller; loading is fail-fast, never lazy.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("failed to decode parquet batch: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}, column '{column}': expected {expected}, got {got}")]
    ColumnType {
        row: usize,
        column: &'static str,
        expected: &'static str,
        got: String,
    },
    #[error("row {row}: outcome class must be 0 or 1, got {value}")]
    OutcomeClass { row: usize, value: i64 },
    #[error("row {row}: payload mass must be non-negative, got {value}")]
    NegativePayload { row: usize, value: f64 },
    #[error("row {row}: launch site is empty")]
    EmptySite { row: usize },
    #[error("dataset contains no records")]
    Empty,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – Parquet file with one row per launch
/// * `.json`    – records-oriented array, `[{ "Launch Site": ..., ... }, ...]`
/// * `.csv`     – header row with the required column names
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Row shape shared by the CSV and JSON loaders
// ---------------------------------------------------------------------------

/// One source row as serde sees it. Extra columns in the source are ignored;
/// a missing required column fails deserialization of the first row.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Launch Site")]
    site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass: f64,
    #[serde(rename = "class")]
    class: i64,
    #[serde(rename = "Booster Version")]
    booster_version: String,
}

impl RawRecord {
    /// Validate and convert into the typed [`Record`] shape.
    fn into_record(self, row: usize) -> Result<Record, LoadError> {
        if self.site.trim().is_empty() {
            return Err(LoadError::EmptySite { row });
        }
        if self.payload_mass < 0.0 {
            return Err(LoadError::NegativePayload {
                row,
                value: self.payload_mass,
            });
        }
        let outcome = Outcome::from_class(self.class).ok_or(LoadError::OutcomeClass {
            row,
            value: self.class,
        })?;

        Ok(Record {
            site: self.site,
            payload_mass: self.payload_mass,
            outcome,
            booster_version: self.booster_version,
        })
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Dataset, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv(file)
}

/// Parse CSV from any reader. Split out from [`load_csv`] so tests can feed
/// in-memory bytes.
pub(crate) fn read_csv<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let mut records = Vec::new();
    for result in csv_reader.deserialize::<RawRecord>() {
        let raw = result?;
        records.push(raw.into_record(records.len())?);
    }

    Dataset::from_records(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 2500.0,
///     "class": 1,
///     "Booster Version": "F9 v1.1 B1011"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_json(&text)
}

pub(crate) fn parse_json(text: &str) -> Result<Dataset, LoadError> {
    let raw_records: Vec<RawRecord> = serde_json::from_str(text)?;

    let mut records = Vec::with_capacity(raw_records.len());
    for raw in raw_records {
        records.push(raw.into_record(records.len())?);
    }

    Dataset::from_records(records)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one row per launch and the four required flat
/// columns.  Works with files written by both **Pandas** (`df.to_parquet()`)
/// and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let reader = builder.build()?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();

        let site_idx = schema
            .index_of(COL_SITE)
            .map_err(|_| LoadError::MissingColumn(COL_SITE))?;
        let payload_idx = schema
            .index_of(COL_PAYLOAD)
            .map_err(|_| LoadError::MissingColumn(COL_PAYLOAD))?;
        let class_idx = schema
            .index_of(COL_CLASS)
            .map_err(|_| LoadError::MissingColumn(COL_CLASS))?;
        let booster_idx = schema
            .index_of(COL_BOOSTER)
            .map_err(|_| LoadError::MissingColumn(COL_BOOSTER))?;

        for batch_row in 0..batch.num_rows() {
            let row = records.len();
            let raw = RawRecord {
                site: string_at(batch.column(site_idx), batch_row, row, COL_SITE)?,
                payload_mass: f64_at(batch.column(payload_idx), batch_row, row, COL_PAYLOAD)?,
                class: i64_at(batch.column(class_idx), batch_row, row, COL_CLASS)?,
                booster_version: string_at(batch.column(booster_idx), batch_row, row, COL_BOOSTER)?,
            };
            records.push(raw.into_record(row)?);
        }
    }

    Dataset::from_records(records)
}

// -- Parquet / Arrow helpers --

fn column_type_error(
    col: &Arc<dyn Array>,
    row: usize,
    column: &'static str,
    expected: &'static str,
) -> LoadError {
    LoadError::ColumnType {
        row,
        column,
        expected,
        got: format!("{:?}", col.data_type()),
    }
}

/// Extract a string cell, accepting Utf8 and LargeUtf8 columns.
fn string_at(
    col: &Arc<dyn Array>,
    batch_row: usize,
    row: usize,
    column: &'static str,
) -> Result<String, LoadError> {
    if col.is_null(batch_row) {
        return Err(column_type_error(col, row, column, "string"));
    }
    if let Some(arr) = col.as_any().downcast_ref::<StringArray>() {
        Ok(arr.value(batch_row).to_string())
    } else if let Some(arr) = col.as_any().downcast_ref::<LargeStringArray>() {
        Ok(arr.value(batch_row).to_string())
    } else {
        Err(column_type_error(col, row, column, "string"))
    }
}

/// Extract a numeric cell as `f64`, accepting the common numeric widths.
fn f64_at(
    col: &Arc<dyn Array>,
    batch_row: usize,
    row: usize,
    column: &'static str,
) -> Result<f64, LoadError> {
    if col.is_null(batch_row) {
        return Err(column_type_error(col, row, column, "number"));
    }
    if let Some(arr) = col.as_any().downcast_ref::<Float64Array>() {
        Ok(arr.value(batch_row))
    } else if let Some(arr) = col.as_any().downcast_ref::<Float32Array>() {
        Ok(arr.value(batch_row) as f64)
    } else if let Some(arr) = col.as_any().downcast_ref::<Int64Array>() {
        Ok(arr.value(batch_row) as f64)
    } else if let Some(arr) = col.as_any().downcast_ref::<Int32Array>() {
        Ok(arr.value(batch_row) as f64)
    } else {
        Err(column_type_error(col, row, column, "number"))
    }
}

/// Extract an integer cell, accepting Int64 and Int32 columns.
fn i64_at(
    col: &Arc<dyn Array>,
    batch_row: usize,
    row: usize,
    column: &'static str,
) -> Result<i64, LoadError> {
    if col.is_null(batch_row) {
        return Err(column_type_error(col, row, column, "integer"));
    }
    if let Some(arr) = col.as_any().downcast_ref::<Int64Array>() {
        Ok(arr.value(batch_row))
    } else if let Some(arr) = col.as_any().downcast_ref::<Int32Array>() {
        Ok(arr.value(batch_row) as i64)
    } else {
        Err(column_type_error(col, row, column, "integer"))
    }
}
