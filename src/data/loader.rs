use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{
    DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type, UInt16Type,
    UInt32Type, UInt64Type, UInt8Type,
};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::SchemaError;
use super::model::{CellValue, Row, Table};
use super::schema::{self, ColumnType};

/// Cell contents read as missing values; so is a blank cell.
const NULL_MARKERS: [&str; 8] = ["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a repository table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row of column names, one repository per line
/// * `.json`    – `[{ "repositories": "...", "stars_count": 10, ... }, ...]`
/// * `.parquet` – flat columns of strings / integers / floats
///
/// Column names are trimmed; cell text is kept as written. Every cell of a
/// declared column is coerced to its declared type; a cell that cannot be is
/// a [`SchemaError`].
pub fn load_file(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            parse_csv(file)
        }
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} rows with columns {:?} from {}",
        table.len(),
        table.column_names,
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Parse CSV text with a header row from any reader.
pub fn parse_csv<R: Read>(input: R) -> Result<Table> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = normalize_headers(
        reader
            .headers()
            .context("reading CSV headers")?
            .iter()
            .map(|h| h.to_string()),
    )?;

    let mut rows = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let mut cells = BTreeMap::new();
        for (col_idx, raw) in record.iter().enumerate() {
            let Some(col_name) = headers.get(col_idx) else {
                continue;
            };
            cells.insert(col_name.clone(), parse_text_cell(col_name, row_no, raw)?);
        }

        rows.push(Row { cells });
    }

    Ok(Table::new(headers, rows))
}

fn is_null_marker(s: &str) -> bool {
    NULL_MARKERS.contains(&s) || s.trim().is_empty()
}

/// Read one textual cell. Declared text columns keep the raw string; other
/// columns infer a number (surrounding blanks allowed) and are coerced.
fn parse_text_cell(column: &str, row: usize, raw: &str) -> Result<CellValue, SchemaError> {
    if is_null_marker(raw) {
        return Ok(CellValue::Null);
    }
    match schema::declared_type(column) {
        Some(ColumnType::Text) => Ok(CellValue::Text(raw.to_string())),
        _ => schema::coerce(column, row, guess_cell_type(raw)),
    }
}

fn guess_cell_type(s: &str) -> CellValue {
    if is_null_marker(s) {
        return CellValue::Null;
    }
    let trimmed = s.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        return CellValue::Float(f);
    }
    CellValue::Text(s.to_string())
}

/// Trim header whitespace and reject names that collide afterwards.
fn normalize_headers(raw: impl Iterator<Item = String>) -> Result<Vec<String>, SchemaError> {
    let mut headers: Vec<String> = Vec::new();
    for name in raw {
        let name = name.trim().to_string();
        if headers.contains(&name) {
            return Err(SchemaError::DuplicateColumn(name));
        }
        headers.push(name);
    }
    Ok(headers)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "repositories": "octo/hello", "stars_count": 12, "language": "Rust", ... },
///   ...
/// ]
/// ```
///
/// Columns are the union of all record keys; a record lacking a key gets a null.
fn load_json(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut raw_names: Vec<String> = Vec::new();
    for rec in records {
        if let Some(obj) = rec.as_object() {
            for key in obj.keys() {
                if !raw_names.contains(key) {
                    raw_names.push(key.clone());
                }
            }
        }
    }
    let headers = normalize_headers(raw_names.iter().cloned())?;

    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut cells = BTreeMap::new();
        for (key, val) in obj {
            let col_name = key.trim();
            cells.insert(col_name.to_string(), json_cell(col_name, i, val)?);
        }

        rows.push(Row { cells });
    }

    Ok(Table::new(headers, rows))
}

fn json_cell(column: &str, row: usize, val: &JsonValue) -> Result<CellValue, SchemaError> {
    match val {
        JsonValue::String(s) => parse_text_cell(column, row, s),
        JsonValue::Number(n) if schema::declared_type(column) == Some(ColumnType::Text) => {
            Ok(CellValue::Text(n.to_string()))
        }
        other => schema::coerce(column, row, json_to_cell(other)),
    }
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => guess_cell_type(s),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::Text(n.to_string())
            }
        }
        JsonValue::Null => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of repositories.
///
/// Every column is read as a scalar cell (strings, signed/unsigned integers,
/// floats, booleans); dictionary-encoded columns such as pandas categoricals
/// are decoded first. Any other Arrow type is a [`SchemaError::UnsupportedType`].
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let headers = normalize_headers(
        builder
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone()),
    )?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let columns = batch
            .columns()
            .iter()
            .zip(&headers)
            .map(|(col, name)| decode_dictionary(col, name))
            .collect::<Result<Vec<ArrayRef>>>()?;

        for row in 0..batch.num_rows() {
            let row_no = rows.len();
            let mut cells = BTreeMap::new();
            for (col, col_name) in columns.iter().zip(&headers) {
                cells.insert(col_name.clone(), extract_cell(col, col_name, row, row_no)?);
            }
            rows.push(Row { cells });
        }
    }

    Ok(Table::new(headers, rows))
}

/// Replace a dictionary-encoded column by its decoded values.
fn decode_dictionary(col: &ArrayRef, column: &str) -> Result<ArrayRef> {
    match col.data_type() {
        DataType::Dictionary(_, values) => arrow::compute::cast(col, values)
            .with_context(|| format!("decoding dictionary column '{column}'")),
        _ => Ok(col.clone()),
    }
}

/// Extract a single cell from an Arrow column.
///
/// `row` indexes the batch; `row_no` is the table row used in errors.
fn extract_cell(
    col: &ArrayRef,
    column: &str,
    row: usize,
    row_no: usize,
) -> Result<CellValue, SchemaError> {
    if col.is_null(row) {
        return Ok(CellValue::Null);
    }
    let value = match col.data_type() {
        DataType::Utf8 => return parse_text_cell(column, row_no, col.as_string::<i32>().value(row)),
        DataType::LargeUtf8 => {
            return parse_text_cell(column, row_no, col.as_string::<i64>().value(row));
        }
        DataType::Utf8View => {
            return parse_text_cell(column, row_no, col.as_string_view().value(row));
        }
        DataType::Int8 => CellValue::Integer(col.as_primitive::<Int8Type>().value(row) as i64),
        DataType::Int16 => CellValue::Integer(col.as_primitive::<Int16Type>().value(row) as i64),
        DataType::Int32 => CellValue::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::UInt8 => CellValue::Integer(col.as_primitive::<UInt8Type>().value(row) as i64),
        DataType::UInt16 => CellValue::Integer(col.as_primitive::<UInt16Type>().value(row) as i64),
        DataType::UInt32 => CellValue::Integer(col.as_primitive::<UInt32Type>().value(row) as i64),
        DataType::UInt64 => {
            let v = col.as_primitive::<UInt64Type>().value(row);
            let v = i64::try_from(v).map_err(|_| SchemaError::OutOfRange {
                column: column.to_string(),
                row: row_no,
                value: v.to_string(),
            })?;
            CellValue::Integer(v)
        }
        DataType::Float32 => CellValue::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => CellValue::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => CellValue::Text(col.as_boolean().value(row).to_string()),
        other => {
            return Err(SchemaError::UnsupportedType {
                column: column.to_string(),
                data_type: other.to_string(),
            });
        }
    };
    schema::coerce(column, row_no, value)
}
