use std::fmt;

use super::error::SchemaError;
use super::model::{CellValue, Table};

pub const REPOSITORY: &str = "repositories";
pub const STARS: &str = "stars_count";
pub const FORKS: &str = "forks_count";
pub const ISSUES: &str = "issues_count";
pub const PULL_REQUESTS: &str = "pull_requests";
pub const CONTRIBUTORS: &str = "contributors";
pub const LANGUAGE: &str = "language";

/// Columns the dashboard expects, in reporting order.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    REPOSITORY,
    STARS,
    FORKS,
    ISSUES,
    PULL_REQUESTS,
    CONTRIBUTORS,
    LANGUAGE,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Integer,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Text => write!(f, "text value"),
            ColumnType::Integer => write!(f, "integer"),
        }
    }
}

/// Declared type of a known column; `None` for columns outside the schema.
pub fn declared_type(column: &str) -> Option<ColumnType> {
    match column {
        REPOSITORY | LANGUAGE => Some(ColumnType::Text),
        STARS | FORKS | ISSUES | PULL_REQUESTS | CONTRIBUTORS => Some(ColumnType::Integer),
        _ => None,
    }
}

/// Required columns absent from `table`, in the order of `required`.
pub fn missing_columns(table: &Table, required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|col| !table.has_column(col))
        .map(|col| col.to_string())
        .collect()
}

/// Coerce a freshly parsed cell to its column's declared type.
///
/// `row` is only used for error reporting.
pub fn coerce(column: &str, row: usize, value: CellValue) -> Result<CellValue, SchemaError> {
    if value.is_null() {
        return Ok(CellValue::Null);
    }
    match declared_type(column) {
        None => Ok(value),
        Some(ColumnType::Text) => Ok(match value {
            CellValue::Integer(i) => CellValue::Text(i.to_string()),
            CellValue::Float(v) => CellValue::Text(v.to_string()),
            other => other,
        }),
        Some(ColumnType::Integer) => match value {
            CellValue::Integer(_) => Ok(value),
            CellValue::Float(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => {
                Ok(CellValue::Integer(v as i64))
            }
            other => Err(SchemaError::TypeMismatch {
                column: column.to_string(),
                row,
                value: match &other {
                    CellValue::Text(s) => s.clone(),
                    CellValue::Float(v) => v.to_string(),
                    v => v.to_string(),
                },
                expected: ColumnType::Integer,
            }),
        },
    }
}
