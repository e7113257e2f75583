use std::fmt;

use thiserror::Error;

use super::schema::ColumnType;

/// Errors raised while fitting loaded data to the declared schema.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("column '{column}', row {row}: '{value}' is not a valid {expected}")]
    TypeMismatch {
        column: String,
        row: usize,
        value: String,
        expected: ColumnType,
    },
    #[error("column '{column}', row {row}: {value} does not fit in a 64-bit integer")]
    OutOfRange {
        column: String,
        row: usize,
        value: String,
    },
    #[error("column '{column}' has unsupported type {data_type}")]
    UnsupportedType { column: String, data_type: String },
    #[error("column '{0}' appears more than once after trimming header whitespace")]
    DuplicateColumn(String),
}

/// Why the star-count bounds could not be observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeGap {
    EmptyTable,
    MissingColumn,
}

impl fmt::Display for RangeGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeGap::EmptyTable => write!(f, "no rows left after cleaning"),
            RangeGap::MissingColumn => write!(f, "no star counts in the table"),
        }
    }
}

/// Non-fatal pipeline outcomes shown to the user; none of them stop the pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Notice {
    #[error("Missing required columns: {}", .0.join(", "))]
    SchemaIncomplete(Vec<String>),
    #[error("Star range is undefined ({0}); using 0 to 0")]
    UndefinedRange(RangeGap),
    #[error("No repositories with language '{0}' remain in the table")]
    UnknownCategory(String),
}
