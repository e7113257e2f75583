use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::{CellValue, Row, Table};
use super::schema::{FORKS, LANGUAGE, STARS};

/// Columns whose gaps the resolver acts on.
pub const CRITICAL_COLUMNS: [&str; 3] = [STARS, FORKS, LANGUAGE];

/// Replacement for a missing language.
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// How gaps in the critical columns are handled; chosen once per session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingValuePolicy {
    /// Remove rows with a gap in any critical column.
    #[default]
    Drop,
    /// Fill star/fork gaps with 0 and language gaps with "Unknown".
    FillDefault,
}

impl MissingValuePolicy {
    pub const ALL: [MissingValuePolicy; 2] =
        [MissingValuePolicy::Drop, MissingValuePolicy::FillDefault];

    pub fn label(self) -> &'static str {
        match self {
            MissingValuePolicy::Drop => "Drop Rows",
            MissingValuePolicy::FillDefault => "Fill with Default",
        }
    }
}

/// What the resolver changed, for the status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveSummary {
    Dropped { rows: usize },
    Filled { cells: usize },
}

impl fmt::Display for ResolveSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveSummary::Dropped { rows } => write!(
                f,
                "Dropped {rows} rows with missing values in 'stars_count', 'forks_count', or 'language'."
            ),
            ResolveSummary::Filled { cells } => write!(
                f,
                "Filled {cells} missing values: 0 for numeric columns and '{UNKNOWN_LANGUAGE}' for language."
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub table: Table,
    pub summary: ResolveSummary,
}

/// Apply `policy` to `table`, returning a cleaned copy.
///
/// Never fails: a critical column absent from the table is skipped. Only the
/// critical columns are touched; gaps in issue, pull-request and contributor
/// counts are kept under both policies.
pub fn resolve(table: &Table, policy: MissingValuePolicy) -> Resolution {
    let present: Vec<&str> = CRITICAL_COLUMNS
        .iter()
        .copied()
        .filter(|col| table.has_column(col))
        .collect();

    match policy {
        MissingValuePolicy::Drop => {
            let rows: Vec<Row> = table
                .rows
                .iter()
                .filter(|row| present.iter().all(|col| !row.get(col).is_null()))
                .cloned()
                .collect();
            let dropped = table.len() - rows.len();
            Resolution {
                table: table.derive(rows),
                summary: ResolveSummary::Dropped { rows: dropped },
            }
        }
        MissingValuePolicy::FillDefault => {
            let mut filled = 0;
            let rows = table
                .rows
                .iter()
                .map(|row| {
                    let mut row = row.clone();
                    for col in &present {
                        if row.get(col).is_null() {
                            row = row.with(col, default_for(col));
                            filled += 1;
                        }
                    }
                    row
                })
                .collect();
            Resolution {
                table: table.derive(rows),
                summary: ResolveSummary::Filled { cells: filled },
            }
        }
    }
}

fn default_for(column: &str) -> CellValue {
    if column == LANGUAGE {
        CellValue::from(UNKNOWN_LANGUAGE)
    } else {
        CellValue::Integer(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::{ISSUES, REPOSITORY};

    fn repo(name: &str, stars: Option<i64>, forks: Option<i64>, lang: Option<&str>) -> Row {
        Row::from_pairs([
            (REPOSITORY, CellValue::from(name)),
            (STARS, stars.into()),
            (FORKS, forks.into()),
            (LANGUAGE, lang.into()),
            (ISSUES, CellValue::Null),
        ])
    }

    fn sample() -> Table {
        Table::new(
            vec![
                REPOSITORY.into(),
                STARS.into(),
                FORKS.into(),
                LANGUAGE.into(),
                ISSUES.into(),
            ],
            vec![
                repo("a", Some(5), Some(1), Some("Go")),
                repo("b", None, Some(2), Some("Go")),
                repo("c", Some(7), Some(0), None),
                repo("d", Some(9), None, Some("Rust")),
                repo("e", Some(1), Some(1), Some("C")),
            ],
        )
    }

    #[test]
    fn drop_keeps_complete_rows_in_order() {
        let out = resolve(&sample(), MissingValuePolicy::Drop);
        let names: Vec<_> = out.table.column(REPOSITORY).cloned().collect();
        assert_eq!(names, vec![CellValue::from("a"), CellValue::from("e")]);
        assert_eq!(out.summary, ResolveSummary::Dropped { rows: 3 });
    }

    #[test]
    fn drop_ignores_gaps_outside_critical_columns() {
        let out = resolve(&sample(), MissingValuePolicy::Drop);
        assert!(out.table.rows.iter().all(|r| r.get(ISSUES).is_null()));
    }

    #[test]
    fn fill_default_replaces_critical_gaps_only() {
        let out = resolve(&sample(), MissingValuePolicy::FillDefault);
        assert_eq!(out.table.len(), 5);
        assert_eq!(out.table.rows[1].get(STARS), &CellValue::Integer(0));
        assert_eq!(out.table.rows[2].get(LANGUAGE), &CellValue::from("Unknown"));
        assert_eq!(out.table.rows[3].get(FORKS), &CellValue::Integer(0));
        assert!(out.table.rows.iter().all(|r| r.get(ISSUES).is_null()));
        assert_eq!(out.summary, ResolveSummary::Filled { cells: 3 });
    }

    #[test]
    fn resolve_leaves_input_untouched() {
        let table = sample();
        let before = table.clone();
        let _ = resolve(&table, MissingValuePolicy::FillDefault);
        assert_eq!(table, before);
    }

    #[test]
    fn absent_critical_column_is_skipped() {
        let table = Table::new(
            vec![REPOSITORY.into(), LANGUAGE.into()],
            vec![
                Row::from_pairs([(REPOSITORY, "a"), (LANGUAGE, "Go")]),
                Row::from_pairs([(REPOSITORY, CellValue::from("b")), (LANGUAGE, CellValue::Null)]),
            ],
        );
        let dropped = resolve(&table, MissingValuePolicy::Drop);
        assert_eq!(dropped.table.len(), 1);

        let filled = resolve(&table, MissingValuePolicy::FillDefault);
        assert!(!filled.table.has_column(STARS));
        assert!(filled.table.rows.iter().all(|r| !r.cells.contains_key(STARS)));
    }

    #[test]
    fn policy_reads_from_snake_case() {
        let policy: MissingValuePolicy = serde_json::from_str("\"fill_default\"").unwrap();
        assert_eq!(policy, MissingValuePolicy::FillDefault);
    }
}
