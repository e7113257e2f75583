use std::fmt;

use super::error::{Notice, RangeGap};
use super::model::{CellValue, Row, Table};
use super::schema::{LANGUAGE, STARS};

/// Label of the "no language filter" entry.
pub const ALL_LANGUAGES: &str = "All";

// ---------------------------------------------------------------------------
// Filter parameters
// ---------------------------------------------------------------------------

/// Language selection: every language, or one exact (case-sensitive) value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum LanguageSelection {
    #[default]
    All,
    Only(String),
}

impl LanguageSelection {
    fn admits(&self, value: &CellValue) -> bool {
        match self {
            LanguageSelection::All => true,
            LanguageSelection::Only(lang) => value.as_str() == Some(lang.as_str()),
        }
    }
}

impl fmt::Display for LanguageSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageSelection::All => write!(f, "{ALL_LANGUAGES}"),
            LanguageSelection::Only(lang) => write!(f, "{lang}"),
        }
    }
}

/// Inclusive star-count range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StarRange {
    pub min: i64,
    pub max: i64,
}

impl StarRange {
    pub fn new(min: i64, max: i64) -> Self {
        StarRange { min, max }
    }

    pub fn contains(&self, stars: i64) -> bool {
        self.min <= stars && stars <= self.max
    }

    /// Narrow `self` into `bounds`, keeping `min <= max`.
    pub fn clamp_to(self, bounds: StarRange) -> StarRange {
        let min = self.min.clamp(bounds.min, bounds.max);
        let max = self.max.clamp(min, bounds.max);
        StarRange { min, max }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterParams {
    pub language: LanguageSelection,
    pub stars: StarRange,
}

// ---------------------------------------------------------------------------
// Filter options offered for a cleaned table
// ---------------------------------------------------------------------------

/// Selectable values derived from the current cleaned table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    /// Distinct non-null languages, in order of first appearance.
    pub languages: Vec<String>,
    /// Observed star bounds, or `0..=0` when they are undefined.
    pub bounds: StarRange,
    /// Set when `bounds` is the fallback.
    pub notice: Option<Notice>,
}

impl FilterOptions {
    pub fn for_table(table: &Table) -> Self {
        let (bounds, notice) = match star_bounds(table) {
            Ok(bounds) => (bounds, None),
            Err(gap) => (StarRange::default(), Some(Notice::UndefinedRange(gap))),
        };
        FilterOptions {
            languages: distinct_languages(table),
            bounds,
            notice,
        }
    }

    /// Parameters that let every row of the table through.
    pub fn widest(&self) -> FilterParams {
        FilterParams {
            language: LanguageSelection::All,
            stars: self.bounds,
        }
    }
}

/// Minimum and maximum star count in `table`.
pub fn star_bounds(table: &Table) -> Result<StarRange, RangeGap> {
    if table.is_empty() {
        return Err(RangeGap::EmptyTable);
    }
    let mut stars = table.column(STARS).filter_map(CellValue::as_i64);
    let first = stars.next().ok_or(RangeGap::MissingColumn)?;
    Ok(stars.fold(StarRange::new(first, first), |acc, s| {
        StarRange::new(acc.min.min(s), acc.max.max(s))
    }))
}

/// Distinct non-null language values in order of first appearance.
pub fn distinct_languages(table: &Table) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in table.column(LANGUAGE) {
        if let Some(lang) = value.as_str() {
            if !seen.iter().any(|s| s == lang) {
                seen.push(lang.to_string());
            }
        }
    }
    seen
}

// ---------------------------------------------------------------------------
// Filter engine
// ---------------------------------------------------------------------------

/// Whether a row passes both the language and the star-range filter.
///
/// A row without a numeric star count never passes the range filter.
pub fn matches(row: &Row, params: &FilterParams) -> bool {
    params.language.admits(row.get(LANGUAGE))
        && row
            .get(STARS)
            .as_i64()
            .is_some_and(|stars| params.stars.contains(stars))
}

/// Return the view of `table` whose rows pass `params`, in table order.
pub fn apply(table: &Table, params: &FilterParams) -> Table {
    table.derive(
        table
            .rows
            .iter()
            .filter(|row| matches(row, params))
            .cloned()
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::REPOSITORY;

    fn table(rows: &[(&str, Option<i64>, Option<&str>)]) -> Table {
        Table::new(
            vec![REPOSITORY.into(), STARS.into(), LANGUAGE.into()],
            rows.iter()
                .map(|(name, stars, lang)| {
                    Row::from_pairs([
                        (REPOSITORY, CellValue::from(*name)),
                        (STARS, (*stars).into()),
                        (LANGUAGE, (*lang).into()),
                    ])
                })
                .collect(),
        )
    }

    fn names(view: &Table) -> Vec<String> {
        view.column(REPOSITORY).map(|v| v.to_string()).collect()
    }

    fn only(lang: &str, min: i64, max: i64) -> FilterParams {
        FilterParams {
            language: LanguageSelection::Only(lang.into()),
            stars: StarRange::new(min, max),
        }
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let t = table(&[
            ("low", Some(4), Some("Go")),
            ("min", Some(5), Some("Go")),
            ("max", Some(10), Some("Go")),
            ("high", Some(11), Some("Go")),
        ]);
        let params = FilterParams {
            language: LanguageSelection::All,
            stars: StarRange::new(5, 10),
        };
        assert_eq!(names(&apply(&t, &params)), vec!["min", "max"]);
    }

    #[test]
    fn language_match_is_exact_and_case_sensitive() {
        let t = table(&[
            ("a", Some(1), Some("Go")),
            ("b", Some(1), Some("go")),
            ("c", Some(1), Some("Golang")),
        ]);
        assert_eq!(names(&apply(&t, &only("Go", 0, 10))), vec!["a"]);
    }

    #[test]
    fn filters_apply_conjunctively() {
        let t = table(&[
            ("a", Some(5), Some("Go")),
            ("b", Some(10), Some("Go")),
            ("c", Some(0), Some("Rust")),
            ("d", Some(50), Some("Go")),
        ]);
        assert_eq!(names(&apply(&t, &only("Go", 5, 10))), vec!["a", "b"]);
    }

    #[test]
    fn applying_twice_is_idempotent() {
        let t = table(&[
            ("a", Some(5), Some("Go")),
            ("b", Some(10), Some("Rust")),
            ("c", None, Some("Go")),
        ]);
        let params = only("Go", 0, 7);
        let once = apply(&t, &params);
        assert_eq!(apply(&once, &params), once);
    }

    #[test]
    fn rows_without_stars_never_pass_range() {
        let t = table(&[("a", None, Some("Go"))]);
        let params = FilterParams {
            language: LanguageSelection::All,
            stars: StarRange::new(i64::MIN, i64::MAX),
        };
        assert!(apply(&t, &params).is_empty());
    }

    #[test]
    fn unknown_language_yields_empty_view() {
        let t = table(&[("a", Some(5), Some("Go"))]);
        let view = apply(&t, &only("Haskell", 0, 10));
        assert!(view.is_empty());
        assert_eq!(view.column_names, t.column_names);
    }

    #[test]
    fn bounds_follow_the_table() {
        let t = table(&[
            ("a", Some(7), Some("Go")),
            ("b", None, Some("Go")),
            ("c", Some(-2), Some("Go")),
            ("d", Some(30), Some("Go")),
        ]);
        assert_eq!(star_bounds(&t), Ok(StarRange::new(-2, 30)));
    }

    #[test]
    fn empty_table_falls_back_to_zero_bounds() {
        let t = table(&[]);
        let options = FilterOptions::for_table(&t);
        assert_eq!(options.bounds, StarRange::new(0, 0));
        assert_eq!(
            options.notice,
            Some(Notice::UndefinedRange(RangeGap::EmptyTable))
        );
    }

    #[test]
    fn absent_star_column_falls_back_to_zero_bounds() {
        let t = Table::new(
            vec![LANGUAGE.into()],
            vec![Row::from_pairs([(LANGUAGE, "Go")])],
        );
        assert_eq!(star_bounds(&t), Err(RangeGap::MissingColumn));
    }

    #[test]
    fn languages_are_distinct_in_first_seen_order() {
        let t = table(&[
            ("a", Some(1), Some("Rust")),
            ("b", Some(1), None),
            ("c", Some(1), Some("Go")),
            ("d", Some(1), Some("Rust")),
        ]);
        assert_eq!(distinct_languages(&t), vec!["Rust", "Go"]);
    }

    #[test]
    fn clamp_keeps_range_inside_bounds() {
        let bounds = StarRange::new(0, 100);
        assert_eq!(StarRange::new(-5, 500).clamp_to(bounds), bounds);
        assert_eq!(
            StarRange::new(150, 200).clamp_to(bounds),
            StarRange::new(100, 100)
        );
    }
}
