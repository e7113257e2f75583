use std::collections::HashMap;

use super::model::{CellValue, Table};
use super::schema::{self, ColumnType, FORKS, LANGUAGE, REPOSITORY, STARS};

/// Length of the star ranking shown on the dashboard.
pub const TOP_N: usize = 10;

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

/// Descriptive statistics of one numeric column.
///
/// Statistics that are undefined for the number of values (anything on zero
/// values, `std` on one) are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    pub column: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

impl ColumnStats {
    /// Row labels and values in display order.
    pub fn entries(&self) -> [(&'static str, Option<f64>); 8] {
        [
            ("count", Some(self.count as f64)),
            ("mean", self.mean),
            ("std", self.std),
            ("min", self.min),
            ("25%", self.q25),
            ("50%", self.median),
            ("75%", self.q75),
            ("max", self.max),
        ]
    }

    fn from_values(column: &str, mut nums: Vec<f64>) -> Self {
        let count = nums.len();
        if count == 0 {
            return ColumnStats {
                column: column.to_string(),
                count,
                mean: None,
                std: None,
                min: None,
                q25: None,
                median: None,
                q75: None,
                max: None,
            };
        }

        let n = count as f64;
        let mean = nums.iter().sum::<f64>() / n;
        let std = (count > 1).then(|| {
            let var = nums.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
            var.sqrt()
        });
        nums.sort_by(f64::total_cmp);

        ColumnStats {
            column: column.to_string(),
            count,
            mean: Some(mean),
            std,
            min: nums.first().copied(),
            q25: Some(percentile_linear(&nums, 0.25)),
            median: Some(percentile_linear(&nums, 0.50)),
            q75: Some(percentile_linear(&nums, 0.75)),
            max: nums.last().copied(),
        }
    }
}

/// Linearly interpolated percentile of a sorted, non-empty slice.
fn percentile_linear(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] * (1.0 - frac) + sorted[upper] * frac
}

/// Whether `column` is summarised: declared numeric, or every non-null value numeric.
fn is_numeric_column(table: &Table, column: &str) -> bool {
    match schema::declared_type(column) {
        Some(ColumnType::Integer) => true,
        Some(ColumnType::Text) => false,
        None => {
            let mut values = table.column(column).filter(|v| !v.is_null()).peekable();
            values.peek().is_some() && values.all(CellValue::is_numeric)
        }
    }
}

/// Statistics for every numeric column of `view`, in column order.
pub fn describe(view: &Table) -> Vec<ColumnStats> {
    view.column_names
        .iter()
        .filter(|col| is_numeric_column(view, col))
        .map(|col| {
            let nums = view.column(col).filter_map(CellValue::as_f64).collect();
            ColumnStats::from_values(col, nums)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Top-N ranking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedRepo {
    pub repository: String,
    pub stars: Option<i64>,
}

/// The `n` rows with the most stars, descending; ties keep table order and
/// rows without a star count come last.
pub fn top_by_stars(view: &Table, n: usize) -> Vec<RankedRepo> {
    let mut ranked: Vec<RankedRepo> = view
        .rows
        .iter()
        .map(|row| RankedRepo {
            repository: row.get(REPOSITORY).to_string(),
            stars: row.get(STARS).as_i64(),
        })
        .collect();
    // `Option` orders None first, so reversing puts it last.
    ranked.sort_by(|a, b| b.stars.cmp(&a.stars));
    ranked.truncate(n);
    ranked
}

// ---------------------------------------------------------------------------
// Category counts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub value: CellValue,
    pub count: usize,
}

/// Rows per distinct value of `column`, most frequent first.
///
/// Nulls form their own bucket so the counts add up to the row count. Equal
/// counts keep the order in which the values first appear.
pub fn value_counts(view: &Table, column: &str) -> Vec<CategoryCount> {
    let mut slots: HashMap<&CellValue, usize> = HashMap::new();
    let mut counts: Vec<CategoryCount> = Vec::new();
    for value in view.column(column) {
        match slots.get(value) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                slots.insert(value, counts.len());
                counts.push(CategoryCount {
                    value: value.clone(),
                    count: 1,
                });
            }
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Repositories per language.
pub fn language_counts(view: &Table) -> Vec<CategoryCount> {
    value_counts(view, LANGUAGE)
}

// ---------------------------------------------------------------------------
// Stars vs forks
// ---------------------------------------------------------------------------

/// Scatter points `[stars, forks]` grouped by language, groups in first-seen order.
pub fn stars_vs_forks(view: &Table) -> Vec<(String, Vec<[f64; 2]>)> {
    let mut groups: Vec<(String, Vec<[f64; 2]>)> = Vec::new();
    for row in &view.rows {
        let (Some(stars), Some(forks)) = (row.get(STARS).as_f64(), row.get(FORKS).as_f64()) else {
            continue;
        };
        let lang = row.get(LANGUAGE).to_string();
        match groups.iter_mut().find(|(name, _)| *name == lang) {
            Some((_, points)) => points.push([stars, forks]),
            None => groups.push((lang, vec![[stars, forks]])),
        }
    }
    groups
}
