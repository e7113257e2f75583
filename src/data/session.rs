use super::aggregate::{self, CategoryCount, ColumnStats, RankedRepo};
use super::error::Notice;
use super::filter::{self, FilterOptions, FilterParams, LanguageSelection};
use super::model::Table;
use super::resolve::{self, MissingValuePolicy, ResolveSummary};
use super::schema::{self, REQUIRED_COLUMNS};

/// Everything the dashboard renders for one set of parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub policy: MissingValuePolicy,
    pub params: FilterParams,
    pub resolve_summary: ResolveSummary,
    /// Rows passing the filters.
    pub view: Table,
    pub stats: Vec<ColumnStats>,
    pub top: Vec<RankedRepo>,
    pub languages: Vec<CategoryCount>,
    pub stars_vs_forks: Vec<(String, Vec<[f64; 2]>)>,
    pub notices: Vec<Notice>,
}

impl Dashboard {
    /// Headline shown above the statistics.
    pub fn headline(&self) -> String {
        format!(
            "Showing {} repositories with stars between {} and {}",
            self.view.len(),
            self.params.stars.min,
            self.params.stars.max
        )
    }
}

/// One user's session: the loaded table plus the schema check done on it.
///
/// The loaded table is kept as is; every call runs the pipeline from it and
/// returns fresh tables.
#[derive(Debug, Clone)]
pub struct Session {
    table: Table,
    missing_columns: Vec<String>,
    top_n: usize,
}

impl Session {
    pub fn new(table: Table) -> Self {
        let missing_columns = schema::missing_columns(&table, &REQUIRED_COLUMNS);
        if !missing_columns.is_empty() {
            log::warn!("{}", Notice::SchemaIncomplete(missing_columns.clone()));
        }
        Session {
            table,
            missing_columns,
            top_n: aggregate::TOP_N,
        }
    }

    /// Length of the star ranking (10 unless configured otherwise).
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// The table as loaded.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Required columns absent from the loaded table.
    pub fn missing_columns(&self) -> &[String] {
        &self.missing_columns
    }

    pub fn schema_notice(&self) -> Option<Notice> {
        (!self.missing_columns.is_empty())
            .then(|| Notice::SchemaIncomplete(self.missing_columns.clone()))
    }

    /// Languages and star bounds selectable once `policy` has been applied.
    pub fn options(&self, policy: MissingValuePolicy) -> FilterOptions {
        FilterOptions::for_table(&resolve::resolve(&self.table, policy).table)
    }

    /// Run resolver, filter engine and aggregator from scratch.
    pub fn run(&self, policy: MissingValuePolicy, params: &FilterParams) -> Dashboard {
        let resolved = resolve::resolve(&self.table, policy);
        let options = FilterOptions::for_table(&resolved.table);

        let mut notices: Vec<Notice> = self.schema_notice().into_iter().collect();
        notices.extend(options.notice.clone());
        if let LanguageSelection::Only(lang) = &params.language {
            if !options.languages.contains(lang) {
                notices.push(Notice::UnknownCategory(lang.clone()));
            }
        }
        for notice in &notices {
            log::warn!("{notice}");
        }

        let view = filter::apply(&resolved.table, params);
        log::debug!(
            "{} of {} rows pass language={} stars={}..={}",
            view.len(),
            resolved.table.len(),
            params.language,
            params.stars.min,
            params.stars.max
        );

        Dashboard {
            policy,
            params: params.clone(),
            resolve_summary: resolved.summary,
            stats: aggregate::describe(&view),
            top: aggregate::top_by_stars(&view, self.top_n),
            languages: aggregate::language_counts(&view),
            stars_vs_forks: aggregate::stars_vs_forks(&view),
            view,
            notices,
        }
    }
}
