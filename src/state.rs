use std::path::{Path, PathBuf};

use repo_dash::config::DashboardConfig;
use repo_dash::data::filter::{FilterOptions, FilterParams, LanguageSelection, StarRange};
use repo_dash::data::resolve::{MissingValuePolicy, UNKNOWN_LANGUAGE};
use repo_dash::data::schema::LANGUAGE;
use repo_dash::data::session::{Dashboard, Session};
use repo_dash::data::loader;

use crate::color::LanguageColors;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is opened).
    pub session: Option<Session>,

    /// File the session was loaded from.
    pub dataset_path: Option<PathBuf>,

    /// Active missing-value policy.
    pub policy: MissingValuePolicy,

    /// Languages and star bounds for the current policy.
    pub options: FilterOptions,

    /// Current filter selections.
    pub params: FilterParams,

    /// Pipeline output for the current selections (recomputed on every change).
    pub dashboard: Option<Dashboard>,

    pub colors: LanguageColors,

    /// Length of the star ranking.
    pub top_n: usize,

    /// Whether the filtered rows are listed under the charts.
    pub show_raw: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_config(&DashboardConfig::default())
    }
}

impl AppState {
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            session: None,
            dataset_path: None,
            policy: config.policy,
            options: FilterOptions::default(),
            params: FilterParams::default(),
            dashboard: None,
            colors: LanguageColors::default(),
            top_n: config.top_n,
            show_raw: false,
            status_message: None,
        }
    }

    /// Load `path` and make it the current session; failures go to the status line.
    pub fn open(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(table) => {
                self.set_session(Session::new(table).with_top_n(self.top_n));
                self.dataset_path = Some(path.to_path_buf());
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded session and select everything.
    pub fn set_session(&mut self, session: Session) {
        let languages = session
            .table()
            .column(LANGUAGE)
            .filter_map(|v| v.as_str())
            .chain(std::iter::once(UNKNOWN_LANGUAGE));
        self.colors = LanguageColors::new(languages);

        self.options = session.options(self.policy);
        self.params = self.options.widest();
        self.session = Some(session);
        self.status_message = None;
        self.refresh();
    }

    /// Switch policy; the star range follows the new bounds.
    pub fn set_policy(&mut self, policy: MissingValuePolicy) {
        if policy == self.policy {
            return;
        }
        self.policy = policy;
        if let Some(session) = &self.session {
            let old_bounds = self.options.bounds;
            self.options = session.options(policy);
            self.params.stars = if self.params.stars == old_bounds {
                self.options.bounds
            } else {
                self.params.stars.clamp_to(self.options.bounds)
            };
        }
        self.refresh();
    }

    pub fn set_language(&mut self, language: LanguageSelection) {
        self.params.language = language;
        self.refresh();
    }

    pub fn set_star_range(&mut self, stars: StarRange) {
        self.params.stars = stars.clamp_to(self.options.bounds);
        self.refresh();
    }

    /// Re-run the whole pipeline for the current selections.
    pub fn refresh(&mut self) {
        self.dashboard = self
            .session
            .as_ref()
            .map(|session| session.run(self.policy, &self.params));
    }
}
