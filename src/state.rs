use launch_dash::config::DashboardConfig;
use launch_dash::data::Dataset;
use launch_dash::engine::{
    derive_correlation_view, derive_outcome_view, CorrelationView, OutcomeView, SelectionState,
};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Loaded session: dataset + selection + derived views
// ---------------------------------------------------------------------------

/// Everything that exists only once a dataset is loaded.
pub struct Session {
    pub dataset: Dataset,
    /// Current selection. Replaced wholesale, never patched.
    pub selection: SelectionState,
    /// Cached output of [`derive_outcome_view`] for `selection`.
    pub outcome_view: OutcomeView,
    /// Cached output of [`derive_correlation_view`] for `selection`.
    pub correlation_view: CorrelationView,
    pub site_colors: ColorMap,
    pub booster_colors: ColorMap,
}

/// Which views a selection change re-derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Recomputed {
    pub outcome: bool,
    pub correlation: bool,
}

impl Session {
    fn new(dataset: Dataset) -> Self {
        let selection = SelectionState::default_for(&dataset);
        let outcome_view = derive_outcome_view(&dataset, &selection);
        let correlation_view = derive_correlation_view(&dataset, &selection);
        let site_colors = ColorMap::new(dataset.sites().iter().map(String::as_str));
        let booster_colors = ColorMap::new(
            dataset
                .records()
                .iter()
                .map(|r| r.booster_category.as_str()),
        );
        Session {
            dataset,
            selection,
            outcome_view,
            correlation_view,
            site_colors,
            booster_colors,
        }
    }

    /// Swap in a new selection and re-derive only the views whose inputs
    /// changed. The outcome view depends on the site alone.
    fn replace_selection(&mut self, next: SelectionState) -> Recomputed {
        let site_changed = next.site() != self.selection.site();
        let range_changed = next.payload_range() != self.selection.payload_range();
        self.selection = next;

        let recomputed = Recomputed {
            outcome: site_changed,
            correlation: site_changed || range_changed,
        };
        if recomputed.outcome {
            self.outcome_view = derive_outcome_view(&self.dataset, &self.selection);
        }
        if recomputed.correlation {
            self.correlation_view = derive_correlation_view(&self.dataset, &self.selection);
        }
        if recomputed != Recomputed::default() {
            log::debug!(
                "Selection {} {:?}: recomputed {recomputed:?}",
                self.selection.site(),
                self.selection.payload_range()
            );
        }
        recomputed
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded dataset and its views (None until a file is loaded).
    pub session: Option<Session>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            session: None,
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset: default selection, fresh views.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.session = Some(Session::new(dataset));
        self.status_message = None;
    }

    /// Apply one combined control update (site and range together).
    ///
    /// Raw values are normalized first, so anything the widgets hand over
    /// is accepted. Does nothing before a dataset is loaded.
    pub fn select(&mut self, raw_site: &str, raw_range: [f64; 2]) -> Recomputed {
        let Some(session) = self.session.as_mut() else {
            return Recomputed::default();
        };
        let next =
            SelectionState::normalize(raw_site, raw_range, &session.dataset, &self.config.slider);
        session.replace_selection(next)
    }
}
