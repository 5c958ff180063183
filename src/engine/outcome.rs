use std::collections::HashMap;

use serde::Serialize;

use super::selection::{SelectionState, SiteSelection};
use crate::data::model::{Dataset, OutcomeClass};

// ---------------------------------------------------------------------------
// View-model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteCount {
    pub site: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeCount {
    pub class: OutcomeClass,
    pub count: usize,
}

/// What the outcome (pie) chart shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum OutcomeView {
    /// Record count per site, in order of first occurrence.
    BySite(Vec<SiteCount>),
    /// Count per outcome class at one site, ascending by class.
    ByOutcome {
        site: String,
        counts: Vec<OutcomeCount>,
    },
}

impl OutcomeView {
    /// Sum of all slice counts.
    pub fn total(&self) -> usize {
        match self {
            OutcomeView::BySite(v) => v.iter().map(|c| c.count).sum(),
            OutcomeView::ByOutcome { counts, .. } => counts.iter().map(|c| c.count).sum(),
        }
    }

    /// No slices to draw.
    pub fn is_empty(&self) -> bool {
        match self {
            OutcomeView::BySite(v) => v.is_empty(),
            OutcomeView::ByOutcome { counts, .. } => counts.is_empty(),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            OutcomeView::BySite(_) => "All Sites",
            OutcomeView::ByOutcome { site, .. } => site,
        }
    }
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Aggregate launch outcomes for the pie chart.
///
/// All sites: one slice per site. One site: one slice per outcome class
/// present there. The payload range does not affect this view.
pub fn derive_outcome_view(dataset: &Dataset, selection: &SelectionState) -> OutcomeView {
    match selection.site() {
        SiteSelection::All => OutcomeView::BySite(count_by_site(dataset)),
        SiteSelection::Site(site) => OutcomeView::ByOutcome {
            site: site.clone(),
            counts: count_by_outcome(dataset, site),
        },
    }
}

fn count_by_site(dataset: &Dataset) -> Vec<SiteCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<SiteCount> = Vec::new();
    for rec in dataset.records() {
        let slot = *index.entry(rec.site.as_str()).or_insert_with(|| {
            counts.push(SiteCount {
                site: rec.site.clone(),
                count: 0,
            });
            counts.len() - 1
        });
        counts[slot].count += 1;
    }
    counts
}

fn count_by_outcome(dataset: &Dataset, site: &str) -> Vec<OutcomeCount> {
    let mut tally = [0usize; 2];
    for rec in dataset.records().iter().filter(|r| r.site == site) {
        tally[rec.outcome.value() as usize] += 1;
    }
    OutcomeClass::ALL
        .into_iter()
        .zip(tally)
        .filter(|&(_, count)| count > 0)
        .map(|(class, count)| OutcomeCount { class, count })
        .collect()
}
