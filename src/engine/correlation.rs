use std::collections::HashSet;

use serde::Serialize;

use super::selection::SelectionState;
use crate::data::model::{Dataset, OutcomeClass};

// ---------------------------------------------------------------------------
// View-model
// ---------------------------------------------------------------------------

/// One scatter point: payload on x, outcome class on y.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationPoint {
    pub payload_mass_kg: f64,
    pub outcome: OutcomeClass,
    pub booster_category: String,
}

/// What the payload/outcome scatter chart shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationView {
    /// "All Sites" or the selected site name.
    pub title: String,
    /// Surviving records, in dataset order.
    pub points: Vec<CorrelationPoint>,
}

impl CorrelationView {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Distinct booster categories in order of first appearance, for the
    /// legend.
    pub fn booster_categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.points
            .iter()
            .map(|p| p.booster_category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Records whose payload lies strictly inside the selected range, narrowed
/// to the selected site. Boundary-equal payloads are excluded, so a
/// zero-width range is always empty.
pub fn derive_correlation_view(dataset: &Dataset, selection: &SelectionState) -> CorrelationView {
    let site = selection.site();
    let points = dataset
        .records()
        .iter()
        .filter(|r| selection.payload_in_range(r.payload_mass_kg))
        .filter(|r| site.matches(&r.site))
        .map(|r| CorrelationPoint {
            payload_mass_kg: r.payload_mass_kg,
            outcome: r.outcome,
            booster_category: r.booster_category.clone(),
        })
        .collect();

    CorrelationView {
        title: site.title().to_string(),
        points,
    }
}
