use std::fmt;

use serde::Serialize;

use crate::config::SliderConfig;
use crate::data::model::Dataset;

/// Site value meaning "no site filter".
pub const ALL_SITES: &str = "ALL";

// ---------------------------------------------------------------------------
// SiteSelection
// ---------------------------------------------------------------------------

/// The site control: every site, or exactly one.
///
/// A concrete site is not checked against the dataset; an unknown name is a
/// legitimate query with an empty result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Interpret a raw control value; `"ALL"` is the sentinel.
    pub fn parse(raw: &str) -> Self {
        if raw == ALL_SITES {
            SiteSelection::All
        } else {
            SiteSelection::Site(raw.to_string())
        }
    }

    /// Whether a record at `site` passes this selection.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(s) => s == site,
        }
    }

    /// Chart title: "All Sites" or the site name.
    pub fn title(&self) -> &str {
        match self {
            SiteSelection::All => "All Sites",
            SiteSelection::Site(s) => s,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "{ALL_SITES}"),
            SiteSelection::Site(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// SelectionState
// ---------------------------------------------------------------------------

/// The full user selection. Replaced wholesale on every interaction.
///
/// Invariant: `payload_range[0] <= payload_range[1]`, both finite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionState {
    site: SiteSelection,
    payload_range: [f64; 2],
}

impl SelectionState {
    /// Initial selection: all sites, full payload span of the dataset.
    pub fn default_for(dataset: &Dataset) -> Self {
        Self {
            site: SiteSelection::All,
            payload_range: [dataset.min_payload(), dataset.max_payload()],
        }
    }

    /// Turn raw control values into a valid selection. Never fails.
    ///
    /// * non-finite `lo`/`hi` fall back to the dataset's min/max payload
    /// * an inverted range is swapped
    /// * both bounds are clamped into the slider interval
    pub fn normalize(
        raw_site: &str,
        raw_range: [f64; 2],
        dataset: &Dataset,
        slider: &SliderConfig,
    ) -> Self {
        let [raw_lo, raw_hi] = raw_range;
        let lo = if raw_lo.is_finite() { raw_lo } else { dataset.min_payload() };
        let hi = if raw_hi.is_finite() { raw_hi } else { dataset.max_payload() };
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        // clamp is monotonic, so order survives
        let payload_range = [slider.clamp(lo), slider.clamp(hi)];

        if payload_range != raw_range {
            log::debug!("Normalized payload range {raw_range:?} -> {payload_range:?}");
        }

        Self {
            site: SiteSelection::parse(raw_site),
            payload_range,
        }
    }

    pub fn site(&self) -> &SiteSelection {
        &self.site
    }

    /// `[lo, hi]`, `lo <= hi`.
    pub fn payload_range(&self) -> [f64; 2] {
        self.payload_range
    }

    /// Strict containment: `lo < mass < hi`.
    pub fn payload_in_range(&self, mass: f64) -> bool {
        let [lo, hi] = self.payload_range;
        lo < mass && mass < hi
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, OutcomeClass};

    fn dataset() -> Dataset {
        Dataset::new(
            [(500.0, "A"), (2000.0, "B"), (9000.0, "A")]
                .into_iter()
                .map(|(m, s)| LaunchRecord {
                    site: s.to_string(),
                    payload_mass_kg: m,
                    booster_category: "FT".into(),
                    outcome: OutcomeClass::Success,
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_default_selection_spans_dataset() {
        let s = SelectionState::default_for(&dataset());
        assert_eq!(s.site(), &SiteSelection::All);
        assert_eq!(s.payload_range(), [500.0, 9000.0]);
    }

    #[test]
    fn test_inverted_range_is_swapped() {
        let s = SelectionState::normalize("A", [5000.0, 1000.0], &dataset(), &SliderConfig::default());
        assert_eq!(s.payload_range(), [1000.0, 5000.0]);
        assert_eq!(s.site(), &SiteSelection::Site("A".into()));
    }

    #[test]
    fn test_non_finite_bounds_fall_back_to_dataset() {
        let ds = dataset();
        let slider = SliderConfig::default();
        let s = SelectionState::normalize("ALL", [f64::NAN, f64::INFINITY], &ds, &slider);
        assert_eq!(s.payload_range(), [500.0, 9000.0]);

        let s = SelectionState::normalize("ALL", [3000.0, f64::NAN], &ds, &slider);
        assert_eq!(s.payload_range(), [3000.0, 9000.0]);
    }

    #[test]
    fn test_range_clamped_to_slider() {
        let s = SelectionState::normalize("ALL", [-50.0, 25_000.0], &dataset(), &SliderConfig::default());
        assert_eq!(s.payload_range(), [0.0, 10_000.0]);
    }

    #[test]
    fn test_unknown_site_passes_through() {
        let s = SelectionState::normalize("Z", [0.0, 1.0], &dataset(), &SliderConfig::default());
        assert_eq!(s.site(), &SiteSelection::Site("Z".into()));
        assert_eq!(s.site().title(), "Z");
    }

    #[test]
    fn test_strict_payload_bounds() {
        let s = SelectionState::normalize("ALL", [1000.0, 2000.0], &dataset(), &SliderConfig::default());
        assert!(!s.payload_in_range(1000.0));
        assert!(s.payload_in_range(1500.0));
        assert!(!s.payload_in_range(2000.0));
    }
}
