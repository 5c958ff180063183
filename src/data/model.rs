use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DataLoadError;

// ---------------------------------------------------------------------------
// OutcomeClass – binary launch outcome
// ---------------------------------------------------------------------------

/// Launch outcome. Ordered so that `Failure` (0) sorts before `Success` (1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OutcomeClass {
    Failure = 0,
    Success = 1,
}

impl OutcomeClass {
    /// Both classes in ascending order.
    pub const ALL: [OutcomeClass; 2] = [OutcomeClass::Failure, OutcomeClass::Success];

    /// Numeric class value as stored in the source table.
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Interpret a numeric cell. Only exact 0 and 1 are accepted, so
    /// `1.0` from a float column works but `0.5` does not.
    pub fn from_f64(v: f64) -> Option<Self> {
        if v == 0.0 {
            Some(OutcomeClass::Failure)
        } else if v == 1.0 {
            Some(OutcomeClass::Success)
        } else {
            None
        }
    }
}

impl fmt::Display for OutcomeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchRecord {
    /// Launch site identifier, never empty.
    pub site: String,
    /// Payload mass in kg, finite and non-negative.
    pub payload_mass_kg: f64,
    /// Booster version category. Used for colouring only.
    pub booster_category: String,
    pub outcome: OutcomeClass,
}

/// A row as it comes out of a source file, before validation.
///
/// Column names follow the source table headers; the snake-case names are
/// accepted as aliases.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Launch Site", alias = "site")]
    pub site: Option<String>,
    #[serde(rename = "Payload Mass (kg)", alias = "payload_mass_kg")]
    pub payload_mass_kg: Option<f64>,
    #[serde(rename = "Booster Version Category", alias = "booster_category")]
    pub booster_category: Option<String>,
    #[serde(rename = "class", alias = "outcome_class")]
    pub outcome_class: Option<f64>,
}

/// Required columns: (source header, snake-case alias).
pub const REQUIRED_COLUMNS: [(&str, &str); 4] = [
    ("Launch Site", "site"),
    ("Payload Mass (kg)", "payload_mass_kg"),
    ("Booster Version Category", "booster_category"),
    ("class", "outcome_class"),
];

impl LaunchRecord {
    /// Validate a raw row. `row` is the zero-based data row used in errors.
    pub fn from_raw(row: usize, raw: RawRecord) -> Result<Self, DataLoadError> {
        let site = raw.site.ok_or(DataLoadError::MissingValue {
            row,
            column: REQUIRED_COLUMNS[0].0,
        })?;
        let site = site.trim().to_string();
        if site.is_empty() {
            return Err(DataLoadError::EmptySite { row });
        }

        let payload_mass_kg = raw.payload_mass_kg.ok_or(DataLoadError::MissingValue {
            row,
            column: REQUIRED_COLUMNS[1].0,
        })?;
        if !payload_mass_kg.is_finite() || payload_mass_kg < 0.0 {
            return Err(DataLoadError::InvalidPayload {
                row,
                value: payload_mass_kg,
            });
        }

        let booster_category = raw.booster_category.ok_or(DataLoadError::MissingValue {
            row,
            column: REQUIRED_COLUMNS[2].0,
        })?;

        let class = raw.outcome_class.ok_or(DataLoadError::MissingValue {
            row,
            column: REQUIRED_COLUMNS[3].0,
        })?;
        let outcome = OutcomeClass::from_f64(class)
            .ok_or(DataLoadError::InvalidOutcome { row, value: class })?;

        Ok(LaunchRecord {
            site,
            payload_mass_kg,
            booster_category: booster_category.trim().to_string(),
            outcome,
        })
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete, immutable launch table
// ---------------------------------------------------------------------------

/// The full validated dataset with pre-computed payload bounds and site
/// index. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<LaunchRecord>,
    min_payload: f64,
    max_payload: f64,
    /// Distinct sites in order of first occurrence.
    sites: Vec<String>,
}

impl Dataset {
    /// Build a dataset from already-parsed records.
    ///
    /// Fails when `records` is empty or a record violates the payload/site
    /// invariants (records built by hand bypass [`LaunchRecord::from_raw`]).
    pub fn new(records: Vec<LaunchRecord>) -> Result<Self, DataLoadError> {
        if records.is_empty() {
            return Err(DataLoadError::Empty);
        }

        let mut min_payload = f64::INFINITY;
        let mut max_payload = f64::NEG_INFINITY;
        let mut seen: HashSet<&str> = HashSet::new();
        let mut sites = Vec::new();

        for (row, rec) in records.iter().enumerate() {
            if !rec.payload_mass_kg.is_finite() || rec.payload_mass_kg < 0.0 {
                return Err(DataLoadError::InvalidPayload {
                    row,
                    value: rec.payload_mass_kg,
                });
            }
            if rec.site.trim().is_empty() {
                return Err(DataLoadError::EmptySite { row });
            }
            min_payload = min_payload.min(rec.payload_mass_kg);
            max_payload = max_payload.max(rec.payload_mass_kg);
            if seen.insert(rec.site.as_str()) {
                sites.push(rec.site.clone());
            }
        }

        Ok(Dataset {
            records,
            min_payload,
            max_payload,
            sites,
        })
    }

    /// Validate a batch of raw rows and build the dataset.
    pub fn from_raw(rows: impl IntoIterator<Item = RawRecord>) -> Result<Self, DataLoadError> {
        let records = rows
            .into_iter()
            .enumerate()
            .map(|(row, raw)| LaunchRecord::from_raw(row, raw))
            .collect::<Result<Vec<_>, _>>()?;
        Dataset::new(records)
    }

    /// All records in source order.
    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn min_payload(&self) -> f64 {
        self.min_payload
    }

    pub fn max_payload(&self) -> f64 {
        self.max_payload
    }

    /// Distinct sites in order of first occurrence.
    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    /// Distinct sites, sorted, for populating the site selector.
    pub fn all_sites(&self) -> BTreeSet<&str> {
        self.sites.iter().map(String::as_str).collect()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false` for a constructed dataset; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
