/// Derivation engine: selection state and the two pure view derivations.
///
/// ```text
///   raw site + raw range ──normalize──▶ SelectionState
///                                            │
///              Dataset ──────────┬───────────┤
///                                ▼           ▼
///                    derive_outcome_view   derive_correlation_view
///                                │           │
///                                ▼           ▼
///                          OutcomeView   CorrelationView
/// ```
///
/// Both derivations are pure functions of `(&Dataset, &SelectionState)`,
/// so callers may memoize them freely.

pub mod correlation;
pub mod outcome;
pub mod selection;

pub use correlation::{derive_correlation_view, CorrelationPoint, CorrelationView};
pub use outcome::{derive_outcome_view, OutcomeCount, OutcomeView, SiteCount};
pub use selection::{SelectionState, SiteSelection, ALL_SITES};
