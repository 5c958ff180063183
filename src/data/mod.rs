/// Data layer: core types, loading, and load-time validation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<LaunchRecord>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  validated records, cached payload bounds, site index
///   └──────────┘
///        │
///        ▼
///   engine::{outcome, correlation}
/// ```

pub mod error;
pub mod loader;
pub mod model;

pub use error::DataLoadError;
pub use model::{Dataset, LaunchRecord, OutcomeClass};
