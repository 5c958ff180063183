//! Launch records dashboard core.
//!
//! The library half holds everything that is independent of rendering:
//! the immutable [`data::model::Dataset`], its loaders, the selection
//! state and the two pure derivations that turn (dataset, selection) into
//! chart-ready view-models. The `launch-dash` binary hosts them in an
//! eframe window.

pub mod config;
pub mod data;
pub mod engine;
