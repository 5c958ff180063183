use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable pointing at a config file.
pub const CONFIG_ENV: &str = "LAUNCH_DASH_CONFIG";

/// Config file looked up in the working directory when [`CONFIG_ENV`] is unset.
pub const DEFAULT_CONFIG_FILE: &str = "launch-dash.json";

// ---------------------------------------------------------------------------
// Slider bounds
// ---------------------------------------------------------------------------

/// Bounds of the payload range control, independent of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10_000.0,
            step: 1_000.0,
        }
    }
}

impl SliderConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.min.is_finite() && self.max.is_finite() && self.step.is_finite()) {
            bail!("slider bounds must be finite: {self:?}");
        }
        if self.min >= self.max {
            bail!("slider min ({}) must be below max ({})", self.min, self.max);
        }
        if self.step <= 0.0 {
            bail!("slider step must be positive, got {}", self.step);
        }
        Ok(())
    }

    /// Clamp a value into `[min, max]`.
    pub fn clamp(&self, v: f64) -> f64 {
        v.clamp(self.min, self.max)
    }

    /// Tick positions every `step` from `min` to `max` inclusive.
    pub fn marks(&self) -> Vec<f64> {
        let n = ((self.max - self.min) / self.step).floor() as usize;
        (0..=n).map(|i| self.min + i as f64 * self.step).collect()
    }
}

// ---------------------------------------------------------------------------
// Dashboard config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Dataset opened at startup when none is given on the command line.
    pub data_path: Option<PathBuf>,
    pub slider: SliderConfig,
    /// Initial window size in points.
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            slider: SliderConfig::default(),
            window_size: [1200.0, 800.0],
        }
    }
}

impl DashboardConfig {
    /// Parse and validate a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: DashboardConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config
            .slider
            .validate()
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Locate and load the config: `$LAUNCH_DASH_CONFIG`, then
    /// `./launch-dash.json`, then defaults.
    ///
    /// A file named by the environment variable must exist; the default
    /// file is optional.
    pub fn load() -> Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            let path = PathBuf::from(path);
            log::info!("Using config from ${CONFIG_ENV}: {}", path.display());
            return Self::from_file(&path);
        }
        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            log::info!("Using config {}", default_path.display());
            return Self::from_file(default_path);
        }
        log::warn!("No config file found, using defaults");
        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_source_slider() {
        let c = DashboardConfig::default();
        assert_eq!(c.slider.min, 0.0);
        assert_eq!(c.slider.max, 10_000.0);
        assert_eq!(c.slider.step, 1_000.0);
        assert_eq!(c.slider.marks().len(), 11);
        assert!(c.data_path.is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{ "slider": {{ "max": 12000 }}, "data_path": "launches.csv" }}"#).unwrap();
        let c = DashboardConfig::from_file(f.path()).unwrap();
        assert_eq!(c.slider.max, 12_000.0);
        assert_eq!(c.slider.step, 1_000.0);
        assert_eq!(c.data_path, Some(PathBuf::from("launches.csv")));
        assert_eq!(c.window_size, [1200.0, 800.0]);
    }

    #[test]
    fn test_invalid_slider_rejected() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{ "slider": {{ "min": 5000, "max": 1000 }} }}"#).unwrap();
        assert!(DashboardConfig::from_file(f.path()).is_err());

        let zero_step = SliderConfig {
            step: 0.0,
            ..SliderConfig::default()
        };
        assert!(zero_step.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(DashboardConfig::from_file(Path::new("/nonexistent/launch-dash.json")).is_err());
    }
}
