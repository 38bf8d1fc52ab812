//! Pipeline configuration.
//!
//! Mirrors the `config.toml` layout used by the analysis:
//!
//! ```toml
//! [data_processing]
//! pre_split_filtering = false
//! demote_multis_to_singles = true
//!
//! [data_filtering]
//! min_ttvperiod = 0
//! min_snr = 12
//! ```
//!
//! Unknown keys and sections are ignored; missing keys take their defaults.

use crate::error::{KeplerError, Result};
use crate::filter::QualityThresholds;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Order in which filtering and the single/multi split are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOrder {
    /// Filter the whole catalog, count multiplicity, then split.
    FilterThenSplit,
    /// Count multiplicity, split, then filter each half.
    SplitThenFilter,
}

/// The `data_processing` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataProcessing {
    /// Filter before splitting into singles and multis.
    pub pre_split_filtering: bool,
    /// Move filtered-down multi systems to the singles.
    pub demote_multis_to_singles: bool,
}

impl Default for DataProcessing {
    fn default() -> Self {
        Self {
            pre_split_filtering: false,
            demote_multis_to_singles: true,
        }
    }
}

/// Complete pipeline configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Ordering and demotion switches.
    pub data_processing: DataProcessing,
    /// Quality thresholds.
    pub data_filtering: QualityThresholds,
}

impl PipelineConfig {
    /// Load from a TOML string.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a YAML string.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON string.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file, dispatching on its extension.
    ///
    /// Supported: `.toml`, `.yaml` / `.yml`, `.json`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "toml" => Self::from_toml(&text),
            "yaml" | "yml" => Self::from_yaml(&text),
            "json" => Self::from_json(&text),
            other => Err(KeplerError::InvalidConfig(format!(
                "unsupported configuration extension '.{}'",
                other
            ))),
        }
    }

    /// Save to a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).map_err(KeplerError::from)
    }

    /// Save to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(KeplerError::from)
    }

    /// Check option values before any row is processed.
    pub fn validate(&self) -> Result<()> {
        self.data_filtering.validate()
    }

    /// The ordering selected by `pre_split_filtering`.
    pub fn filter_order(&self) -> FilterOrder {
        if self.data_processing.pre_split_filtering {
            FilterOrder::FilterThenSplit
        } else {
            FilterOrder::SplitThenFilter
        }
    }
}
