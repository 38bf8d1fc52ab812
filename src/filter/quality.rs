//! Threshold filtering on orbital period and signal strength.

use super::status::StatusFlag;
use crate::data::Catalog;
use crate::error::{KeplerError, Result};
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound applied by a threshold.
///
/// `Unbounded` admits every value, including negative periods and NaN.
/// `AtLeast(0.0)` is the default and drops negative and missing values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// Keep values `>= x`.
    AtLeast(f64),
    /// No lower bound at all.
    Unbounded,
}

impl Default for Bound {
    fn default() -> Self {
        Bound::AtLeast(0.0)
    }
}

impl Bound {
    /// Check whether a value passes the bound.
    pub fn admits(&self, value: f64) -> bool {
        match self {
            Bound::AtLeast(min) => value >= *min,
            Bound::Unbounded => true,
        }
    }

    /// The threshold value, if bounded.
    pub fn value(&self) -> Option<f64> {
        match self {
            Bound::AtLeast(min) => Some(*min),
            Bound::Unbounded => None,
        }
    }

    fn validate(&self, name: &str) -> Result<()> {
        match self {
            Bound::AtLeast(min) if !min.is_finite() => Err(KeplerError::InvalidConfig(format!(
                "{} must be a finite number, got {}",
                name, min
            ))),
            _ => Ok(()),
        }
    }
}

impl From<f64> for Bound {
    fn from(value: f64) -> Self {
        Bound::AtLeast(value)
    }
}

impl From<Option<f64>> for Bound {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Bound::Unbounded, Bound::AtLeast)
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::AtLeast(min) => write!(f, ">= {}", min),
            Bound::Unbounded => f.write_str("unbounded"),
        }
    }
}

impl Serialize for Bound {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Bound::AtLeast(min) => serializer.serialize_f64(*min),
            // TOML has no null, so the keyword form is used everywhere.
            Bound::Unbounded => serializer.serialize_str("none"),
        }
    }
}

impl<'de> Deserialize<'de> for Bound {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Keyword(String),
        }

        match Option::<Repr>::deserialize(deserializer)? {
            None => Ok(Bound::Unbounded),
            Some(Repr::Number(v)) => Ok(Bound::AtLeast(v)),
            Some(Repr::Keyword(k)) => match k.to_ascii_lowercase().as_str() {
                "none" | "unbounded" | "null" => Ok(Bound::Unbounded),
                other => Err(de::Error::custom(format!(
                    "expected a number or \"none\", got \"{}\"",
                    other
                ))),
            },
        }
    }
}

/// Quality thresholds, the `data_filtering` section of the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityThresholds {
    /// Minimum orbital period in days.
    pub min_ttvperiod: Bound,
    /// Minimum signal-to-noise ratio.
    pub min_snr: Bound,
}

impl QualityThresholds {
    /// Thresholds that admit every candidate.
    pub fn unbounded() -> Self {
        Self {
            min_ttvperiod: Bound::Unbounded,
            min_snr: Bound::Unbounded,
        }
    }

    /// Create thresholds from plain minimum values.
    pub fn new(min_ttvperiod: f64, min_snr: f64) -> Self {
        Self {
            min_ttvperiod: Bound::AtLeast(min_ttvperiod),
            min_snr: Bound::AtLeast(min_snr),
        }
    }

    /// Reject non-finite thresholds.
    pub fn validate(&self) -> Result<()> {
        self.min_ttvperiod.validate("data_filtering.min_ttvperiod")?;
        self.min_snr.validate("data_filtering.min_snr")
    }
}

/// Keep candidates passing the status selector and both thresholds.
///
/// The three predicates are ANDed. The output keeps input order.
pub fn filter_quality(
    catalog: &Catalog,
    thresholds: &QualityThresholds,
    status_flag: Option<StatusFlag>,
) -> Result<Catalog> {
    let matcher = status_flag.map(|flag| flag.matcher()).transpose()?;

    Ok(catalog.filter(|c| {
        matcher
            .as_ref()
            .map_or(true, |m| m.is_match(c.statusflag.as_deref()))
            && thresholds.min_ttvperiod.admits(c.ttvperiod)
            && thresholds.min_snr.admits(c.snr)
    }))
}

/// Result of quality filtering with statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterStats {
    /// Number of candidates before filtering.
    pub n_before: usize,
    /// Number of candidates after filtering.
    pub n_after: usize,
    /// Number of candidates removed.
    pub n_removed: usize,
}

impl fmt::Display for FilterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Filter Result")?;
        writeln!(f, "  Before:    {} candidates", self.n_before)?;
        writeln!(f, "  After:     {} candidates", self.n_after)?;
        writeln!(f, "  Removed:   {} candidates", self.n_removed)?;
        Ok(())
    }
}

/// Filter with statistics about what was removed.
pub fn filter_quality_with_stats(
    catalog: &Catalog,
    thresholds: &QualityThresholds,
    status_flag: Option<StatusFlag>,
) -> Result<(Catalog, FilterStats)> {
    let n_before = catalog.len();
    let filtered = filter_quality(catalog, thresholds, status_flag)?;
    let n_after = filtered.len();

    let stats = FilterStats {
        n_before,
        n_after,
        n_removed: n_before - n_after,
    };

    Ok((filtered, stats))
}
