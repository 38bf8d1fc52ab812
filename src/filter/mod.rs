//! Quality filtering for candidate catalogs.

pub mod quality;
pub mod status;

pub use quality::{
    filter_quality, filter_quality_with_stats, Bound, FilterStats, QualityThresholds,
};
pub use status::{StatusFlag, StatusMatcher};
