//! Kepler Planetary Architectures Library
//!
//! This library classifies a catalog of transiting planet candidates into
//! single-planet and multi-planet systems, ready for population analysis.
//!
//! # Overview
//!
//! The library is organized into composable modules:
//!
//! - **data**: Core data structures (Candidate, Catalog, ClassifiedCatalog) and loading
//! - **normalize**: Schema normalization of raw tables
//! - **partition**: Splitting a catalog by system membership
//! - **filter**: Quality filtering (period, S/N, status flag)
//! - **label**: Multiplicity and orbital position labeling
//! - **demote**: Re-classifying multis left alone by filtering
//! - **pipeline**: Pipeline composition and execution
//!
//! # Example
//!
//! ```no_run
//! use kepler_architectures::prelude::*;
//!
//! // Load data
//! let catalog = load_catalog("data/raw/kepler_ttv.csv").unwrap();
//!
//! // Run classification pipeline
//! let classified = Pipeline::new()
//!     .pre_split_filtering(true)
//!     .min_ttvperiod(0.0)
//!     .min_snr(12.0)
//!     .status_flag(StatusFlag::PeriodRelated)
//!     .run(&catalog)
//!     .unwrap();
//!
//! println!("{}", classified);
//! ```

pub mod data;
pub mod demote;
pub mod error;
pub mod filter;
pub mod label;
pub mod normalize;
pub mod partition;
pub mod pipeline;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::data::{
        export_classified, latest_csv, load_catalog, write_catalog_csv, Candidate, Catalog,
        CatalogStore, ClassificationSummary, ClassifiedCatalog, Comparison, FieldValue,
        Position, RawTable, SystemId, SystemIndex,
    };
    pub use crate::demote::demote_multis_to_singles;
    pub use crate::error::{KeplerError, Result};
    pub use crate::filter::{
        filter_quality, filter_quality_with_stats, Bound, FilterStats, QualityThresholds,
        StatusFlag, StatusMatcher,
    };
    pub use crate::label::{assign_multiplicity, label_positions};
    pub use crate::normalize::{
        clean_column_name, normalize_catalog, normalize_with_schema, ColumnType, Schema,
    };
    pub use crate::partition::split_systems;
    pub use crate::pipeline::{
        process_catalog, Checkpoint, DataProcessing, FilterOrder, FilterScope, LogObserver,
        NoopObserver, Pipeline, PipelineConfig, PipelineObserver,
    };
}
