//! Pipeline runner sequencing filter, split, label and demotion.

use super::config::{FilterOrder, PipelineConfig};
use super::observer::{Checkpoint, FilterScope, LogObserver, PipelineObserver};
use crate::data::{Catalog, ClassifiedCatalog};
use crate::demote::demote_multis_to_singles;
use crate::error::Result;
use crate::filter::{filter_quality, Bound, StatusFlag};
use crate::label::{assign_multiplicity, label_positions};
use crate::partition::split_systems;
use std::fmt;
use std::sync::Arc;

/// Builder for configuring and running the classification pipeline.
///
/// A pipeline holds no data; [`Pipeline::run`] borrows the catalog and
/// returns a fresh [`ClassifiedCatalog`], so one pipeline (or several with
/// different settings) can be run over the same catalog from many threads.
#[derive(Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    status_flag: Option<StatusFlag>,
    observer: Arc<dyn PipelineObserver>,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("status_flag", &self.status_flag)
            .finish_non_exhaustive()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    /// Create a pipeline with the default configuration and no status flag.
    pub fn new() -> Self {
        Self::from_config(&PipelineConfig::default())
    }

    /// Create from a config.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            config: *config,
            status_flag: None,
            observer: Arc::new(LogObserver),
        }
    }

    /// Filter before (`true`) or after (`false`) splitting.
    pub fn pre_split_filtering(mut self, enabled: bool) -> Self {
        self.config.data_processing.pre_split_filtering = enabled;
        self
    }

    /// Enable or disable demotion of filtered-down multi systems.
    pub fn demote_multis_to_singles(mut self, enabled: bool) -> Self {
        self.config.data_processing.demote_multis_to_singles = enabled;
        self
    }

    /// Set the minimum orbital period.
    pub fn min_ttvperiod(mut self, bound: impl Into<Bound>) -> Self {
        self.config.data_filtering.min_ttvperiod = bound.into();
        self
    }

    /// Set the minimum signal-to-noise ratio.
    pub fn min_snr(mut self, bound: impl Into<Bound>) -> Self {
        self.config.data_filtering.min_snr = bound.into();
        self
    }

    /// Restrict to status codes matching a selector, or lift the restriction.
    pub fn status_flag(mut self, status_flag: impl Into<Option<StatusFlag>>) -> Self {
        self.status_flag = status_flag.into();
        self
    }

    /// Replace the observer notified at each checkpoint.
    pub fn observer(mut self, observer: impl PipelineObserver + 'static) -> Self {
        self.observer = Arc::new(observer);
        self
    }

    /// Share an existing observer.
    pub fn shared_observer(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// The effective configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the pipeline over a normalized catalog.
    ///
    /// The configuration is validated before any row is touched. Empty
    /// inputs and fully filtered outputs are not errors.
    pub fn run(&self, catalog: &Catalog) -> Result<ClassifiedCatalog> {
        self.config.validate()?;

        let (singles, multis) = match self.config.filter_order() {
            FilterOrder::FilterThenSplit => {
                let filtered = self.filter(catalog, FilterScope::Catalog)?;
                let counted = assign_multiplicity(&filtered);
                let (singles, multis) = split_systems(&counted);
                self.notify_split(&singles, &multis);
                (singles, multis)
            }
            FilterOrder::SplitThenFilter => {
                let counted = assign_multiplicity(catalog);
                let (singles, multis) = split_systems(&counted);
                self.notify_split(&singles, &multis);
                (
                    self.filter(&singles, FilterScope::Singles)?,
                    self.filter(&multis, FilterScope::Multis)?,
                )
            }
        };

        let mut singles = label_positions(&singles);
        let mut multis = label_positions(&multis);

        if self.config.data_processing.demote_multis_to_singles {
            let n_singles = singles.len();
            (singles, multis) = demote_multis_to_singles(&singles, &multis);
            self.observer.notify(&Checkpoint::Demoted {
                demoted: singles.len() - n_singles,
                singles: singles.len(),
                multis: multis.len(),
            });
        }

        Ok(ClassifiedCatalog::new(
            singles,
            multis,
            Some(self.config),
            self.status_flag,
        ))
    }

    fn filter(&self, catalog: &Catalog, scope: FilterScope) -> Result<Catalog> {
        let filtered = filter_quality(catalog, &self.config.data_filtering, self.status_flag)?;
        self.observer.notify(&Checkpoint::Filtered {
            scope,
            before: catalog.len(),
            after: filtered.len(),
        });
        Ok(filtered)
    }

    fn notify_split(&self, singles: &Catalog, multis: &Catalog) {
        self.observer.notify(&Checkpoint::Split {
            singles: singles.len(),
            multis: multis.len(),
        });
    }
}

/// Classify a catalog with a configuration and optional status selector.
pub fn process_catalog(
    catalog: &Catalog,
    config: &PipelineConfig,
    status_flag: Option<StatusFlag>,
) -> Result<ClassifiedCatalog> {
    Pipeline::from_config(config)
        .status_flag(status_flag)
        .run(catalog)
}
