//! Progress notifications emitted while a pipeline runs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which collection a filter pass ran over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterScope {
    /// The whole catalog, before splitting.
    Catalog,
    /// The single-planet half.
    Singles,
    /// The multi-planet half.
    Multis,
}

impl fmt::Display for FilterScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterScope::Catalog => "catalog",
            FilterScope::Singles => "singles",
            FilterScope::Multis => "multis",
        };
        f.write_str(name)
    }
}

/// A point in the pipeline where observers are notified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Checkpoint {
    /// A quality filter pass finished.
    Filtered {
        scope: FilterScope,
        before: usize,
        after: usize,
    },
    /// The catalog was split into singles and multis.
    Split { singles: usize, multis: usize },
    /// Demotion finished.
    Demoted {
        demoted: usize,
        singles: usize,
        multis: usize,
    },
}

impl fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Checkpoint::Filtered {
                scope,
                before,
                after,
            } => write!(
                f,
                "Filtered {}: {} -> {} candidates ({} removed)",
                scope,
                before,
                after,
                before - after
            ),
            Checkpoint::Split { singles, multis } => {
                write!(f, "Split: {} singles, {} multis", singles, multis)
            }
            Checkpoint::Demoted {
                demoted,
                singles,
                multis,
            } => write!(
                f,
                "Demoted {} candidates: {} singles, {} multis",
                demoted, singles, multis
            ),
        }
    }
}

/// Receives checkpoints from a running pipeline.
pub trait PipelineObserver: Send + Sync {
    /// Called once per checkpoint, in pipeline order.
    fn notify(&self, checkpoint: &Checkpoint);
}

/// Forwards checkpoints to the `log` facade at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl PipelineObserver for LogObserver {
    fn notify(&self, checkpoint: &Checkpoint) {
        log::info!("{}", checkpoint);
    }
}

/// Ignores every checkpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {
    fn notify(&self, _checkpoint: &Checkpoint) {}
}
