//! Pipeline orchestration for candidate classification.

mod config;
mod observer;
mod runner;

pub use config::{DataProcessing, FilterOrder, PipelineConfig};
pub use observer::{Checkpoint, FilterScope, LogObserver, NoopObserver, PipelineObserver};
pub use runner::{process_catalog, Pipeline};
