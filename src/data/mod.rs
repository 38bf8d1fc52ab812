//! Data structures for planet-candidate catalogs.

mod candidate;
mod catalog;
mod classified;
pub mod loader;
mod raw;

pub use candidate::{Candidate, FieldValue, Position, SystemId};
pub use catalog::{Catalog, SystemIndex};
pub use classified::{ClassificationSummary, ClassifiedCatalog, Comparison};
pub use loader::{
    export_classified, latest_csv, load_catalog, write_catalog_csv, CatalogStore,
};
pub use raw::RawTable;
