//! Schema normalization of raw catalog tables.
//!
//! Turns a [`RawTable`](crate::data::RawTable) into a typed, sorted
//! [`Catalog`](crate::data::Catalog):
//!
//! - **Column names**: lowercased, punctuation stripped, separators collapsed
//! - **Types**: each declared column coerced to its [`ColumnType`]
//! - **System**: derived from the integer part of the KOI designation
//! - **Order**: rows sorted by `(system, ttvperiod)`

pub mod clean;
pub mod schema;

pub use clean::{clean_column_name, normalize_catalog, normalize_with_schema};
pub use schema::{ColumnType, Schema};
