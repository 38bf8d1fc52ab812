//! Splitting candidates into single- and multi-planet systems.

use crate::data::Catalog;

/// Split a catalog by system cardinality.
///
/// Returns `(singles, multis)`: `multis` holds every row whose system
/// appears more than once, `singles` holds the rest. Both keep the relative
/// row order of the input.
pub fn split_systems(catalog: &Catalog) -> (Catalog, Catalog) {
    let index = catalog.system_index();
    let (multis, singles): (Vec<_>, Vec<_>) = catalog
        .iter()
        .cloned()
        .partition(|c| index.group_size(c.system) > 1);

    (Catalog::new(singles), Catalog::new(multis))
}
