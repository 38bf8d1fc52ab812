//! Moving filtered-down multi-planet systems to the singles.

use crate::data::{Catalog, Position};
use crate::partition::split_systems;

/// Demote multi-planet rows whose system was filtered down to one member.
///
/// Re-partitions `multis`; rows that are now alone in their system are
/// labeled [`Position::Demoted`], appended to `singles` and the combined set
/// is stably re-sorted by system. Returns `(singles, multis)`.
///
/// Running it again on its own output demotes nothing.
pub fn demote_multis_to_singles(singles: &Catalog, multis: &Catalog) -> (Catalog, Catalog) {
    let (new_singles, multis) = split_systems(multis);

    let demoted: Catalog = new_singles
        .into_candidates()
        .into_iter()
        .map(|mut c| {
            c.position = Some(Position::Demoted);
            c
        })
        .collect();

    let mut singles = singles.concat(&demoted);
    singles.sort_by_system();

    (singles, multis)
}
