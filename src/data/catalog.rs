//! Ordered candidate collections grouped by host system.

use super::candidate::{Candidate, Position, SystemId};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Index from system identifier to the row positions of its members.
///
/// Row positions within each group keep catalog order, so the first entry
/// of a group is the "first row" of that system.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemIndex {
    groups: BTreeMap<SystemId, Vec<usize>>,
}

impl SystemIndex {
    /// Build the index for a slice of candidates.
    pub fn build(candidates: &[Candidate]) -> Self {
        let mut groups: BTreeMap<SystemId, Vec<usize>> = BTreeMap::new();
        for (i, c) in candidates.iter().enumerate() {
            groups.entry(c.system).or_default().push(i);
        }
        Self { groups }
    }

    /// Number of distinct systems.
    pub fn n_systems(&self) -> usize {
        self.groups.len()
    }

    /// Number of rows belonging to `system` (zero when absent).
    pub fn group_size(&self, system: SystemId) -> usize {
        self.groups.get(&system).map_or(0, Vec::len)
    }

    /// Row positions of `system`, in catalog order.
    pub fn rows(&self, system: SystemId) -> &[usize] {
        self.groups.get(&system).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate systems in ascending id order with their row positions.
    pub fn iter(&self) -> impl Iterator<Item = (SystemId, &[usize])> {
        self.groups.iter().map(|(s, rows)| (*s, rows.as_slice()))
    }
}

/// An ordered, densely indexed collection of candidates.
///
/// Row `i` of a catalog is simply `candidates()[i]`; every operation that
/// drops rows returns a new catalog, so indices are always zero-based and
/// contiguous.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    candidates: Vec<Candidate>,
}

impl Catalog {
    /// Wrap candidates in their current order.
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }

    /// An empty catalog.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Candidates in row order.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Consume the catalog, returning its rows.
    pub fn into_candidates(self) -> Vec<Candidate> {
        self.candidates
    }

    /// Iterate over candidates in row order.
    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }

    /// Group rows by system.
    pub fn system_index(&self) -> SystemIndex {
        SystemIndex::build(&self.candidates)
    }

    /// Number of distinct systems.
    pub fn n_systems(&self) -> usize {
        self.system_index().n_systems()
    }

    /// Subset to the given row positions, in the order given.
    pub fn select(&self, rows: &[usize]) -> Self {
        Self::new(rows.iter().map(|&i| self.candidates[i].clone()).collect())
    }

    /// Keep the rows matching `predicate`, preserving order.
    pub fn filter<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&Candidate) -> bool,
    {
        Self::new(
            self.candidates
                .iter()
                .filter(|c| predicate(c))
                .cloned()
                .collect(),
        )
    }

    /// Rows carrying the given position label.
    pub fn with_position(&self, position: Position) -> Self {
        self.filter(|c| c.position == Some(position))
    }

    /// Append `other` after the rows of `self`.
    pub fn concat(&self, other: &Catalog) -> Self {
        let mut candidates = Vec::with_capacity(self.len() + other.len());
        candidates.extend_from_slice(&self.candidates);
        candidates.extend_from_slice(&other.candidates);
        Self::new(candidates)
    }

    /// Stable sort by `(system, ttvperiod)` ascending, NaN periods last.
    pub fn sort_by_system_period(&mut self) {
        self.candidates.sort_by(|a, b| {
            a.system
                .cmp(&b.system)
                .then_with(|| cmp_nan_last(a.ttvperiod, b.ttvperiod))
        });
    }

    /// Stable sort by `system` only.
    pub fn sort_by_system(&mut self) {
        self.candidates.sort_by_key(|c| c.system);
    }

    /// Values of a numeric column in row order; rows without it yield NaN.
    pub fn float_column(&self, name: &str) -> Vec<f64> {
        self.candidates
            .iter()
            .map(|c| c.float(name).unwrap_or(f64::NAN))
            .collect()
    }

    /// Minimum of a numeric column per system, ignoring NaN.
    ///
    /// Systems where every value is missing are omitted.
    pub fn system_min(&self, name: &str) -> BTreeMap<SystemId, f64> {
        let mut out: BTreeMap<SystemId, f64> = BTreeMap::new();
        for c in &self.candidates {
            let Some(v) = c.float(name).filter(|v| !v.is_nan()) else {
                continue;
            };
            out.entry(c.system)
                .and_modify(|m| {
                    if v < *m {
                        *m = v;
                    }
                })
                .or_insert(v);
        }
        out
    }

    /// Value of a numeric column on the first row of each system.
    pub fn system_first(&self, name: &str) -> BTreeMap<SystemId, f64> {
        self.system_index()
            .iter()
            .map(|(system, rows)| {
                let v = self.candidates[rows[0]].float(name).unwrap_or(f64::NAN);
                (system, v)
            })
            .collect()
    }
}

impl FromIterator<Candidate> for Catalog {
    fn from_iter<I: IntoIterator<Item = Candidate>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}

/// Total order on floats placing NaN after every number.
pub(crate) fn cmp_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        (true, true) => Ordering::Equal,
    }
}
