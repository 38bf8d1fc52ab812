//! Classified catalogs: singles and multis plus the settings that made them.

use super::candidate::Position;
use super::catalog::Catalog;
use crate::filter::StatusFlag;
use crate::pipeline::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison used to select multi-planet systems by multiplicity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Comparison {
    /// Evaluate `lhs <op> rhs`.
    pub fn holds(&self, lhs: u32, rhs: u32) -> bool {
        match self {
            Self::Eq => lhs == rhs,
            Self::Ne => lhs != rhs,
            Self::Lt => lhs < rhs,
            Self::Le => lhs <= rhs,
            Self::Gt => lhs > rhs,
            Self::Ge => lhs >= rhs,
        }
    }
}

/// Output of a pipeline run.
///
/// `singles` and `multis` are disjoint and together hold every candidate
/// that survived filtering exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedCatalog {
    /// Candidates alone in their system (labeled single or demoted).
    pub singles: Catalog,
    /// Candidates sharing their system with at least one other.
    pub multis: Catalog,
    /// Configuration used to produce the split.
    pub config: Option<PipelineConfig>,
    /// Status selector applied during filtering.
    pub status_flag: Option<StatusFlag>,
}

impl ClassifiedCatalog {
    /// Bundle classified halves with their provenance.
    pub fn new(
        singles: Catalog,
        multis: Catalog,
        config: Option<PipelineConfig>,
        status_flag: Option<StatusFlag>,
    ) -> Self {
        Self {
            singles,
            multis,
            config,
            status_flag,
        }
    }

    /// Total number of classified candidates.
    pub fn len(&self) -> usize {
        self.singles.len() + self.multis.len()
    }

    /// Check if no candidate survived.
    pub fn is_empty(&self) -> bool {
        self.singles.is_empty() && self.multis.is_empty()
    }

    /// Singles and multis together, sorted by `(system, ttvperiod)`.
    pub fn all_candidates(&self) -> Catalog {
        let mut all = self.singles.concat(&self.multis);
        all.sort_by_system_period();
        all
    }

    /// Multis whose recorded multiplicity satisfies `<op> num_planets`.
    pub fn multis_with(&self, num_planets: u32, op: Comparison) -> Catalog {
        self.multis.filter(|c| {
            c.multiplicity
                .is_some_and(|m| op.holds(m, num_planets))
        })
    }

    /// Multis from two-planet systems.
    pub fn m2(&self) -> Catalog {
        self.multis_with(2, Comparison::Eq)
    }

    /// Multis from three-planet systems.
    pub fn m3(&self) -> Catalog {
        self.multis_with(3, Comparison::Eq)
    }

    /// Multis from systems with three or more planets.
    pub fn m3_plus(&self) -> Catalog {
        self.multis_with(3, Comparison::Ge)
    }

    /// Innermost planets of multi systems.
    pub fn innermost_multi(&self) -> Catalog {
        self.multis.with_position(Position::Innermost)
    }

    /// Middle planets of multi systems.
    pub fn middle_multi(&self) -> Catalog {
        self.multis.with_position(Position::Middle)
    }

    /// Outermost planets of multi systems.
    pub fn outermost_multi(&self) -> Catalog {
        self.multis.with_position(Position::Outermost)
    }

    /// Singles that were demoted from multi systems.
    pub fn demoted(&self) -> Catalog {
        self.singles.with_position(Position::Demoted)
    }

    /// Counts describing this classification.
    pub fn summary(&self) -> ClassificationSummary {
        ClassificationSummary {
            singles: self.singles.len(),
            multis: self.multis.len(),
            multi_systems: self.multis.n_systems(),
            m2: self.m2().len(),
            m3_plus: self.m3_plus().len(),
            demoted: self.demoted().len(),
            status_flag: self.status_flag,
            config: self.config,
        }
    }
}

impl fmt::Display for ClassifiedCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

/// Counts of a classified catalog, suitable for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationSummary {
    /// Number of single candidates, demoted included.
    pub singles: usize,
    /// Number of multi candidates.
    pub multis: usize,
    /// Number of distinct multi systems.
    pub multi_systems: usize,
    /// Candidates in two-planet systems.
    pub m2: usize,
    /// Candidates in systems with three or more planets.
    pub m3_plus: usize,
    /// Singles demoted from multi systems.
    pub demoted: usize,
    /// Status selector applied.
    pub status_flag: Option<StatusFlag>,
    /// Configuration applied.
    pub config: Option<PipelineConfig>,
}

impl fmt::Display for ClassificationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "ClassifiedCatalog(singles:{}, multis:{})",
            self.singles, self.multis
        )?;
        match self.status_flag {
            Some(flag) => writeln!(f, "   Status Flag: {}", flag)?,
            None => writeln!(f, "   Status Flag: none")?,
        }
        writeln!(f, "   M2: {}", self.m2)?;
        writeln!(f, "   M3+: {}", self.m3_plus)?;
        writeln!(f, "   Demoted: {}", self.demoted)?;
        Ok(())
    }
}
