//! Declared column types for the Kepler TTV catalog.

use crate::data::FieldValue;
use std::collections::BTreeMap;

/// Semantic type a column is coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Categorical string.
    Category,
    /// Free-form string.
    Text,
    /// 64-bit float.
    Float64,
    /// 64-bit integer.
    Int64,
    /// 8-bit integer.
    Int8,
    /// Boolean.
    Bool,
}

impl ColumnType {
    /// Human-readable name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Text => "string",
            Self::Float64 => "float64",
            Self::Int64 => "int64",
            Self::Int8 => "int8",
            Self::Bool => "bool",
        }
    }
}

/// Column name holding the KOI designation.
pub const KOI: &str = "koi";
/// Column name of the orbital period.
pub const TTVPERIOD: &str = "ttvperiod";
/// Column name of the signal-to-noise ratio.
pub const SNR: &str = "snr";
/// Column name of the status code.
pub const STATUSFLAG: &str = "statusflag";

/// Columns the normalizer derives itself; input copies are discarded.
pub const DERIVED_COLUMNS: [&str; 3] = ["system", "multiplicity", "position"];

const KEPLER_COLUMNS: &[(&str, ColumnType)] = &[
    ("kic", ColumnType::Category),
    ("koi", ColumnType::Text),
    ("kepler_id", ColumnType::Category),
    ("ttvperiod", ColumnType::Float64),
    ("ttvperiod_e", ColumnType::Float64),
    ("epoch", ColumnType::Float64),
    ("epoch_e", ColumnType::Float64),
    ("rprs", ColumnType::Float64),
    ("rprs_p", ColumnType::Float64),
    ("rprs_m", ColumnType::Float64),
    ("b", ColumnType::Float64),
    ("b_ep", ColumnType::Float64),
    ("b_em", ColumnType::Float64),
    ("rhostar_model", ColumnType::Float64),
    ("rhostar_model_ep", ColumnType::Float64),
    ("rhostar_model_em", ColumnType::Float64),
    ("u1", ColumnType::Float64),
    ("u2", ColumnType::Float64),
    ("nttobs", ColumnType::Int64),
    ("ntt", ColumnType::Int64),
    ("ttvflag", ColumnType::Category),
    ("tdepth", ColumnType::Float64),
    ("tdepth_e", ColumnType::Float64),
    ("tdur", ColumnType::Float64),
    ("tdur_e", ColumnType::Float64),
    ("tduravg", ColumnType::Float64),
    ("tduravg_e", ColumnType::Float64),
    ("radius", ColumnType::Float64),
    ("radius_ep", ColumnType::Float64),
    ("radius_em", ColumnType::Float64),
    ("snr", ColumnType::Float64),
    ("snrwottv_snrwttv", ColumnType::Float64),
    ("mes", ColumnType::Float64),
    ("chisqwttv", ColumnType::Float64),
    ("chisqwottv", ColumnType::Float64),
    ("dchisq_inj", ColumnType::Float64),
    ("adrs", ColumnType::Float64),
    ("adrs_ep", ColumnType::Float64),
    ("adrs_em", ColumnType::Float64),
    ("incl", ColumnType::Float64),
    ("incl_ep", ColumnType::Float64),
    ("incl_em", ColumnType::Float64),
    ("s0", ColumnType::Float64),
    ("s0_ep", ColumnType::Float64),
    ("s0_em", ColumnType::Float64),
    ("kepmag", ColumnType::Float64),
    ("stellar_source", ColumnType::Int8),
    ("rhostar", ColumnType::Float64),
    ("rhostar_ep", ColumnType::Float64),
    ("rhostar_em", ColumnType::Float64),
    ("teff", ColumnType::Float64),
    ("teff_e", ColumnType::Float64),
    ("rstar", ColumnType::Float64),
    ("rstar_ep", ColumnType::Float64),
    ("rstar_em", ColumnType::Float64),
    ("mstar", ColumnType::Float64),
    ("mstar_ep", ColumnType::Float64),
    ("mstar_em", ColumnType::Float64),
    ("logg", ColumnType::Float64),
    ("logg_ep", ColumnType::Float64),
    ("logg_em", ColumnType::Float64),
    ("m_h", ColumnType::Float64),
    ("m_h_e", ColumnType::Float64),
    ("statusflag", ColumnType::Category),
    ("rhostar_model_lc", ColumnType::Float64),
    ("epoch_lc", ColumnType::Float64),
    ("per_lc", ColumnType::Float64),
    ("b_lc", ColumnType::Float64),
    ("rprs_lc", ColumnType::Float64),
    ("lcflag", ColumnType::Bool),
    ("ttvper_cor", ColumnType::Float64),
    ("ttvper_cor_err", ColumnType::Float64),
];

/// Declared column types, required columns and missing-value defaults.
#[derive(Debug, Clone)]
pub struct Schema {
    columns: BTreeMap<String, ColumnType>,
    required: Vec<String>,
    defaults: BTreeMap<String, FieldValue>,
}

impl Default for Schema {
    fn default() -> Self {
        Self::kepler()
    }
}

impl Schema {
    /// Schema of the Kepler TTV catalog.
    pub fn kepler() -> Self {
        let columns = KEPLER_COLUMNS
            .iter()
            .map(|(name, ty)| (name.to_string(), *ty))
            .collect();
        let required = [KOI, TTVPERIOD, SNR, STATUSFLAG]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let defaults = [
            ("kepler_id", FieldValue::Categorical(String::new())),
            ("chisqwttv", FieldValue::Float(0.0)),
            ("kepmag", FieldValue::Float(0.0)),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect();

        Self {
            columns,
            required,
            defaults,
        }
    }

    /// Declare or override the type of a column.
    pub fn with_column(mut self, name: &str, ty: ColumnType) -> Self {
        self.columns.insert(name.to_string(), ty);
        self
    }

    /// Declared type of a column, if any.
    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.columns.get(name).copied()
    }

    /// Columns that must be present after name cleaning.
    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Fill value for a missing cell, if the column has one.
    pub fn default_for(&self, name: &str) -> Option<&FieldValue> {
        self.defaults.get(name)
    }
}
