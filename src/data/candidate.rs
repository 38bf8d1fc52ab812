//! Planet-candidate records and their typed field values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Identifier grouping every candidate that orbits the same host star.
///
/// Derived from the integer part of the KOI designation (`"752.01"` -> `752`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SystemId(pub i64);

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Structural role of a candidate within its system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// Only candidate of its system.
    Single,
    /// Shortest orbital period in a multi-planet system.
    Innermost,
    /// Neither shortest nor longest period.
    Middle,
    /// Longest orbital period in a multi-planet system.
    Outermost,
    /// Formerly part of a multi-planet system, left alone by filtering.
    Demoted,
}

impl Position {
    /// All labels, in declaration order.
    pub const ALL: [Position; 5] = [
        Position::Single,
        Position::Innermost,
        Position::Middle,
        Position::Outermost,
        Position::Demoted,
    ];

    /// Get the label as written in exported tables.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Innermost => "innermost",
            Self::Middle => "middle",
            Self::Outermost => "outermost",
            Self::Demoted => "demoted",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Position::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| format!("unknown position label '{}'", s))
    }
}

/// A single typed cell of the catalog payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// Categorical value (flags, identifiers).
    Categorical(String),
    /// Free-form text.
    Text(String),
    /// 64-bit float; missing values are NaN.
    Float(f64),
    /// 64-bit integer.
    Int(i64),
    /// 8-bit integer.
    SmallInt(i8),
    /// Boolean flag.
    Bool(bool),
    /// Missing categorical or text value.
    Null,
}

impl FieldValue {
    /// Try to interpret the value as an `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(*v),
            FieldValue::Int(v) => Some(*v as f64),
            FieldValue::SmallInt(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Try to interpret the value as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Categorical(s) | FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Check if this is a missing value.
    pub fn is_missing(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Float(v) => v.is_nan(),
            _ => false,
        }
    }
}

impl fmt::Display for FieldValue {
    /// Formats the value the way it is written to CSV; missing values are empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Categorical(s) | FieldValue::Text(s) => f.write_str(s),
            FieldValue::Float(v) if v.is_nan() => Ok(()),
            // Debug keeps the decimal point, so `2.0` reloads as a float.
            FieldValue::Float(v) => write!(f, "{:?}", v),
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::SmallInt(v) => write!(f, "{}", v),
            FieldValue::Bool(true) => f.write_str("True"),
            FieldValue::Bool(false) => f.write_str("False"),
            FieldValue::Null => Ok(()),
        }
    }
}

/// One planet-candidate observation.
///
/// The fields the classification pipeline reasons about are typed members;
/// every other catalog column is carried untouched in `fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// KOI designation, e.g. `"752.01"`.
    pub koi: String,
    /// Host system derived from `koi`.
    pub system: SystemId,
    /// Orbital period in days; the ordering key within a system.
    pub ttvperiod: f64,
    /// Transit signal-to-noise ratio.
    pub snr: f64,
    /// Catalog status code, `None` when missing.
    pub statusflag: Option<String>,
    /// Number of candidates sharing `system`, once computed.
    pub multiplicity: Option<u32>,
    /// Position label, once assigned.
    pub position: Option<Position>,
    /// Remaining columns, keyed by normalized column name.
    pub fields: BTreeMap<String, FieldValue>,
}

impl Candidate {
    /// Create a candidate with an empty payload.
    pub fn new(koi: &str, system: SystemId, ttvperiod: f64, snr: f64, statusflag: Option<&str>) -> Self {
        Self {
            koi: koi.to_string(),
            system,
            ttvperiod,
            snr,
            statusflag: statusflag.map(String::from),
            multiplicity: None,
            position: None,
            fields: BTreeMap::new(),
        }
    }

    /// Attach a payload field.
    pub fn with_field(mut self, name: &str, value: FieldValue) -> Self {
        self.fields.insert(name.to_string(), value);
        self
    }

    /// Look up a payload field.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Numeric value of a column, typed or payload.
    ///
    /// Returns `None` for non-numeric or absent columns.
    pub fn float(&self, name: &str) -> Option<f64> {
        match name {
            "ttvperiod" => Some(self.ttvperiod),
            "snr" => Some(self.snr),
            "system" => Some(self.system.0 as f64),
            "multiplicity" => self.multiplicity.map(f64::from),
            _ => self.fields.get(name).and_then(FieldValue::as_f64),
        }
    }

    /// Planet radius, if the catalog carried one.
    pub fn radius(&self) -> Option<f64> {
        self.float("radius")
    }

    /// Impact parameter, if the catalog carried one.
    pub fn impact_parameter(&self) -> Option<f64> {
        self.float("b")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_round_trip_names() {
        for p in Position::ALL {
            assert_eq!(p.name().parse::<Position>().unwrap(), p);
        }
        assert!("outer".parse::<Position>().is_err());
    }

    #[test]
    fn test_field_value_display_matches_csv_conventions() {
        assert_eq!(FieldValue::Float(f64::NAN).to_string(), "");
        assert_eq!(FieldValue::Float(1.5).to_string(), "1.5");
        assert_eq!(FieldValue::Float(2.0).to_string(), "2.0");
        assert_eq!(FieldValue::Bool(true).to_string(), "True");
        assert_eq!(FieldValue::Null.to_string(), "");
        assert_eq!(FieldValue::SmallInt(-2).to_string(), "-2");
    }

    #[test]
    fn test_candidate_float_lookup() {
        let c = Candidate::new("1.01", SystemId(1), 2.47, 40.0, Some("PRR"))
            .with_field("radius", FieldValue::Float(13.1))
            .with_field("nttobs", FieldValue::Int(140))
            .with_field("ttvflag", FieldValue::Categorical("N".to_string()));

        assert_eq!(c.float("ttvperiod"), Some(2.47));
        assert_eq!(c.radius(), Some(13.1));
        assert_eq!(c.float("nttobs"), Some(140.0));
        assert_eq!(c.float("ttvflag"), None);
        assert_eq!(c.float("multiplicity"), None);
        assert_eq!(c.impact_parameter(), None);
    }
}
