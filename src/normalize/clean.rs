//! Column cleaning, type coercion and system derivation.

use super::schema::{ColumnType, Schema, DERIVED_COLUMNS, KOI, SNR, STATUSFLAG, TTVPERIOD};
use crate::data::{Candidate, Catalog, FieldValue, RawTable, SystemId};
use crate::error::{KeplerError, Result};
use std::collections::{BTreeMap, BTreeSet};

/// Tokens read as a missing value, besides an empty cell.
const MISSING_TOKENS: &[&str] = &["NA", "na", "N/A", "NaN", "nan", "null", "NULL", "None"];

/// Canonicalize a column name.
///
/// Lowercases, maps spaces and `/ - . , &` to `_`, strips `( ) [ ] : ? '`,
/// and collapses runs of `_`. Applying it twice gives the same result.
pub fn clean_column_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.to_lowercase().chars() {
        let mapped = match ch {
            '(' | ')' | '[' | ']' | ':' | '?' | '\'' => continue,
            ' ' | '/' | '-' | '.' | ',' | '&' => '_',
            other => other,
        };
        if mapped == '_' && out.ends_with('_') {
            continue;
        }
        out.push(mapped);
    }
    out
}

/// Normalize a raw table with the Kepler schema.
pub fn normalize_catalog(raw: &RawTable) -> Result<Catalog> {
    normalize_with_schema(raw, &Schema::kepler())
}

/// Normalize a raw table against an explicit schema.
///
/// Fails on a missing required column, on two headers that clean to the same
/// name, on a value that cannot be coerced to its declared type, and on a
/// KOI designation that is not numeric. Rows are never dropped silently.
/// An empty table yields an empty catalog.
pub fn normalize_with_schema(raw: &RawTable, schema: &Schema) -> Result<Catalog> {
    let names: Vec<String> = raw.headers().iter().map(|h| clean_column_name(h)).collect();

    let mut seen = BTreeSet::new();
    if let Some(dup) = names.iter().find(|n| !seen.insert(n.as_str())) {
        return Err(KeplerError::DuplicateColumn(dup.clone()));
    }

    let position_of = |wanted: &str| names.iter().position(|n| n == wanted);
    let mut key_columns = BTreeMap::new();
    for required in schema.required() {
        let idx = position_of(required)
            .ok_or_else(|| KeplerError::MissingColumn(required.clone()))?;
        key_columns.insert(required.as_str(), idx);
    }

    let payload_types = payload_column_types(raw, &names, schema, &key_columns);
    let mut n_defaulted = 0usize;

    let mut candidates = Vec::with_capacity(raw.n_rows());
    for (row_idx, row) in raw.rows().iter().enumerate() {
        let cell = |name: &str| key_columns.get(name).and_then(|&i| row[i].as_deref());

        let koi = cell(KOI)
            .filter(|v| !is_missing(v))
            .ok_or_else(|| KeplerError::InvalidDesignation {
                row: row_idx,
                value: String::new(),
            })?
            .trim()
            .to_string();
        let system = parse_system(&koi, row_idx)?;
        let ttvperiod = coerce_float(TTVPERIOD, row_idx, cell(TTVPERIOD))?;
        let snr = coerce_float(SNR, row_idx, cell(SNR))?;
        let statusflag = cell(STATUSFLAG)
            .filter(|v| !is_missing(v))
            .map(String::from);

        let mut fields = BTreeMap::new();
        for (col_idx, ty) in &payload_types {
            let name = &names[*col_idx];
            let value = match row[*col_idx].as_deref().filter(|v| !is_missing(v)) {
                None => match schema.default_for(name) {
                    Some(default) => {
                        n_defaulted += 1;
                        default.clone()
                    }
                    None => coerce(name, row_idx, None, *ty)?,
                },
                present => coerce(name, row_idx, present, *ty)?,
            };
            fields.insert(name.clone(), value);
        }

        candidates.push(Candidate {
            koi,
            system,
            ttvperiod,
            snr,
            statusflag,
            multiplicity: None,
            position: None,
            fields,
        });
    }

    if n_defaulted > 0 {
        log::debug!("Filled {} missing cells with column defaults", n_defaulted);
    }

    let mut catalog = Catalog::new(candidates);
    catalog.sort_by_system_period();
    Ok(catalog)
}

/// Resolve the type of every payload column, inferring undeclared ones.
fn payload_column_types(
    raw: &RawTable,
    names: &[String],
    schema: &Schema,
    key_columns: &BTreeMap<&str, usize>,
) -> Vec<(usize, ColumnType)> {
    names
        .iter()
        .enumerate()
        .filter(|(idx, name)| {
            !key_columns.values().any(|k| k == idx) && !DERIVED_COLUMNS.contains(&name.as_str())
        })
        .map(|(idx, name)| {
            let ty = schema
                .column_type(name)
                .unwrap_or_else(|| infer_column_type(raw, idx));
            (idx, ty)
        })
        .collect()
}

/// Infer a type for an undeclared column from its values.
///
/// Integers only when every cell is an integer; any missing cell or decimal
/// value widens to float; anything non-numeric is text.
fn infer_column_type(raw: &RawTable, col: usize) -> ColumnType {
    let mut any_missing = false;
    let mut all_int = true;
    for row in raw.rows() {
        match row[col].as_deref().filter(|v| !is_missing(v)) {
            None => any_missing = true,
            Some(v) => {
                let v = v.trim();
                if v.parse::<i64>().is_err() {
                    all_int = false;
                    if v.parse::<f64>().is_err() {
                        return ColumnType::Text;
                    }
                }
            }
        }
    }
    if all_int && !any_missing {
        ColumnType::Int64
    } else {
        ColumnType::Float64
    }
}

fn is_missing(value: &str) -> bool {
    let v = value.trim();
    v.is_empty() || MISSING_TOKENS.contains(&v)
}

/// Derive the system id: parse as float, then truncate.
///
/// The fractional part is a planet suffix (`.01`, `.02`) and is discarded,
/// never rounded.
fn parse_system(koi: &str, row: usize) -> Result<SystemId> {
    let invalid = || KeplerError::InvalidDesignation {
        row,
        value: koi.to_string(),
    };
    let value: f64 = koi.parse().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid());
    }
    Ok(SystemId(value.trunc() as i64))
}

fn coerce_float(column: &str, row: usize, raw: Option<&str>) -> Result<f64> {
    match coerce(column, row, raw.filter(|v| !is_missing(v)), ColumnType::Float64)? {
        FieldValue::Float(v) => Ok(v),
        _ => Ok(f64::NAN),
    }
}

/// Coerce one cell; `raw` is `None` for a missing value.
fn coerce(column: &str, row: usize, raw: Option<&str>, ty: ColumnType) -> Result<FieldValue> {
    let invalid = |value: &str| KeplerError::InvalidValue {
        column: column.to_string(),
        row,
        value: value.to_string(),
        expected: ty.name(),
    };

    let Some(raw) = raw else {
        return match ty {
            ColumnType::Float64 => Ok(FieldValue::Float(f64::NAN)),
            ColumnType::Category | ColumnType::Text => Ok(FieldValue::Null),
            ColumnType::Int64 | ColumnType::Int8 | ColumnType::Bool => Err(invalid("")),
        };
    };
    let v = raw.trim();

    match ty {
        ColumnType::Category => Ok(FieldValue::Categorical(v.to_string())),
        ColumnType::Text => Ok(FieldValue::Text(v.to_string())),
        ColumnType::Float64 => v
            .parse::<f64>()
            .map(FieldValue::Float)
            .map_err(|_| invalid(raw)),
        ColumnType::Int64 => parse_integer(v).map(FieldValue::Int).ok_or_else(|| invalid(raw)),
        ColumnType::Int8 => parse_integer(v)
            .and_then(|i| i8::try_from(i).ok())
            .map(FieldValue::SmallInt)
            .ok_or_else(|| invalid(raw)),
        ColumnType::Bool => match v {
            "True" | "true" | "TRUE" | "1" | "1.0" => Ok(FieldValue::Bool(true)),
            "False" | "false" | "FALSE" | "0" | "0.0" => Ok(FieldValue::Bool(false)),
            _ => Err(invalid(raw)),
        },
    }
}

/// Parse an integer, accepting integral floats such as `"3.0"`.
fn parse_integer(v: &str) -> Option<i64> {
    if let Ok(i) = v.parse::<i64>() {
        return Some(i);
    }
    let f = v.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_table() -> RawTable {
        RawTable::from_strs(
            &["KOI", "KIC", "Kepler-ID", "TTVPeriod", "SNR", "StatusFlag", "Kepmag", "NTTobs", "Note"],
            &[
                &["2.01", "10666592", "Kepler-2", "2.20", "900", "PRR", "10.4", "240", "hot jupiter"],
                &["1.02", "11446443", "", "30.1", "15", "P", "", "12", ""],
                &["1.01", "11446443", "Kepler-1", "2.47", "40", "PRR", "11.3", "140", ""],
                &["3.01", "10748390", "", "4.89", "", "", "9.2", "80", "x"],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_clean_column_name() {
        assert_eq!(clean_column_name("KOI"), "koi");
        assert_eq!(clean_column_name("Kepler-ID"), "kepler_id");
        assert_eq!(clean_column_name("SNRwoTTV/SNRwTTV"), "snrwottv_snrwttv");
        assert_eq!(clean_column_name("[M/H]_e"), "m_h_e");
        assert_eq!(clean_column_name("Rho (model) - lc"), "rho_model_lc");
        assert_eq!(clean_column_name("dChisq  inj?"), "dchisq_inj");
    }

    #[test]
    fn test_clean_column_name_idempotent() {
        for name in ["TTVper cor.err", "a - b", "x&&y", "Rp/Rs (+)"] {
            let once = clean_column_name(name);
            assert_eq!(clean_column_name(&once), once);
        }
    }

    #[test]
    fn test_normalize_sorts_and_derives_system() {
        let catalog = normalize_catalog(&create_test_table()).unwrap();
        let kois: Vec<&str> = catalog.iter().map(|c| c.koi.as_str()).collect();
        assert_eq!(kois, vec!["1.01", "1.02", "2.01", "3.01"]);

        let systems: Vec<i64> = catalog.iter().map(|c| c.system.0).collect();
        assert_eq!(systems, vec![1, 1, 2, 3]);
    }

    #[test]
    fn test_normalize_types_and_defaults() {
        let catalog = normalize_catalog(&create_test_table()).unwrap();
        let koi_1_02 = &catalog.candidates()[1];

        assert_eq!(koi_1_02.field("kepmag"), Some(&FieldValue::Float(0.0)));
        assert_eq!(
            koi_1_02.field("kepler_id"),
            Some(&FieldValue::Categorical(String::new()))
        );
        assert_eq!(koi_1_02.field("nttobs"), Some(&FieldValue::Int(12)));
        assert_eq!(
            koi_1_02.field("kic"),
            Some(&FieldValue::Categorical("11446443".to_string()))
        );
        assert_eq!(koi_1_02.field("note"), Some(&FieldValue::Null));

        let koi_3_01 = &catalog.candidates()[3];
        assert!(koi_3_01.snr.is_nan());
        assert_eq!(koi_3_01.statusflag, None);
    }

    #[test]
    fn test_system_truncates_not_rounds() {
        let table = RawTable::from_strs(
            &["koi", "ttvperiod", "snr", "statusflag"],
            &[&["7.99", "1", "20", "P"], &["8.01", "2", "20", "P"]],
        )
        .unwrap();
        let catalog = normalize_catalog(&table).unwrap();
        assert_eq!(catalog.candidates()[0].system, SystemId(7));
        assert_eq!(catalog.candidates()[1].system, SystemId(8));
    }

    #[test]
    fn test_malformed_designation_is_error() {
        let table = RawTable::from_strs(
            &["koi", "ttvperiod", "snr", "statusflag"],
            &[&["1.01", "1", "20", "P"], &["K00752.01", "2", "20", "P"]],
        )
        .unwrap();
        let result = normalize_catalog(&table);
        assert!(matches!(
            result,
            Err(KeplerError::InvalidDesignation { row: 1, .. })
        ));
    }

    #[test]
    fn test_missing_required_column() {
        let table = RawTable::from_strs(&["koi", "snr", "statusflag"], &[&["1.01", "20", "P"]])
            .unwrap();
        assert!(matches!(
            normalize_catalog(&table),
            Err(KeplerError::MissingColumn(c)) if c == "ttvperiod"
        ));
    }

    #[test]
    fn test_uncoercible_value() {
        let table = RawTable::from_strs(
            &["koi", "ttvperiod", "snr", "statusflag", "stellar_source"],
            &[&["1.01", "1", "20", "P", "300"]],
        )
        .unwrap();
        assert!(matches!(
            normalize_catalog(&table),
            Err(KeplerError::InvalidValue { expected: "int8", .. })
        ));

        let table = RawTable::from_strs(
            &["koi", "ttvperiod", "snr", "statusflag"],
            &[&["1.01", "fast", "20", "P"]],
        )
        .unwrap();
        assert!(normalize_catalog(&table).is_err());
    }

    #[test]
    fn test_colliding_headers_rejected() {
        let table = RawTable::from_strs(
            &["koi", "ttvperiod", "snr", "statusflag", "Radius (km)", "Radius-km"],
            &[&["1.01", "1", "20", "P", "111", "999"]],
        )
        .unwrap();
        assert!(matches!(
            normalize_catalog(&table),
            Err(KeplerError::DuplicateColumn(c)) if c == "radius_km"
        ));

        let table = RawTable::from_strs(
            &["KOI", "koi", "ttvperiod", "snr", "statusflag"],
            &[&["1.01", "1.02", "1", "20", "P"]],
        )
        .unwrap();
        assert!(matches!(
            normalize_catalog(&table),
            Err(KeplerError::DuplicateColumn(c)) if c == "koi"
        ));
    }

    #[test]
    fn test_derived_columns_recomputed() {
        let table = RawTable::from_strs(
            &["koi", "ttvperiod", "snr", "statusflag", "system", "position"],
            &[&["5.01", "1", "20", "P", "999", "single"]],
        )
        .unwrap();
        let catalog = normalize_catalog(&table).unwrap();
        let c = &catalog.candidates()[0];
        assert_eq!(c.system, SystemId(5));
        assert!(c.fields.is_empty());
        assert_eq!(c.position, None);
    }

    #[test]
    fn test_empty_table() {
        let table = RawTable::from_strs(&["koi", "ttvperiod", "snr", "statusflag"], &[]).unwrap();
        assert!(normalize_catalog(&table).unwrap().is_empty());
    }
}
