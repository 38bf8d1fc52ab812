//! Multiplicity counting and position labeling within systems.

use crate::data::{Catalog, Position};

/// Record on every row the number of rows sharing its system.
///
/// Counts reflect this catalog only; rows dropped later keep the value
/// computed here.
pub fn assign_multiplicity(catalog: &Catalog) -> Catalog {
    let index = catalog.system_index();
    catalog
        .iter()
        .map(|c| {
            let mut c = c.clone();
            c.multiplicity = Some(index.group_size(c.system) as u32);
            c
        })
        .collect()
}

/// Label each row by its orbital position within its system.
///
/// In a system with two or more rows, the shortest period is `Innermost`,
/// the longest `Outermost`, the rest `Middle`. Ties go to the first row in
/// catalog order. When one row would take both labels (all periods equal)
/// the last other row of the system becomes `Outermost`, so every system of
/// two or more rows keeps exactly one `Innermost` and one `Outermost`.
/// NaN periods are skipped; if every period of a system is NaN the first
/// and last rows are used. A system with a single row is labeled `Single`.
pub fn label_positions(catalog: &Catalog) -> Catalog {
    let candidates = catalog.candidates();
    let mut positions = vec![Position::Middle; catalog.len()];

    for (_, rows) in catalog.system_index().iter() {
        if rows.len() == 1 {
            positions[rows[0]] = Position::Single;
            continue;
        }

        let period = |row: usize| candidates[row].ttvperiod;
        let inner = first_extreme(rows, period, |v, best| v < best).unwrap_or(rows[0]);
        let mut outer =
            first_extreme(rows, period, |v, best| v > best).unwrap_or(rows[rows.len() - 1]);
        if outer == inner {
            outer = rows
                .iter()
                .rev()
                .copied()
                .find(|&r| r != inner)
                .unwrap_or(outer);
        }

        positions[inner] = Position::Innermost;
        positions[outer] = Position::Outermost;
    }

    catalog
        .iter()
        .zip(positions)
        .map(|(c, position)| {
            let mut c = c.clone();
            c.position = Some(position);
            c
        })
        .collect()
}

/// First row whose value beats every earlier one under `better`.
///
/// NaN values are skipped; `None` when all are NaN.
fn first_extreme<V, B>(rows: &[usize], value: V, better: B) -> Option<usize>
where
    V: Fn(usize) -> f64,
    B: Fn(f64, f64) -> bool,
{
    let mut best: Option<(usize, f64)> = None;
    for &row in rows {
        let v = value(row);
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if !better(v, b) => {}
            _ => best = Some((row, v)),
        }
    }
    best.map(|(row, _)| row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Candidate, SystemId};

    fn cand(koi: &str, system: i64, period: f64) -> Candidate {
        Candidate::new(koi, SystemId(system), period, 20.0, Some("P"))
    }

    fn labels(catalog: &Catalog) -> Vec<Position> {
        catalog.iter().map(|c| c.position.unwrap()).collect()
    }

    #[test]
    fn test_assign_multiplicity() {
        let catalog = Catalog::new(vec![
            cand("1.01", 1, 3.0),
            cand("1.02", 1, 8.0),
            cand("2.01", 2, 4.0),
        ]);
        let counted = assign_multiplicity(&catalog);
        let m: Vec<u32> = counted.iter().map(|c| c.multiplicity.unwrap()).collect();
        assert_eq!(m, vec![2, 2, 1]);
    }

    #[test]
    fn test_label_three_planet_system() {
        let catalog = Catalog::new(vec![
            cand("10.01", 10, 5.0),
            cand("10.02", 10, 15.0),
            cand("10.03", 10, 25.0),
            cand("11.01", 11, 10.0),
        ]);
        assert_eq!(
            labels(&label_positions(&catalog)),
            vec![
                Position::Innermost,
                Position::Middle,
                Position::Outermost,
                Position::Single
            ]
        );
    }

    #[test]
    fn test_label_uses_period_not_row_order() {
        let catalog = Catalog::new(vec![
            cand("10.02", 10, 15.0),
            cand("10.03", 10, 25.0),
            cand("10.01", 10, 5.0),
            cand("10.04", 10, 9.0),
        ]);
        assert_eq!(
            labels(&label_positions(&catalog)),
            vec![
                Position::Middle,
                Position::Outermost,
                Position::Innermost,
                Position::Middle
            ]
        );
    }

    #[test]
    fn test_label_two_planet_system_has_no_middle() {
        let catalog = Catalog::new(vec![cand("10.02", 10, 15.0), cand("10.03", 10, 25.0)]);
        assert_eq!(
            labels(&label_positions(&catalog)),
            vec![Position::Innermost, Position::Outermost]
        );
    }

    #[test]
    fn test_label_ties_keep_one_inner_and_one_outer() {
        let catalog = Catalog::new(vec![
            cand("20.01", 20, 7.0),
            cand("20.02", 20, 7.0),
            cand("20.03", 20, 7.0),
        ]);
        assert_eq!(
            labels(&label_positions(&catalog)),
            vec![Position::Innermost, Position::Middle, Position::Outermost]
        );

        let catalog = Catalog::new(vec![
            cand("21.01", 21, 2.0),
            cand("21.02", 21, 2.0),
            cand("21.03", 21, 9.0),
        ]);
        assert_eq!(
            labels(&label_positions(&catalog)),
            vec![Position::Innermost, Position::Middle, Position::Outermost]
        );
    }

    #[test]
    fn test_label_skips_nan_periods() {
        let catalog = Catalog::new(vec![
            cand("30.01", 30, f64::NAN),
            cand("30.02", 30, 4.0),
            cand("30.03", 30, 12.0),
        ]);
        assert_eq!(
            labels(&label_positions(&catalog)),
            vec![Position::Middle, Position::Innermost, Position::Outermost]
        );

        let catalog = Catalog::new(vec![cand("31.01", 31, f64::NAN), cand("31.02", 31, f64::NAN)]);
        assert_eq!(
            labels(&label_positions(&catalog)),
            vec![Position::Innermost, Position::Outermost]
        );
    }

    #[test]
    fn test_label_empty() {
        assert!(label_positions(&Catalog::empty()).is_empty());
        assert!(assign_multiplicity(&Catalog::empty()).is_empty());
    }
}
