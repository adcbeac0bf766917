//! Life tables and the per-gender table store
//!
//! A life table is the classic survivorship form: for each exact age, the
//! number of lives remaining out of an initial cohort (l(x)). The tables are
//! loaded once at startup, validated, and shared read-only across all
//! calculations.

use crate::error::ValuationError;
use crate::request::Gender;
use serde::{Deserialize, Serialize};

/// One row of a life table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MortalityRow {
    /// Exact age in whole years
    pub exact_age: u32,

    /// Number of lives remaining at that age (l(x))
    pub number_alive: f64,
}

/// An ordered, validated life table for one gender variant
///
/// Deliberately not deserializable: tables enter only through [`Self::new`],
/// which enforces the structural invariants.
#[derive(Debug, Clone, Serialize)]
pub struct MortalityTable {
    rows: Vec<MortalityRow>,
}

impl MortalityTable {
    /// Build a table from rows, sorting by age and checking invariants
    ///
    /// Invariants enforced:
    /// - at least one row
    /// - exact ages strictly increasing (no duplicates)
    /// - `number_alive` non-negative and non-increasing with age
    pub fn new(mut rows: Vec<MortalityRow>) -> Result<Self, ValuationError> {
        if rows.is_empty() {
            return Err(ValuationError::InvalidTable("table has no rows".into()));
        }

        rows.sort_by_key(|r| r.exact_age);

        for pair in rows.windows(2) {
            if pair[0].exact_age == pair[1].exact_age {
                return Err(ValuationError::InvalidTable(format!(
                    "duplicate row for exact age {}",
                    pair[0].exact_age
                )));
            }
            if pair[1].number_alive > pair[0].number_alive {
                return Err(ValuationError::InvalidTable(format!(
                    "number_alive increases from age {} to {}",
                    pair[0].exact_age, pair[1].exact_age
                )));
            }
        }

        if rows.iter().any(|r| r.number_alive < 0.0 || !r.number_alive.is_finite()) {
            return Err(ValuationError::InvalidTable(
                "number_alive must be finite and non-negative".into(),
            ));
        }

        Ok(Self { rows })
    }

    /// All rows in ascending age order
    pub fn rows(&self) -> &[MortalityRow] {
        &self.rows
    }

    /// Number of lives at an exact age, or `None` if no row matches
    ///
    /// Exact match only: published tables are queried at whole ages and
    /// interpolating survivors would silently change the valuation.
    pub fn survivors_at(&self, exact_age: u32) -> Option<f64> {
        self.rows
            .binary_search_by_key(&exact_age, |r| r.exact_age)
            .ok()
            .map(|idx| self.rows[idx].number_alive)
    }

    /// Rows with `exact_age >= start_age`, in ascending age order
    pub fn rows_from(&self, start_age: u32) -> impl Iterator<Item = &MortalityRow> {
        let idx = self.rows.partition_point(|r| r.exact_age < start_age);
        self.rows[idx..].iter()
    }

    /// Synthetic linear table: ages `0..=max_age`, `l(x) = max_age - x`
    ///
    /// Useful for tests and calibration; satisfies all table invariants.
    pub fn linear(max_age: u32) -> Self {
        let rows = (0..=max_age)
            .map(|age| MortalityRow {
                exact_age: age,
                number_alive: (max_age - age) as f64,
            })
            .collect();
        Self { rows }
    }
}

/// Per-gender life table store, immutable after construction
///
/// The store is total over the `Gender` enumeration: the Other table serves
/// as the catch-all, so `life_table_for` never fails.
#[derive(Debug, Clone)]
pub struct MortalityTableStore {
    male: MortalityTable,
    female: MortalityTable,
    other: MortalityTable,
}

impl MortalityTableStore {
    pub fn new(male: MortalityTable, female: MortalityTable, other: MortalityTable) -> Self {
        Self { male, female, other }
    }

    /// Look up the life table for a gender variant
    pub fn life_table_for(&self, gender: Gender) -> &MortalityTable {
        match gender {
            Gender::Male => &self.male,
            Gender::Female => &self.female,
            Gender::Other => &self.other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_table_shape() {
        let table = MortalityTable::linear(100);
        assert_eq!(table.rows().len(), 101);
        assert_eq!(table.survivors_at(0), Some(100.0));
        assert_eq!(table.survivors_at(60), Some(40.0));
        assert_eq!(table.survivors_at(100), Some(0.0));
        assert_eq!(table.survivors_at(101), None);
    }

    #[test]
    fn test_rows_from_skips_earlier_ages() {
        let table = MortalityTable::linear(100);
        let ages: Vec<u32> = table.rows_from(98).map(|r| r.exact_age).collect();
        assert_eq!(ages, vec![98, 99, 100]);
    }

    #[test]
    fn test_new_sorts_rows() {
        let table = MortalityTable::new(vec![
            MortalityRow { exact_age: 2, number_alive: 80.0 },
            MortalityRow { exact_age: 0, number_alive: 100.0 },
            MortalityRow { exact_age: 1, number_alive: 90.0 },
        ])
        .unwrap();
        let ages: Vec<u32> = table.rows().iter().map(|r| r.exact_age).collect();
        assert_eq!(ages, vec![0, 1, 2]);
    }

    #[test]
    fn test_rejects_empty_table() {
        assert!(MortalityTable::new(vec![]).is_err());
    }

    #[test]
    fn test_rejects_duplicate_age() {
        let result = MortalityTable::new(vec![
            MortalityRow { exact_age: 5, number_alive: 90.0 },
            MortalityRow { exact_age: 5, number_alive: 90.0 },
        ]);
        assert!(matches!(result, Err(ValuationError::InvalidTable(_))));
    }

    #[test]
    fn test_rejects_increasing_survivorship() {
        let result = MortalityTable::new(vec![
            MortalityRow { exact_age: 0, number_alive: 90.0 },
            MortalityRow { exact_age: 1, number_alive: 95.0 },
        ]);
        assert!(matches!(result, Err(ValuationError::InvalidTable(_))));
    }

    #[test]
    fn test_allows_flat_and_zero_tail() {
        // Ties and a zero tail are legal in published tables
        let result = MortalityTable::new(vec![
            MortalityRow { exact_age: 98, number_alive: 2.0 },
            MortalityRow { exact_age: 99, number_alive: 2.0 },
            MortalityRow { exact_age: 100, number_alive: 0.0 },
        ]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_store_dispatch() {
        let store = MortalityTableStore::new(
            MortalityTable::linear(100),
            MortalityTable::linear(105),
            MortalityTable::linear(102),
        );
        assert_eq!(store.life_table_for(Gender::Male).rows().len(), 101);
        assert_eq!(store.life_table_for(Gender::Female).rows().len(), 106);
        assert_eq!(store.life_table_for(Gender::Other).rows().len(), 103);
    }
}
