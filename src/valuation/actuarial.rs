//! Actuarial factor: survival-and-discount weighted lifetime annuity sum

use crate::error::ValuationError;
use crate::request::Gender;
use crate::tables::MortalityTableStore;
use std::sync::Arc;

/// Computes the expected present value of a lifetime annuity of one unit
/// per year, starting at a given age, from the shared life tables
#[derive(Debug, Clone)]
pub struct ActuarialFactorCalculator {
    tables: Arc<MortalityTableStore>,
}

impl ActuarialFactorCalculator {
    pub fn new(tables: Arc<MortalityTableStore>) -> Self {
        Self { tables }
    }

    /// Shared life tables backing this calculator
    pub fn tables(&self) -> &MortalityTableStore {
        &self.tables
    }

    /// Annuity-like factor for a life aged `start_age`
    ///
    /// For every table row with `age >= start_age`:
    /// `sum += (l(age) / l(start_age)) * (1 + discount_rate)^-(age - start_age)`.
    ///
    /// Fails with [`ValuationError::MissingAgeRow`] when the table has no row
    /// for the exact starting age; substituting a default factor would
    /// silently corrupt the valuation. For a fixed gender and rate the factor
    /// is non-increasing in `start_age`.
    pub fn factor(
        &self,
        gender: Gender,
        start_age: u32,
        discount_rate: f64,
    ) -> Result<f64, ValuationError> {
        let table = self.tables.life_table_for(gender);

        let lx_start = table
            .survivors_at(start_age)
            .ok_or(ValuationError::MissingAgeRow { gender, age: start_age })?;

        let mut factor = 0.0;
        for row in table.rows_from(start_age) {
            let t = (row.exact_age - start_age) as f64;
            let survival_prob = row.number_alive / lx_start;
            let discount_factor = 1.0 / (1.0 + discount_rate).powf(t);

            factor += survival_prob * discount_factor;
        }

        Ok(factor)
    }
}
