//! Load batch valuation requests from CSV
//!
//! Expected columns:
//! `postal_code,built_area_sqm,gender,birth_date,market_estimate`
//! with `birth_date` in ISO format (YYYY-MM-DD) and `gender` as free text.

use super::{age_at, Gender, ValuationInput};
use crate::comparables::ComparableTransactionSet;
use crate::valuation::DEFAULT_DISCOUNT_RATE;
use chrono::NaiveDate;
use csv::Reader;
use std::error::Error;
use std::path::Path;

/// One raw batch request row
#[derive(Debug, Clone, serde::Deserialize)]
pub struct BatchRequest {
    pub postal_code: u32,
    pub built_area_sqm: u32,
    pub gender: String,
    pub birth_date: NaiveDate,
    pub market_estimate: f64,
}

impl BatchRequest {
    /// Resolve the raw row into an engine input as of `today`
    ///
    /// Runs the comparable lookup and maps the free-text gender field into
    /// the closed enumeration.
    pub fn to_input(&self, comparables: &ComparableTransactionSet, today: NaiveDate) -> ValuationInput {
        ValuationInput {
            market_estimate: self.market_estimate,
            comparable_stats: comparables.lookup(self.postal_code, self.built_area_sqm),
            gender: Gender::from_input(&self.gender),
            age: age_at(self.birth_date, today),
            discount_rate: DEFAULT_DISCOUNT_RATE,
        }
    }
}

/// Load all batch requests from a CSV file
pub fn load_requests<P: AsRef<Path>>(path: P) -> Result<Vec<BatchRequest>, Box<dyn Error>> {
    let mut reader = Reader::from_path(path)?;
    collect_requests(&mut reader)
}

/// Load batch requests from any reader (e.g. string buffer)
pub fn load_requests_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<BatchRequest>, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    collect_requests(&mut csv_reader)
}

fn collect_requests<R: std::io::Read>(
    reader: &mut Reader<R>,
) -> Result<Vec<BatchRequest>, Box<dyn Error>> {
    let mut requests = Vec::new();

    for result in reader.deserialize() {
        let row: BatchRequest = result?;
        requests.push(row);
    }

    Ok(requests)
}
