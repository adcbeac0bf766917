//! Comparable transaction records and bucket statistics
//!
//! Observed transfer-tax declarations are keyed by postal code and a 100 sqm
//! floor bucket of built area. Lookups aggregate the matching declarations
//! into average/min/max statistics; a key with no records yields zero stats
//! rather than an error, and the reconciliation treats zeros as "no
//! comparable evidence".

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::path::Path;

/// Default path to the comparable-transaction CSV
pub const DEFAULT_COMPARABLES_PATH: &str = "data/itbi_residential.csv";

/// Width of the built-area bucket in square meters
pub const BUCKET_WIDTH_SQM: u32 = 100;

/// One observed transaction declaration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparableTransaction {
    pub postal_code: u32,

    /// Lower edge of the built-area bucket, a multiple of 100
    pub bucket_start: u32,

    /// Declared transaction value
    #[serde(rename = "declared_transaction_value")]
    pub declared_value: f64,
}

/// Aggregated statistics for one (postal code, bucket) key
///
/// All-zero stats mean no matching records were found.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ComparableStats {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

impl ComparableStats {
    pub fn new(avg: f64, min: f64, max: f64) -> Self {
        Self { avg, min, max }
    }
}

/// Floor a built area to the lower edge of its 100 sqm bucket
pub fn bucket_start_for(built_area_sqm: u32) -> u32 {
    built_area_sqm / BUCKET_WIDTH_SQM * BUCKET_WIDTH_SQM
}

/// The full comparable-transaction dataset, immutable after load
#[derive(Debug, Clone, Default)]
pub struct ComparableTransactionSet {
    records: Vec<ComparableTransaction>,
}

impl ComparableTransactionSet {
    pub fn new(records: Vec<ComparableTransaction>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Aggregate stats for the bucket containing `built_area_sqm`
    ///
    /// The match is exact on (postal code, bucket): no nearest-bucket
    /// fallback and no radius search. An empty match returns zero stats.
    pub fn lookup(&self, postal_code: u32, built_area_sqm: u32) -> ComparableStats {
        let bucket_start = bucket_start_for(built_area_sqm);

        let mut count = 0u32;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for record in &self.records {
            if record.postal_code == postal_code && record.bucket_start == bucket_start {
                count += 1;
                sum += record.declared_value;
                min = min.min(record.declared_value);
                max = max.max(record.declared_value);
            }
        }

        if count == 0 {
            return ComparableStats::default();
        }

        ComparableStats::new(sum / count as f64, min, max)
    }

    /// Load the dataset from a CSV file
    ///
    /// Expected columns: `postal_code,bucket_start,declared_transaction_value`.
    pub fn from_csv(path: &Path) -> Result<Self, Box<dyn Error>> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Load the dataset from any reader (e.g. string buffer)
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, Box<dyn Error>> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: ComparableTransaction = result?;
            records.push(record);
        }

        Ok(Self::new(records))
    }

    /// Load from the default CSV location
    pub fn from_default_csv() -> Result<Self, Box<dyn Error>> {
        Self::from_csv(Path::new(DEFAULT_COMPARABLES_PATH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set() -> ComparableTransactionSet {
        ComparableTransactionSet::new(vec![
            ComparableTransaction { postal_code: 4538, bucket_start: 200, declared_value: 900_000.0 },
            ComparableTransaction { postal_code: 4538, bucket_start: 200, declared_value: 1_100_000.0 },
            ComparableTransaction { postal_code: 4538, bucket_start: 200, declared_value: 1_000_000.0 },
            ComparableTransaction { postal_code: 4538, bucket_start: 300, declared_value: 1_800_000.0 },
            ComparableTransaction { postal_code: 1310, bucket_start: 200, declared_value: 700_000.0 },
        ])
    }

    #[test]
    fn test_bucket_flooring() {
        assert_eq!(bucket_start_for(0), 0);
        assert_eq!(bucket_start_for(99), 0);
        assert_eq!(bucket_start_for(100), 100);
        assert_eq!(bucket_start_for(251), 200);
        assert_eq!(bucket_start_for(300), 300);
    }

    #[test]
    fn test_lookup_aggregates_matching_bucket() {
        let set = sample_set();
        // 251 sqm floors to bucket 200
        let stats = set.lookup(4538, 251);

        assert!((stats.avg - 1_000_000.0).abs() < 1e-9);
        assert!((stats.min - 900_000.0).abs() < 1e-9);
        assert!((stats.max - 1_100_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_lookup_is_exact_on_both_keys() {
        let set = sample_set();
        // Right postal code, area in an unpopulated bucket
        assert_eq!(set.lookup(4538, 50), ComparableStats::default());
        // Populated bucket, wrong postal code
        assert_eq!(set.lookup(9999, 251), ComparableStats::default());
    }

    #[test]
    fn test_empty_lookup_returns_zero_stats() {
        let stats = ComparableTransactionSet::default().lookup(4538, 251);
        assert_eq!(stats, ComparableStats::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_single_record_stats_collapse() {
        let set = sample_set();
        let stats = set.lookup(4538, 310);
        assert_eq!(stats.avg, stats.min);
        assert_eq!(stats.min, stats.max);
        assert!((stats.avg - 1_800_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_reader() {
        let csv = "postal_code,bucket_start,declared_transaction_value\n\
                   4538,200,950000\n\
                   4538,200,1050000\n";
        let set = ComparableTransactionSet::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(set.len(), 2);
        let stats = set.lookup(4538, 299);
        assert!((stats.avg - 1_000_000.0).abs() < 1e-9);
    }
}
