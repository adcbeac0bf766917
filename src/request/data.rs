//! Request and result data structures for a single valuation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::comparables::ComparableStats;

/// Gender of the occupant, used to select the life table
///
/// `Other` doubles as the catch-all for unrecognized input: the original
/// intake accepts free text, so anything that is not clearly male or female
/// resolves to the Other table rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Map a free-text gender field into the closed enumeration
    ///
    /// Matching is case-insensitive and tolerant of single-letter input.
    /// Unknown values resolve to `Other`, never to an error.
    pub fn from_input(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Gender::Male,
            "female" | "f" => Gender::Female,
            _ => Gender::Other,
        }
    }
}

/// Input to a single reconciliation, constructed per request and consumed once
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationInput {
    /// Market valuation from the external appraisal API
    pub market_estimate: f64,

    /// Aggregated comparable-transaction statistics for the property's
    /// (postal code, area bucket) key
    pub comparable_stats: ComparableStats,

    /// Occupant gender, already mapped into the closed enumeration
    pub gender: Gender,

    /// Occupant age in whole years
    pub age: u32,

    /// Annual discount rate in (0, 1)
    pub discount_rate: f64,
}

/// Output of a single reconciliation
///
/// `usufruct_value + bare_value` always equals the market estimate exactly:
/// the split fully partitions the estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    /// Share of the market estimate attributable to the right of use
    pub usufruct_value: f64,

    /// Remaining ownership share (`market_estimate - usufruct_value`)
    pub bare_value: f64,

    /// Bare-property ratio (percent) against the reference price
    pub desagio_min: f64,

    /// Upper reconciliation bound, computed only when the market estimate
    /// diverges from comparables by more than the variance threshold
    pub desagio_max: Option<f64>,
}

/// Response payload of the external appraisal API
///
/// The core consumes only `pricing.inference`; the liquidity score is kept
/// for the caller's display layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppraisalResponse {
    pub pricing: AppraisalPricing,
    pub score: AppraisalScore,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppraisalPricing {
    /// Point estimate of market value
    pub inference: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppraisalScore {
    /// Liquidity fit label (e.g. "good")
    pub fit: String,
    pub value: f64,
}

impl AppraisalResponse {
    /// Market estimate consumed by the reconciliation step
    pub fn market_estimate(&self) -> f64 {
        self.pricing.inference
    }
}

/// Elapsed whole years between a birth date and a reference date
///
/// Matches the original intake's day-count convention: elapsed days divided
/// by 365, floored. Returns 0 if the birth date is in the future.
pub fn age_at(birth_date: NaiveDate, today: NaiveDate) -> u32 {
    let days = today.signed_duration_since(birth_date).num_days();
    if days <= 0 {
        return 0;
    }
    (days / 365) as u32
}

/// Age as of the current local date
pub fn current_age(birth_date: NaiveDate) -> u32 {
    age_at(birth_date, chrono::Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_mapping() {
        assert_eq!(Gender::from_input("male"), Gender::Male);
        assert_eq!(Gender::from_input("MALE"), Gender::Male);
        assert_eq!(Gender::from_input(" m "), Gender::Male);
        assert_eq!(Gender::from_input("Female"), Gender::Female);
        assert_eq!(Gender::from_input("f"), Gender::Female);
        assert_eq!(Gender::from_input("non-binary"), Gender::Other);
        assert_eq!(Gender::from_input(""), Gender::Other);
        assert_eq!(Gender::from_input("unknown"), Gender::Other);
    }

    #[test]
    fn test_age_day_count() {
        let dob = NaiveDate::from_ymd_opt(1960, 3, 15).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        // 65 calendar years, but 365-day convention counts the leap days
        let days = today.signed_duration_since(dob).num_days();
        assert_eq!(age_at(dob, today), (days / 365) as u32);
        assert_eq!(age_at(dob, today), 65);
    }

    #[test]
    fn test_age_future_birth_date() {
        let dob = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(age_at(dob, today), 0);
    }

    #[test]
    fn test_appraisal_payload_parsing() {
        let json = r#"{
            "pricing": { "inference": 1250000.0 },
            "score": { "fit": "good", "value": 0.82 }
        }"#;
        let resp: AppraisalResponse = serde_json::from_str(json).unwrap();
        assert!((resp.market_estimate() - 1_250_000.0).abs() < 1e-9);
        assert_eq!(resp.score.fit, "good");
    }
}
