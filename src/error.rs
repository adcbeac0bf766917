//! Error types for the valuation library

use crate::request::Gender;
use thiserror::Error;

/// Errors produced by the valuation core
#[derive(Debug, Error)]
pub enum ValuationError {
    /// The mortality table for the given gender has no row whose exact age
    /// matches the requested starting age. Interpolation is not permitted,
    /// so the calculation cannot proceed.
    #[error("no mortality row for exact age {age} in the {gender:?} life table")]
    MissingAgeRow { gender: Gender, age: u32 },

    /// A mortality table violated its structural invariants at load time
    #[error("invalid mortality table: {0}")]
    InvalidTable(String),
}
