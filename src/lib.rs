//! Usufruct Valuation - actuarial engine for splitting residential property
//! value between right-of-use and bare ownership
//!
//! This library provides:
//! - Per-gender life tables with exact-age survivorship lookup
//! - Actuarial factor computation (survival x discount integration)
//! - Usufruct percentage derivation via perpetuity normalization
//! - Comparable-transaction statistics by postal code and area bucket
//! - Desagio reconciliation against comparable transaction ranges

pub mod comparables;
pub mod error;
pub mod request;
pub mod tables;
pub mod valuation;

// Re-export commonly used types
pub use comparables::{ComparableStats, ComparableTransaction, ComparableTransactionSet};
pub use error::ValuationError;
pub use request::{Gender, ValuationInput, ValuationResult};
pub use tables::{MortalityTable, MortalityTableStore};
pub use valuation::{DesagioEngine, DEFAULT_DISCOUNT_RATE};
