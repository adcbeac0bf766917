//! Observability hook for the reconciliation pipeline
//!
//! The engine carries no embedded diagnostics; callers that want visibility
//! into intermediate values inject an observer.

use crate::request::Gender;

/// Callback surface for intermediate reconciliation values
///
/// All methods have no-op defaults, so implementors override only what they
/// record. Must be shareable across threads: batch runs valuate in parallel.
pub trait ValuationObserver: Send + Sync {
    /// Actuarial factor computed for the occupant
    fn on_actuarial_factor(&self, _gender: Gender, _age: u32, _factor: f64) {}

    /// Usufruct percentage after perpetuity normalization
    fn on_usufruct_percentage(&self, _percentage: f64) {}

    /// Relative variance (percent) between the estimate and comparables,
    /// and whether the high-variance branch was taken
    fn on_variance(&self, _variance_pct: f64, _high_variance: bool) {}
}

/// Observer that records intermediate values at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl ValuationObserver for LogObserver {
    fn on_actuarial_factor(&self, gender: Gender, age: u32, factor: f64) {
        log::debug!("actuarial factor: gender={:?} age={} factor={:.6}", gender, age, factor);
    }

    fn on_usufruct_percentage(&self, percentage: f64) {
        log::debug!("usufruct percentage: {:.6}", percentage);
    }

    fn on_variance(&self, variance_pct: f64, high_variance: bool) {
        log::debug!(
            "estimate/comparable variance: {:.4}% (high-variance branch: {})",
            variance_pct,
            high_variance
        );
    }
}
