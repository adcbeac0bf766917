//! Desagio engine: splits the market estimate and reconciles it against
//! comparable transactions

use super::actuarial::ActuarialFactorCalculator;
use super::observer::ValuationObserver;
use super::usufruct::usufruct_percentage;
use super::VARIANCE_THRESHOLD_PCT;
use crate::error::ValuationError;
use crate::request::{ValuationInput, ValuationResult};
use crate::tables::MortalityTableStore;
use std::sync::Arc;

/// Ratio of `numerator` to `reference` in percent, 0 when the reference is 0
///
/// The zero fallback is a deliberate policy, not an omission: a missing
/// reference price yields a zero ratio rather than a failure.
fn guarded_pct(numerator: f64, reference: f64) -> f64 {
    if reference == 0.0 {
        0.0
    } else {
        numerator / reference * 100.0
    }
}

/// Orchestrates the valuation pipeline for one request
///
/// Holds the shared life tables (immutable after load) and an optional
/// observer. `reconcile` is a single-pass, side-effect-free computation:
/// concurrent calls with different inputs are independent and produce
/// results identical to sequential execution.
pub struct DesagioEngine {
    factors: ActuarialFactorCalculator,
    observer: Option<Box<dyn ValuationObserver>>,
}

impl DesagioEngine {
    pub fn new(tables: Arc<MortalityTableStore>) -> Self {
        Self {
            factors: ActuarialFactorCalculator::new(tables),
            observer: None,
        }
    }

    /// Attach an observer for intermediate values
    pub fn with_observer(mut self, observer: Box<dyn ValuationObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Split the market estimate into usufruct and bare-property shares and
    /// derive the reconciled desagio range
    ///
    /// When the estimate sits within the variance threshold of the
    /// comparable average, the estimate is trusted: the bare-value ratio is
    /// expressed against it and no upper bound is computed. Beyond the
    /// threshold the estimate is considered unreliable and the ratio is
    /// expressed against the comparable min/max range instead.
    ///
    /// The only failure mode is a missing starting-age row in the life table.
    pub fn reconcile(&self, input: &ValuationInput) -> Result<ValuationResult, ValuationError> {
        let factor = self
            .factors
            .factor(input.gender, input.age, input.discount_rate)?;
        if let Some(observer) = &self.observer {
            observer.on_actuarial_factor(input.gender, input.age, factor);
        }

        let usu_pct = usufruct_percentage(factor, input.discount_rate);
        if let Some(observer) = &self.observer {
            observer.on_usufruct_percentage(usu_pct);
        }

        let stats = input.comparable_stats;
        let variance = if stats.avg == 0.0 {
            0.0
        } else {
            (input.market_estimate - stats.avg).abs() / stats.avg * 100.0
        };
        let high_variance = variance > VARIANCE_THRESHOLD_PCT;
        if let Some(observer) = &self.observer {
            observer.on_variance(variance, high_variance);
        }

        let usufruct_value = input.market_estimate * usu_pct;
        let bare_value = input.market_estimate - usufruct_value;

        let (desagio_min, desagio_max) = if high_variance {
            // Estimate diverges from comparables: express the bare-value
            // ratio against the comparable transaction range.
            (
                guarded_pct(bare_value, stats.min),
                Some(guarded_pct(bare_value, stats.max)),
            )
        } else {
            // Estimate trusted; no upper bound in this branch.
            (guarded_pct(bare_value, input.market_estimate), None)
        };

        Ok(ValuationResult {
            usufruct_value,
            bare_value,
            desagio_min,
            desagio_max,
        })
    }
}
