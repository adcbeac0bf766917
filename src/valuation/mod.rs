//! Valuation core: actuarial factor, usufruct share, and desagio reconciliation

mod actuarial;
mod desagio;
mod observer;
mod usufruct;

pub use actuarial::ActuarialFactorCalculator;
pub use desagio::DesagioEngine;
pub use observer::{LogObserver, ValuationObserver};
pub use usufruct::usufruct_percentage;

/// Default annual discount rate (12%)
pub const DEFAULT_DISCOUNT_RATE: f64 = 0.12;

/// Variance (percent) between estimate and comparable average above which
/// the market estimate is considered unreliable
pub const VARIANCE_THRESHOLD_PCT: f64 = 10.0;
