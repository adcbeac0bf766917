//! Usufruct percentage: actuarial factor normalized by a perpetuity

/// Convert an actuarial factor into the usufruct share of the asset's value
///
/// The factor is measured against the perpetuity factor `1 / discount_rate`
/// (the annuity factor of a right held forever at that rate). The clamp is
/// required: at very young starting ages with low rates the raw ratio can
/// slightly exceed 1 due to table granularity, and the economic share of a
/// usufruct can never exceed 100% of the asset.
pub fn usufruct_percentage(actuarial_factor: f64, discount_rate: f64) -> f64 {
    let perpetuity_factor = 1.0 / discount_rate;
    (actuarial_factor / perpetuity_factor).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_percentage_is_factor_over_perpetuity() {
        // Factor 5.0 against a perpetuity of 1/0.12 = 8.333...
        assert_relative_eq!(usufruct_percentage(5.0, 0.12), 0.6, max_relative = 1e-12);
    }

    #[test]
    fn test_clamped_at_one() {
        // Raw ratio above 1 must clamp
        assert_eq!(usufruct_percentage(12.0, 0.12), 1.0);
        assert_eq!(usufruct_percentage(1.0 / 0.12 + 0.5, 0.12), 1.0);
    }

    #[test]
    fn test_bounded_share() {
        for factor in [0.0, 0.5, 4.0, 8.0, 8.4, 50.0, 1e6] {
            let pct = usufruct_percentage(factor, 0.12);
            assert!((0.0..=1.0).contains(&pct), "pct {} out of bounds", pct);
        }
    }

    #[test]
    fn test_zero_factor_means_zero_share() {
        assert_eq!(usufruct_percentage(0.0, 0.12), 0.0);
    }
}
