use super::types::{GrowthModel, ScenarioParameters};

const MONTHS_PER_YEAR: f64 = 12.0;

/// Straight-line accumulation from 0 to `final_value` over `years` steps.
///
/// `years` must be at least 1; zero yields a single non-finite value.
pub fn linear_series(final_value: f64, years: u32) -> Vec<f64> {
    let step = final_value / years as f64;
    (0..=years).map(|i| step * i as f64).collect()
}

/// Exponential curve anchored so that index `years` is exactly `final_value`.
///
/// Interior points are `final_value * (1 + r)^t / (1 + r)^years`, which is a
/// back-fit to the endpoint rather than a contribution-by-contribution
/// simulation. Index 0 is always 0. Rates at or below -1 are not guarded.
pub fn exponential_series(final_value: f64, years: u32, growth_rate: f64) -> Vec<f64> {
    let base = 1.0 + growth_rate;
    let end = base.powf(years as f64);
    let mut values = Vec::with_capacity(years as usize + 1);
    values.push(0.0);
    for year in 1..=years {
        let factor = base.powf(year as f64) / end;
        values.push(final_value * factor);
    }
    values
}

pub fn series_for(model: GrowthModel, final_value: f64, years: u32) -> Vec<f64> {
    match model {
        GrowthModel::Linear => linear_series(final_value, years),
        GrowthModel::Compound { rate } => exponential_series(final_value, years, rate),
    }
}

/// Year-end balances of a real compounding run: twelve monthly deposits are
/// paid in at the end of each year, after that year's growth is applied.
pub fn annual_contribution_balances(params: &ScenarioParameters) -> Vec<f64> {
    let annual_deposit = params.periodic_contribution() * MONTHS_PER_YEAR;
    let growth = 1.0 + params.annual_rate();
    let mut balance = 0.0;
    let mut balances = Vec::with_capacity(params.horizon_years() as usize + 1);
    balances.push(balance);
    for _ in 0..params.horizon_years() {
        balance = balance * growth + annual_deposit;
        balances.push(balance);
    }
    balances
}

pub fn todays_purchasing_power(value: f64, inflation_rate: f64, years: u32) -> f64 {
    value / (1.0 + inflation_rate).powf(years as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn assert_approx_rel(actual: f64, expected: f64, rel: f64) {
        let tol = expected.abs() * rel;
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, relative tolerance {rel}"
        );
    }

    #[test]
    fn linear_series_steps_by_equal_amounts() {
        let series = linear_series(1_200_000.0, 20);
        assert_eq!(series.len(), 21);
        for (i, value) in series.iter().enumerate() {
            assert_approx(*value, 60_000.0 * i as f64);
        }
        assert_eq!(series[20], 1_200_000.0);
    }

    #[test]
    fn exponential_series_lands_on_final_value() {
        let series = exponential_series(2_631_910.607, 20, 0.07);
        assert_eq!(series.len(), 21);
        assert_eq!(series[0], 0.0);
        assert_approx(series[20], 2_631_910.607);
    }

    #[test]
    fn exponential_series_interior_follows_anchored_curve() {
        let series = exponential_series(1_000.0, 3, 0.10);
        assert_approx(series[1], 1_000.0 * 1.1 / 1.331);
        assert_approx(series[2], 1_000.0 * 1.21 / 1.331);
    }

    #[test]
    fn one_year_horizon_is_start_and_end_only() {
        assert_eq!(linear_series(500.0, 1), vec![0.0, 500.0]);
        let exp = exponential_series(500.0, 1, 0.3);
        assert_eq!(exp.len(), 2);
        assert_eq!(exp[0], 0.0);
        assert_approx(exp[1], 500.0);
    }

    #[test]
    fn zero_years_is_not_guarded() {
        let series = linear_series(100.0, 0);
        assert_eq!(series.len(), 1);
        assert!(!series[0].is_finite());
    }

    #[test]
    fn rate_at_minus_one_yields_non_finite_values() {
        let series = exponential_series(100.0, 4, -1.0);
        assert_eq!(series[0], 0.0);
        assert!(series[1..].iter().all(|v| !v.is_finite()));
    }

    #[test]
    fn negative_final_value_is_propagated() {
        let series = linear_series(-40.0, 4);
        assert_eq!(series, vec![0.0, -10.0, -20.0, -30.0, -40.0]);
    }

    #[test]
    fn series_for_dispatches_on_model() {
        assert_eq!(
            series_for(GrowthModel::Linear, 90.0, 3),
            linear_series(90.0, 3)
        );
        assert_eq!(
            series_for(GrowthModel::Compound { rate: 0.2 }, 90.0, 3),
            exponential_series(90.0, 3, 0.2)
        );
    }

    #[test]
    fn forward_balances_match_annuity_formula() {
        let params = ScenarioParameters::new(20, 0.07, 5_000.0).expect("valid params");
        let balances = annual_contribution_balances(&params);
        assert_eq!(balances.len(), 21);
        assert_eq!(balances[0], 0.0);
        let annuity = 60_000.0 * ((1.07f64).powi(20) - 1.0) / 0.07;
        assert_approx_rel(balances[20], annuity, 1e-12);
    }

    #[test]
    fn forward_balances_without_growth_are_linear() {
        let params = ScenarioParameters::new(20, 0.0, 5_000.0).expect("valid params");
        let balances = annual_contribution_balances(&params);
        for (i, value) in balances.iter().enumerate() {
            assert_approx(*value, 60_000.0 * i as f64);
        }
    }

    #[test]
    fn anchored_curve_diverges_from_forward_compounding_in_interior_years() {
        let params = ScenarioParameters::new(20, 0.07, 5_000.0).expect("valid params");
        let forward = annual_contribution_balances(&params);
        let anchored = exponential_series(forward[20], 20, 0.07);

        assert_approx_rel(anchored[20], forward[20], 1e-12);
        // A 7% geometric curve through the endpoint starts far above the
        // first deposits and stays above the real balance until the end.
        assert!(anchored[1] > forward[1] * 10.0);
        assert!(anchored[10] > forward[10]);
        assert!((anchored[10] - forward[10]).abs() / forward[10] > 0.05);
    }

    #[test]
    fn purchasing_power_deflates_by_cumulative_inflation() {
        assert_approx(todays_purchasing_power(1_040.0, 0.04, 1), 1_000.0);
        assert_approx_rel(
            todays_purchasing_power(1_200_000.0, 0.04, 20),
            547_665.0,
            1e-3,
        );
        assert_eq!(todays_purchasing_power(1_000.0, 0.04, 0), 1_000.0);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_series_endpoints_are_zero_and_final_value(
            final_cents in -1_000_000_000i64..1_000_000_000,
            years in 1u32..60,
            rate_bp in -9_000i32..5_000
        ) {
            let final_value = final_cents as f64 / 100.0;
            let rate = rate_bp as f64 / 10_000.0;
            let tol = 1e-9 * final_value.abs().max(1.0);

            let linear = linear_series(final_value, years);
            prop_assert_eq!(linear.len(), years as usize + 1);
            prop_assert_eq!(linear[0], 0.0);
            prop_assert!((linear[years as usize] - final_value).abs() <= tol);

            let exp = exponential_series(final_value, years, rate);
            prop_assert_eq!(exp.len(), years as usize + 1);
            prop_assert_eq!(exp[0], 0.0);
            prop_assert!((exp[years as usize] - final_value).abs() <= tol);
        }

        #[test]
        fn prop_series_are_non_decreasing_for_non_negative_inputs(
            final_cents in 0i64..5_000_000_000,
            years in 1u32..60,
            rate_bp in 0i32..5_000
        ) {
            let final_value = final_cents as f64 / 100.0;
            let rate = rate_bp as f64 / 10_000.0;

            for series in [
                linear_series(final_value, years),
                exponential_series(final_value, years, rate),
            ] {
                for pair in series.windows(2) {
                    prop_assert!(pair[1] >= pair[0], "{} then {}", pair[0], pair[1]);
                }
            }
        }

        #[test]
        fn prop_series_are_bit_identical_across_calls(
            final_cents in -1_000_000_000i64..1_000_000_000,
            years in 1u32..40,
            rate_bp in 0i32..5_000
        ) {
            let final_value = final_cents as f64 / 100.0;
            let rate = rate_bp as f64 / 10_000.0;

            let a = exponential_series(final_value, years, rate);
            let b = exponential_series(final_value, years, rate);
            prop_assert!(a.iter().zip(&b).all(|(x, y)| x.to_bits() == y.to_bits()));

            let c = linear_series(final_value, years);
            let d = linear_series(final_value, years);
            prop_assert!(c.iter().zip(&d).all(|(x, y)| x.to_bits() == y.to_bits()));
        }
    }
}
