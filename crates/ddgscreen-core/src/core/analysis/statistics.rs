/// Decimal digits kept for the ΔΔG statistic.
pub const DDG_DECIMALS: i32 = 2;
/// Decimal digits kept for the displayed sample means.
pub const MEAN_DECIMALS: i32 = 3;

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Rounds half away from zero to `digits` decimal places.
///
/// Negative zero is normalized to `0.0` so it never prints as `-0.00`.
pub fn round_to(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (value * scale).round() / scale + 0.0
}

/// Computes `round(mean(mutant) - mean(baseline), 2)` from the raw means.
///
/// Returns `None` when either collection is empty.
pub fn compute_ddg(baseline: &[f64], mutant: &[f64]) -> Option<f64> {
    let baseline_mean = mean(baseline)?;
    let mutant_mean = mean(mutant)?;
    Some(round_to(mutant_mean - baseline_mean, DDG_DECIMALS))
}
