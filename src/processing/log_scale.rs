//! Preparing numeric series for logarithmic axes.

use log::trace;

use crate::types::Value;

/// Floor used when a series has no strictly positive value.
pub const FALLBACK_MIN_POSITIVE: f64 = 1e-10;

/// Make `series` safe to pass through a logarithm.
///
/// - NaN and ±infinity are dropped, so the output can be shorter than the input.
/// - If nothing is left, returns `[1.0]`.
/// - Every remaining value is raised to at least one tenth of the smallest strictly positive
///   value (or of [`FALLBACK_MIN_POSITIVE`] when there is none). When that tenth underflows, the
///   smallest positive subnormal is used instead.
///
/// Every output value is finite and strictly positive, and positive inputs keep their relative
/// order. Keeping the result aligned with another column is up to the caller.
///
/// ```rust
/// use tabular_lens::processing::sanitize;
///
/// assert_eq!(sanitize(&[-5.0, 0.0, 2.0, f64::NAN, f64::INFINITY]), vec![0.2, 0.2, 2.0]);
/// assert_eq!(sanitize(&[f64::NAN, f64::NEG_INFINITY]), vec![1.0]);
/// ```
pub fn sanitize(series: &[f64]) -> Vec<f64> {
    let finite: Vec<f64> = series.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        trace!("log-scale: all {} values non-finite", series.len());
        return vec![1.0];
    }

    let min_positive = finite
        .iter()
        .copied()
        .filter(|v| *v > 0.0)
        .min_by(f64::total_cmp)
        .unwrap_or(FALLBACK_MIN_POSITIVE);
    let floor = (min_positive / 10.0).max(f64::from_bits(1));

    trace!(
        "log-scale: dropped {} non-finite, clamping to floor {floor:e}",
        series.len() - finite.len()
    );
    finite.into_iter().map(|v| v.max(floor)).collect()
}

/// [`sanitize`] for dataset cells: numbers are taken as-is, bools as `0.0`/`1.0`, nulls and text
/// count as NaN and are dropped.
pub fn sanitize_values(values: &[&Value]) -> Vec<f64> {
    let series: Vec<f64> = values
        .iter()
        .map(|v| v.as_f64().unwrap_or(f64::NAN))
        .collect();
    sanitize(&series)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_non_positive_values_to_tenth_of_min_positive() {
        let out = sanitize(&[-5.0, 0.0, 2.0, f64::NAN, f64::INFINITY]);
        assert_eq!(out, vec![0.2, 0.2, 2.0]);
    }

    #[test]
    fn all_dropped_returns_single_one() {
        assert_eq!(sanitize(&[f64::NAN, f64::NEG_INFINITY]), vec![1.0]);
        assert_eq!(sanitize(&[]), vec![1.0]);
    }

    #[test]
    fn no_positive_values_uses_fallback_floor() {
        let floor = FALLBACK_MIN_POSITIVE / 10.0;
        let out = sanitize(&[-1.0, -2.0, 0.0]);
        assert_eq!(out, vec![floor; 3]);
        assert!(out.iter().all(|v| ((v - 1e-11) / 1e-11).abs() < 1e-12));
    }

    #[test]
    fn positive_values_keep_order_and_magnitude() {
        let input = [5.0, 0.001, 300.0, 0.5];
        assert_eq!(sanitize(&input), input.to_vec());
    }

    #[test]
    fn output_is_always_strictly_positive() {
        let inputs: [&[f64]; 7] = [
            &[0.0],
            &[-0.0, -1e300],
            &[f64::MIN_POSITIVE, -3.0],
            &[1e-320, 0.0],
            &[5e-324, -1.0],
            &[1e-323, 0.0, -0.0],
            &[f64::INFINITY, 7.0, f64::NAN, -7.0],
        ];
        for input in inputs {
            let out = sanitize(input);
            assert!(!out.is_empty());
            assert!(out.iter().all(|v| *v > 0.0 && v.is_finite()), "{input:?} -> {out:?}");
        }
    }

    #[test]
    fn subnormal_minimum_keeps_floor_above_zero() {
        let smallest = f64::from_bits(1);
        assert_eq!(sanitize(&[5e-324, -1.0]), vec![smallest, smallest]);
    }

    #[test]
    fn sanitize_values_drops_nulls_and_text() {
        let values = [
            Value::Int64(4),
            Value::Null,
            Value::Float64(-1.0),
            Value::Utf8("x".to_string()),
            Value::Bool(true),
        ];
        let refs: Vec<&Value> = values.iter().collect();
        assert_eq!(sanitize_values(&refs), vec![4.0, 0.1, 1.0]);
    }
}
