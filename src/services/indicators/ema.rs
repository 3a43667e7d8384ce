//! Exponential Moving Average (EMA).

/// Recursive EMA with smoothing factor `2 / (span + 1)` and no bias
/// adjustment. The first output equals the first input.
///
/// Returns a series the same length as `values`; empty in, empty out.
pub fn ema(values: &[f64], span: usize) -> Vec<f64> {
    let alpha = 2.0 / (span.max(1) as f64 + 1.0);
    let mut result = Vec::with_capacity(values.len());

    let mut iter = values.iter();
    let Some(&first) = iter.next() else {
        return result;
    };

    let mut current = first;
    result.push(current);
    for &value in iter {
        current += alpha * (value - current);
        result.push(current);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ema_empty() {
        assert!(ema(&[], 14).is_empty());
    }

    #[test]
    fn test_ema_same_length_and_seeded() {
        let values = [10.0, 11.0, 12.0, 13.0];
        let result = ema(&values, 3);
        assert_eq!(result.len(), values.len());
        assert_eq!(result[0], 10.0);
    }

    #[test]
    fn test_ema_recursive_weighting() {
        // span 3 -> alpha 0.5
        let result = ema(&[10.0, 20.0, 20.0], 3);
        assert!((result[1] - 15.0).abs() < 1e-12);
        assert!((result[2] - 17.5).abs() < 1e-12);
    }

    #[test]
    fn test_ema_span_one_is_identity() {
        let values = [3.0, 1.0, 4.0, 1.0, 5.0];
        assert_eq!(ema(&values, 1), values.to_vec());
    }

    #[test]
    fn test_ema_constant_series() {
        let result = ema(&[7.0; 30], 12);
        assert!(result.iter().all(|v| (*v - 7.0).abs() < 1e-12));
    }

    #[test]
    fn test_ema_lags_uptrend() {
        let values: Vec<f64> = (0..50).map(|i| 100.0 + i as f64).collect();
        let result = ema(&values, 10);
        assert!(result.last().unwrap() < values.last().unwrap());
    }
}
