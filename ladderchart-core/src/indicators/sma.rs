//! Simple rolling mean.
//!
//! Mean of the trailing `window` values. A position is defined only when all
//! `window` values ending at it are defined; earlier positions are `None`.
//! Each window is summed directly, so a window of exact zeros averages to
//! exactly zero (RSI depends on that for its zero-loss branch).

pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let mut result = vec![None; n];

    if window == 0 || n < window {
        return result;
    }

    for i in (window - 1)..n {
        let mut sum = 0.0;
        let mut complete = true;
        for v in &values[(i + 1 - window)..=i] {
            match v {
                Some(v) => sum += v,
                None => {
                    complete = false;
                    break;
                }
            }
        }
        if complete {
            result[i] = Some(sum / window as f64);
        }
    }

    result
}
