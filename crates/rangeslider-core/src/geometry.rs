//! Pure numeric helpers: step quantization, relative positions, list padding.

/// Clamp `value` into `[min, max]` and snap it to the nearest multiple of
/// `step` counted from `min`.
///
/// Ties round away from zero. A non-positive `step` disables snapping. A
/// snapped value that overshoots `max` is clamped back to `max`. Snapped
/// values carry no more decimals than `step` and `min` do, so a `0.1` step
/// yields `0.7` rather than `0.7000000000000001`.
#[must_use]
pub fn closest_to_step(min: f64, max: f64, step: f64, value: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    let clamped = clamp(min, max, value);
    if step <= 0.0 || step.is_nan() {
        return clamped;
    }
    let steps = ((clamped - min) / step).round();
    let decimals = decimal_places(step).max(decimal_places(min));
    clamp(min, max, round_to(steps.mul_add(step, min), decimals))
}

/// Largest decimal count considered when trimming float noise.
const MAX_DECIMALS: i32 = 15;

// Beyond 2^53 every f64 is already an integer.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Number of decimals needed to write `value` exactly, up to 15.
#[must_use]
pub fn decimal_places(value: f64) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    (0..MAX_DECIMALS)
        .find(|&decimals| {
            let scaled = value * 10f64.powi(decimals);
            (scaled - scaled.round()).abs() <= 1e-9 * scaled.abs().max(1.0)
        })
        .unwrap_or(MAX_DECIMALS)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    if scaled.abs() < EXACT_INTEGER_LIMIT {
        scaled.round() / factor
    } else {
        value
    }
}

// `f64::clamp` panics when `min > max`; unvalidated input can get here.
fn clamp(min: f64, max: f64, value: f64) -> f64 {
    value.max(min).min(max)
}

/// Map `value` to a percentage of the `[min, max]` track.
///
/// Callers must guard `min == max`; the result is not finite there.
#[must_use]
pub fn relative_position(min: f64, max: f64, value: f64) -> f64 {
    (value - min) / (max - min) * 100.0
}

/// Right-pad `list` with `fill` until it holds `target_len` items.
///
/// Lists that are already long enough are returned unchanged.
#[must_use]
pub fn fill_array_with<T: Clone>(target_len: usize, fill: T, mut list: Vec<T>) -> Vec<T> {
    if list.len() < target_len {
        list.resize(target_len, fill);
    }
    list
}

/// True when every adjacent pair satisfies `order`.
pub fn is_sorted_by<T>(list: &[T], order: impl Fn(&T, &T) -> bool) -> bool {
    list.windows(2).all(|pair| order(&pair[0], &pair[1]))
}
