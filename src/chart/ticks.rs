/// Default upper bound on tick intervals per axis
pub const DEFAULT_MAX_TICKS: usize = 10;

const STEPS: [f64; 3] = [1.0, 2.0, 5.0];

/// Whole-number tick positions covering `[min, max]`
///
/// The step is the smallest value of the form `{1, 2, 5} * 10^n` (and at
/// least 1) for which the covering range needs no more than `max_ticks`
/// intervals. The first tick is at or below `min`, the last at or above `max`.
pub fn integer_ticks(min: f64, max: f64, max_ticks: usize) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    let (min, max) = if min <= max { (min, max) } else { (max, min) };
    if min == max {
        return vec![min.round()];
    }

    // A range straddling zero needs two intervals at any step size
    let max_ticks = max_ticks.max(2);
    let raw = (max - min) / max_ticks as f64;
    let mut magnitude = 10f64.powf(raw.log10().floor()).max(1.0);

    loop {
        for multiple in STEPS {
            let step = multiple * magnitude;
            let start = (min / step).floor();
            let end = (max / step).ceil();
            if end - start <= max_ticks as f64 {
                return (0..=(end - start) as usize)
                    .map(|i| (start + i as f64) * step)
                    .collect();
            }
        }
        magnitude *= 10.0;
    }
}
