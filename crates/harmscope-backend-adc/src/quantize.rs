//! ADC step rounding.

/// Rounds `value` to the nearest whole multiple of `step`.
///
/// A step of zero means no quantization and returns `value` unchanged.
pub fn quantize(value: f64, step: f64) -> f64 {
    if step == 0.0 {
        return value;
    }
    (value / step).round() * step
}
