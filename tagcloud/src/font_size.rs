//! Weight to font-size interpolation.

/// Maps `count` linearly from `[min, max]` onto `[min_size, max_size]`,
/// rounded to whole pixels.
///
/// Callers guarantee `min <= max` and `min_size <= max_size`. When every
/// weight is equal (`min == max`) all tags get `min_size`.
pub fn font_size(count: f64, min: f64, max: f64, min_size: u32, max_size: u32) -> u32 {
    let span = max - min;
    if span == 0.0 {
        return min_size;
    }

    let size_span = f64::from(max_size) - f64::from(min_size);
    let size = (count - min) * size_span / span + f64::from(min_size);
    size.round().clamp(f64::from(min_size), f64::from(max_size)) as u32
}
