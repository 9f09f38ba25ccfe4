//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Map a value from one range into another.
///
/// The source range must not be empty (`source_range.0 != source_range.1`).
pub fn lin_map<T>(source_range: (T, T), target_range: (T, T), value: T) -> T
where
    T: Float,
{
    target_range.0
        + ((value - source_range.0) * (target_range.1 - target_range.0)
            / (source_range.1 - source_range.0))
}

/// Clamp a value into the inclusive range `[min, max]`.
pub fn clamp<T>(value: T, min: T, max: T) -> T
where
    T: Float,
{
    let mut ret = value;

    if ret > max {
        ret = max
    }
    if ret < min {
        ret = min
    }

    ret
}

/// Round a value to the given number of decimal places.
///
/// Negative zero results are returned as positive zero so that rounded
/// values print consistently.
pub fn round_dp<T>(value: T, decimals: i32) -> T
where
    T: Float,
{
    let factor = T::from(10).unwrap_or_else(T::one).powi(decimals);

    (value * factor).round() / factor + T::zero()
}
