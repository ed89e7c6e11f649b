//! Numeric conversion helpers used across the project.
//!
//! These utilities guard conversions between floating-point and integer
//! domains so that densification and tick counting never wrap or truncate
//! silently.

/// Floor a distance-derived point count into `usize`.
///
/// Negative, NaN and infinite inputs yield `0`; values beyond `usize::MAX`
/// saturate.
///
/// # Examples
/// ```
/// use strider::numeric::floor_to_usize;
/// assert_eq!(floor_to_usize(12.99), 12);
/// assert_eq!(floor_to_usize(-3.0), 0);
/// assert_eq!(floor_to_usize(f32::NAN), 0);
/// ```
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "The value is floored and checked to be finite and non-negative."
)]
#[must_use]
pub fn floor_to_usize(value: f32) -> usize {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    // `as` saturates for floats above the integer range.
    value.floor() as usize
}

/// Round a positive tick estimate up to a whole `u32` tick count.
///
/// Non-finite or non-positive estimates yield `0`.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "The value is rounded up and checked to be finite and positive."
)]
#[must_use]
pub fn ceil_to_u32(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.ceil() as u32
}

/// Convert an index-sized count into `f32` for interpolation weights.
#[expect(
    clippy::cast_precision_loss,
    reason = "Path point counts stay far below 2^24."
)]
#[must_use]
pub const fn count_to_f32(count: usize) -> f32 {
    count as f32
}
