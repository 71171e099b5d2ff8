//! Angle utilities.
//!
//! All angles are in radians, counter-clockwise positive.

use std::f32::consts::{PI, TAU};

/// Normalize angle to (-π, π].
///
/// `+π` is kept as `+π` and `-π` maps to `+π`, so a half-turn always has a
/// single representation.
///
/// # Example
/// ```
/// use marga::core::normalize_angle;
/// use std::f32::consts::PI;
///
/// assert!((normalize_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-5);
/// assert_eq!(normalize_angle(-PI), PI);
/// ```
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let a = PI - (PI - angle).rem_euclid(TAU);
    // rem_euclid may round up to TAU for tiny negative inputs
    if a <= -PI { a + TAU } else { a }
}

/// Signed shortest angular difference from `from` to `to`, in (-π, π].
///
/// Positive result means counter-clockwise rotation from `from` to `to`.
///
/// # Example
/// ```
/// use marga::core::angle_diff;
/// use std::f32::consts::PI;
///
/// // Crossing the -π/π boundary takes the short way round
/// let diff = angle_diff(-0.9 * PI, 0.9 * PI);
/// assert!((diff + 0.2 * PI).abs() < 1e-5);
/// ```
#[inline]
pub fn angle_diff(from: f32, to: f32) -> f32 {
    normalize_angle(to - from)
}
