//! Corner-path densification and midpoint smoothing.
//!
//! A navigation query yields a handful of corner points. Steering needs a
//! dense sequence it can walk index by index, where the index approximates
//! distance travelled. [`densify`] inserts one point per `1 / points_per_unit`
//! of segment length; [`smooth`] then cuts the corners by replacing each
//! interior point with the midpoint of its neighbours `window` points behind
//! and ahead.
//!
//! Both neighbours are always read from the unsmoothed densification, so the
//! result does not depend on iteration order and a single sharp corner turns
//! into two half-angle bends. Endpoints within `window` of either end keep
//! their raw interpolated positions.

use glam::Vec2;

use crate::numeric::{count_to_f32, floor_to_usize};
use crate::POINTS_PER_UNIT;

/// Linearly interpolates `points_per_unit` points per unit of length along
/// each corner segment.
///
/// Each segment contributes `floor(length * points_per_unit)` points starting
/// at its first corner; the final corner itself is not emitted. Fewer than
/// two corners produce an empty sequence.
///
/// # Examples
/// ```
/// use glam::Vec2;
/// use strider::path_smoothing::densify;
/// let points = densify(&[Vec2::ZERO, Vec2::new(0.0, 0.05)], 100.0);
/// assert_eq!(points.len(), 5);
/// assert_eq!(points[0], Vec2::ZERO);
/// ```
#[must_use]
pub fn densify(corners: &[Vec2], points_per_unit: f32) -> Vec<Vec2> {
    let capacity = corners
        .windows(2)
        .map(|pair| segment_point_count(pair, points_per_unit))
        .sum();
    let mut points = Vec::with_capacity(capacity);

    for pair in corners.windows(2) {
        let [start, end] = pair else { continue };
        let count = segment_point_count(pair, points_per_unit);
        let steps = count_to_f32(count);
        points.extend((0..count).map(|j| start.lerp(*end, count_to_f32(j) / steps)));
    }
    points
}

fn segment_point_count(pair: &[Vec2], points_per_unit: f32) -> usize {
    match pair {
        [start, end] => floor_to_usize(start.distance(*end) * points_per_unit),
        _ => 0,
    }
}

/// Densifies `corners` at the default resolution and smooths the result with
/// a midpoint kernel of half-width `window`.
///
/// The output length equals the sum of `floor(segment_length * 100)` over all
/// segments regardless of `window`. A `window` of zero leaves the densified
/// path untouched.
#[must_use]
pub fn smooth(corners: &[Vec2], window: usize) -> Vec<Vec2> {
    smooth_with_resolution(corners, window, POINTS_PER_UNIT)
}

/// [`smooth`] with an explicit densification resolution.
#[must_use]
pub fn smooth_with_resolution(corners: &[Vec2], window: usize, points_per_unit: f32) -> Vec<Vec2> {
    let mut points = densify(corners, points_per_unit);
    smooth_in_place(&mut points, window);
    points
}

/// Applies the midpoint kernel to an already dense path.
///
/// Paths shorter than `2 * window + 1` points have no interior and are left
/// as they are.
pub fn smooth_in_place(points: &mut [Vec2], window: usize) {
    if window == 0 {
        return;
    }
    let raw = points.to_vec();
    let interior = points
        .iter_mut()
        .enumerate()
        .skip(window)
        .take(raw.len().saturating_sub(2 * window));
    for (i, point) in interior {
        if let (Some(behind), Some(ahead)) = (raw.get(i - window), raw.get(i + window)) {
            *point = (*behind + *ahead) * 0.5;
        }
    }
}

/// Total polyline length of a point sequence.
#[must_use]
pub fn path_length(points: &[Vec2]) -> f32 {
    points
        .windows(2)
        .map(|pair| match pair {
            [a, b] => a.distance(*b),
            _ => 0.0,
        })
        .sum()
}

/// Sum of absolute heading changes, in radians, between consecutive
/// segments. Zero-length segments are skipped.
///
/// Lower values mean a gentler path; a straight line scores zero.
#[must_use]
pub fn total_turning(points: &[Vec2]) -> f32 {
    segment_bends(points).map(f32::abs).sum()
}

/// Signed heading change, in radians, at every joint between non-degenerate
/// segments.
pub fn segment_bends(points: &[Vec2]) -> impl Iterator<Item = f32> + '_ {
    let mut previous: Option<Vec2> = None;
    points.windows(2).filter_map(move |pair| {
        let [a, b] = pair else { return None };
        let segment = *b - *a;
        if segment.length_squared() <= 0.0 {
            return None;
        }
        // atan2 of cross and dot stays exact for parallel segments.
        let bend = previous.map(|prev| prev.perp_dot(segment).atan2(prev.dot(segment)));
        previous = Some(segment);
        bend
    })
}
