//! Planar vector helpers.
//!
//! Agents walk on a surface projected onto the horizontal plane. World
//! positions are `(x, y, z)` with `y` up; planar points keep `(x, z)` as a
//! [`Vec2`]. Headings are yaw angles in degrees, clockwise when viewed from
//! above, with `0` facing planar `+y`.
use glam::{Vec2, Vec3};

/// Drops the vertical component of a world position.
///
/// # Examples
/// ```
/// use glam::{Vec2, Vec3};
/// use strider::vector_math::planar;
/// assert_eq!(planar(Vec3::new(1.0, 5.0, -2.0)), Vec2::new(1.0, -2.0));
/// ```
#[must_use]
pub const fn planar(world: Vec3) -> Vec2 {
    Vec2::new(world.x, world.z)
}

/// Distance between two planar points.
#[must_use]
pub fn planar_distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Expresses a planar vector in the frame of an agent facing `heading_degrees`.
///
/// The result holds the rightward component in `x` and the forward component
/// in `y`. Non-finite headings are treated as `0`.
///
/// # Examples
/// ```
/// use glam::Vec2;
/// use strider::vector_math::to_local;
/// // Facing +x, a world +x offset is straight ahead.
/// let local = to_local(Vec2::new(2.0, 0.0), 90.0);
/// assert!((local.x).abs() < 1e-5);
/// assert!((local.y - 2.0).abs() < 1e-5);
/// ```
#[must_use]
pub fn to_local(vector: Vec2, heading_degrees: f32) -> Vec2 {
    let heading = if heading_degrees.is_finite() {
        heading_degrees.to_radians()
    } else {
        0.0
    };
    let (sin, cos) = heading.sin_cos();
    let right = Vec2::new(cos, -sin);
    let forward = Vec2::new(sin, cos);
    Vec2::new(vector.dot(right), vector.dot(forward))
}

/// Unit vector pointing along `heading_degrees` in planar world space.
#[must_use]
pub fn heading_vector(heading_degrees: f32) -> Vec2 {
    let (sin, cos) = heading_degrees.to_radians().sin_cos();
    Vec2::new(sin, cos)
}

/// Brings an angle in degrees into `(-180, 180]`.
///
/// A single correction is applied in each direction, so inputs are expected
/// within `(-540, 540)`; `atan2` results with a fixed offset always are.
///
/// # Examples
/// ```
/// use strider::vector_math::wrap_degrees;
/// assert_eq!(wrap_degrees(270.0), -90.0);
/// assert_eq!(wrap_degrees(180.0), 180.0);
/// assert_eq!(wrap_degrees(-180.0), 180.0);
/// ```
#[must_use]
pub const fn wrap_degrees(angle: f32) -> f32 {
    let mut wrapped = angle;
    if wrapped >= 180.0 {
        wrapped -= 360.0;
    }
    if wrapped <= -180.0 {
        wrapped += 360.0;
    }
    wrapped
}
