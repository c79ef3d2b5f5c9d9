//! Back-face culling.
//!
//! Two equivalent tests are available and the renderer applies exactly one of
//! them per frame, selected by [`CullMode`]:
//!
//! - [`CullMode::ScreenSpace`] computes the shoelace sum of the projected
//!   polygon, `area = Σ (x[i+1] - x[i]) * (y[i+1] + y[i])`. With the crate's
//!   clockwise-from-outside winding and y-down screen space, a face is front
//!   facing iff `area < 0`.
//! - [`CullMode::ObjectNormal`] rotates the precomputed object-space normal
//!   into view space and compares it with the ray from the eye to the face's
//!   first vertex. A face is front facing iff `n · v < 0`.
//!
//! Both tests agree for every face lying fully in front of the near plane:
//! perspective projection preserves a planar polygon's orientation for
//! positive depths. Edge-on faces (zero area, zero dot product) are culled by
//! both.

use serde::Deserialize;

use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;

/// Which back-face test the pipeline applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CullMode {
    /// Signed area of the projected polygon (shoelace formula).
    #[default]
    ScreenSpace,
    /// Sign of the view-space normal against the eye ray.
    ObjectNormal,
}

/// Shoelace sum `Σ (x[i+1] - x[i]) * (y[i+1] + y[i])` over a closed polygon.
///
/// This is twice the signed area with the sign flipped relative to the
/// standard counter-clockwise-positive convention in a y-up frame.
pub fn signed_area(points: &[Vec2]) -> f32 {
    if points.len() < 3 {
        return 0.0;
    }
    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(current, next)| (next.x - current.x) * (next.y + current.y))
        .sum()
}

/// Screen-space facing test on a projected polygon.
#[inline]
pub fn is_front_facing_screen(points: &[Vec2]) -> bool {
    signed_area(points) < 0.0
}

/// View-space facing test: `normal` is the face normal rotated into view
/// space, `vertex` any view-space vertex of the face.
#[inline]
pub fn is_front_facing_normal(normal: Vec3, vertex: Vec3) -> bool {
    normal.dot(vertex) < 0.0
}
