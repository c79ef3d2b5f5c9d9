//! Procedural shape generators.
//!
//! Each generator validates its dimensions, then appends the shape's vertices
//! and faces to an existing [`Mesh`]. All shapes are centered on `offset`
//! (including vertically) and emitted with the same winding convention:
//! clockwise when the face is seen from outside, so that the normal computed
//! from the first three vertices points outward.
//!
//! ```text
//!   box corner layout (object space, +Y up, +Z forward)
//!
//!        6 ________ 4
//!         /|       /|          0: (-,-,-)  4: (+,+,+)
//!      1 /_|_____2/ |          1: (-,+,-)  5: (+,-,+)
//!        | |7_____|_|5         2: (+,+,-)  6: (-,+,+)
//!        | /      | /          3: (+,-,-)  7: (-,-,+)
//!        |/_______|/
//!       0          3
//! ```
//!
//! Face order for boxes is front (-Z), right (+X), back (+Z), left (-X),
//! top (+Y), bottom (-Y).

use std::f32::consts::TAU;
use std::ops::Range;

use super::{FaceId, Mesh};
use crate::error::BuildError;
use crate::math::vec3::Vec3;

/// Upper bound on prism segments.
pub const MAX_PRISM_SEGMENTS: u32 = 4096;

/// Shape kind together with its dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Axis-aligned box: 8 vertices, 6 quads.
    Box { width: f32, height: f32, depth: f32 },
    /// Square-based pyramid: 5 vertices, 4 triangles plus a base quad.
    Pyramid { base_width: f32, height: f32 },
    /// Regular prism approximating a cylinder: `2 * segments` vertices,
    /// `segments` side quads and two polygonal caps.
    Prism {
        radius: f32,
        height: f32,
        segments: u32,
    },
    /// Wedge rising from the front (-Z) edge to the back (+Z) edge.
    Ramp { width: f32, height: f32, depth: f32 },
}

/// Appends `shape` at `offset` to `mesh` and returns the range of new faces.
pub fn build_mesh(
    mesh: &mut Mesh,
    shape: Shape,
    offset: Vec3,
    color: u32,
) -> Result<Range<FaceId>, BuildError> {
    match shape {
        Shape::Box {
            width,
            height,
            depth,
        } => add_box(mesh, width, height, depth, offset, color),
        Shape::Pyramid { base_width, height } => {
            add_pyramid(mesh, base_width, height, offset, color)
        }
        Shape::Prism {
            radius,
            height,
            segments,
        } => add_prism(mesh, radius, height, segments, offset, color),
        Shape::Ramp {
            width,
            height,
            depth,
        } => add_ramp(mesh, width, height, depth, offset, color),
    }
}

/// Appends an axis-aligned box centered on `offset`.
pub fn add_box(
    mesh: &mut Mesh,
    width: f32,
    height: f32,
    depth: f32,
    offset: Vec3,
    color: u32,
) -> Result<Range<FaceId>, BuildError> {
    positive("width", width)?;
    positive("height", height)?;
    positive("depth", depth)?;

    let (hx, hy, hz) = (width / 2.0, height / 2.0, depth / 2.0);
    let vertices = [
        Vec3::new(-hx, -hy, -hz),
        Vec3::new(-hx, hy, -hz),
        Vec3::new(hx, hy, -hz),
        Vec3::new(hx, -hy, -hz),
        Vec3::new(hx, hy, hz),
        Vec3::new(hx, -hy, hz),
        Vec3::new(-hx, hy, hz),
        Vec3::new(-hx, -hy, hz),
    ];
    let faces: [&[u32]; 6] = [
        &[0, 1, 2, 3], // front
        &[3, 2, 4, 5], // right
        &[5, 4, 6, 7], // back
        &[7, 6, 1, 0], // left
        &[1, 6, 4, 2], // top
        &[5, 7, 0, 3], // bottom
    ];
    append_shape(mesh, &vertices, &faces, offset, color)
}

/// Appends a square-based pyramid whose base and apex are `height` apart,
/// vertically centered on `offset`.
pub fn add_pyramid(
    mesh: &mut Mesh,
    base_width: f32,
    height: f32,
    offset: Vec3,
    color: u32,
) -> Result<Range<FaceId>, BuildError> {
    positive("base width", base_width)?;
    positive("height", height)?;

    let (hb, hy) = (base_width / 2.0, height / 2.0);
    let vertices = [
        Vec3::new(-hb, -hy, -hb),
        Vec3::new(hb, -hy, -hb),
        Vec3::new(hb, -hy, hb),
        Vec3::new(-hb, -hy, hb),
        Vec3::new(0.0, hy, 0.0),
    ];
    let faces: [&[u32]; 5] = [
        &[0, 4, 1],    // front
        &[1, 4, 2],    // right
        &[2, 4, 3],    // back
        &[3, 4, 0],    // left
        &[2, 3, 0, 1], // base
    ];
    append_shape(mesh, &vertices, &faces, offset, color)
}

/// Appends a regular `segments`-sided prism around the vertical axis.
///
/// The caps are single polygons rather than triangle fans: the depth sort
/// works per face, so splitting them would only add sort entries.
pub fn add_prism(
    mesh: &mut Mesh,
    radius: f32,
    height: f32,
    segments: u32,
    offset: Vec3,
    color: u32,
) -> Result<Range<FaceId>, BuildError> {
    positive("radius", radius)?;
    positive("height", height)?;
    if segments < 3 {
        return Err(BuildError::TooFewSegments(segments));
    }
    if segments > MAX_PRISM_SEGMENTS {
        return Err(BuildError::TooManySegments {
            segments,
            max: MAX_PRISM_SEGMENTS,
        });
    }

    let n = segments;
    let hy = height / 2.0;
    let ring = |y: f32| {
        (0..n).map(move |i| {
            let angle = TAU * i as f32 / n as f32;
            Vec3::new(radius * angle.cos(), y, radius * angle.sin())
        })
    };
    // Bottom ring is 0..n, top ring is n..2n, both in increasing angle.
    let vertices: Vec<Vec3> = ring(-hy).chain(ring(hy)).collect();

    let sides: Vec<[u32; 4]> = (0..n)
        .map(|i| {
            let j = (i + 1) % n;
            [i, n + i, n + j, j]
        })
        .collect();
    let top: Vec<u32> = (0..n).map(|k| n + (n - k) % n).collect();
    let bottom: Vec<u32> = (0..n).collect();

    let mut faces: Vec<&[u32]> = sides.iter().map(|side| side.as_slice()).collect();
    faces.push(&top);
    faces.push(&bottom);
    append_shape(mesh, &vertices, &faces, offset, color)
}

/// Appends a wedge: a sloped quad rising toward +Z and a vertical back quad,
/// closed by two triangular side walls and a bottom quad.
pub fn add_ramp(
    mesh: &mut Mesh,
    width: f32,
    height: f32,
    depth: f32,
    offset: Vec3,
    color: u32,
) -> Result<Range<FaceId>, BuildError> {
    positive("width", width)?;
    positive("height", height)?;
    positive("depth", depth)?;

    let (hx, hy, hz) = (width / 2.0, height / 2.0, depth / 2.0);
    let vertices = [
        Vec3::new(-hx, -hy, -hz),
        Vec3::new(hx, -hy, -hz),
        Vec3::new(hx, -hy, hz),
        Vec3::new(-hx, -hy, hz),
        Vec3::new(hx, hy, hz),
        Vec3::new(-hx, hy, hz),
    ];
    let faces: [&[u32]; 5] = [
        &[0, 5, 4, 1], // slope
        &[2, 4, 5, 3], // back
        &[1, 4, 2],    // right
        &[3, 5, 0],    // left
        &[2, 3, 0, 1], // bottom
    ];
    append_shape(mesh, &vertices, &faces, offset, color)
}

fn positive(name: &'static str, value: f32) -> Result<(), BuildError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(BuildError::NonPositiveDimension { name, value })
    }
}

/// Appends local vertices (shifted by `offset`) and faces given as indices
/// into `vertices`. Either the whole shape is appended or nothing is.
fn append_shape(
    mesh: &mut Mesh,
    vertices: &[Vec3],
    faces: &[&[u32]],
    offset: Vec3,
    color: u32,
) -> Result<Range<FaceId>, BuildError> {
    let vertex_count = mesh.vertex_count();
    let face_count = mesh.face_count();
    // Every new index must fit in u32 before anything is appended.
    let base = u32::try_from(vertex_count)
        .ok()
        .filter(|base| base.checked_add(vertices.len() as u32).is_some())
        .ok_or(BuildError::TooManyVertices)?;

    for &vertex in vertices {
        mesh.push_vertex(vertex + offset)?;
    }

    let mut indices = Vec::new();
    for face in faces {
        indices.clear();
        indices.extend(face.iter().map(|&index| base + index));
        if let Err(err) = mesh.add_face(&indices, color) {
            mesh.rollback(vertex_count, face_count);
            return Err(err);
        }
    }

    Ok(face_count..mesh.face_count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors;
    use approx::assert_relative_eq;

    fn assert_normals_point_outward(mesh: &Mesh) {
        let centroid = mesh.centroid();
        for face in mesh.faces() {
            let face_center = face
                .indices()
                .iter()
                .fold(Vec3::ZERO, |acc, &i| acc + mesh.vertices()[i as usize])
                / face.vertex_count() as f32;
            assert!(
                face.normal().dot(face_center - centroid) > 0.0,
                "face {:?} has an inward normal",
                face.indices()
            );
        }
    }

    #[test]
    fn box_emits_eight_vertices_and_six_quads() {
        let mut mesh = Mesh::default();
        let faces = add_box(&mut mesh, 2.0, 4.0, 6.0, Vec3::ZERO, colors::STONE).unwrap();
        assert_eq!(faces, 0..6);
        assert_eq!(mesh.vertex_count(), 8);
        assert!(mesh.faces().iter().all(|f| f.vertex_count() == 4));
        assert_normals_point_outward(&mesh);
    }

    #[test]
    fn box_faces_follow_documented_order() {
        let mut mesh = Mesh::default();
        add_box(&mut mesh, 1.0, 1.0, 1.0, Vec3::ZERO, colors::STONE).unwrap();
        let expected = [
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
        ];
        for (face, normal) in mesh.faces().iter().zip(expected) {
            assert_relative_eq!(face.normal().dot(normal), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn box_is_centered_on_offset() {
        let mut mesh = Mesh::default();
        let offset = Vec3::new(10.0, -3.0, 7.0);
        add_box(&mut mesh, 2.0, 2.0, 2.0, offset, colors::STONE).unwrap();
        let centroid = mesh.centroid();
        assert_relative_eq!(centroid.x, offset.x, epsilon = 1e-5);
        assert_relative_eq!(centroid.y, offset.y, epsilon = 1e-5);
        assert_relative_eq!(centroid.z, offset.z, epsilon = 1e-5);
    }

    #[test]
    fn pyramid_has_apex_and_outward_faces() {
        let mut mesh = Mesh::default();
        let faces = add_pyramid(&mut mesh, 4.0, 3.0, Vec3::ZERO, colors::SAND).unwrap();
        assert_eq!(faces.len(), 5);
        assert_eq!(mesh.vertex_count(), 5);
        assert_relative_eq!(mesh.vertices()[4].y, 1.5);
        assert_normals_point_outward(&mesh);
    }

    #[test]
    fn prism_has_rings_sides_and_caps() {
        for segments in [3, 5, 8, 16] {
            let mut mesh = Mesh::default();
            let faces =
                add_prism(&mut mesh, 2.0, 5.0, segments, Vec3::ZERO, colors::TEAL).unwrap();
            assert_eq!(mesh.vertex_count(), 2 * segments as usize);
            assert_eq!(faces.len(), segments as usize + 2);
            let top = mesh.face(segments as usize).unwrap();
            let bottom = mesh.face(segments as usize + 1).unwrap();
            assert_eq!(top.vertex_count(), segments as usize);
            assert_relative_eq!(top.normal().y, 1.0, epsilon = 1e-5);
            assert_relative_eq!(bottom.normal().y, -1.0, epsilon = 1e-5);
            assert_normals_point_outward(&mesh);
        }
    }

    #[test]
    fn ramp_has_slope_and_vertical_back() {
        let mut mesh = Mesh::default();
        add_ramp(&mut mesh, 2.0, 1.0, 4.0, Vec3::ZERO, colors::WOOD).unwrap();
        assert_eq!(mesh.vertex_count(), 6);
        let slope = mesh.face(0).unwrap().normal();
        assert!(slope.y > 0.0 && slope.z < 0.0);
        let back = mesh.face(1).unwrap().normal();
        assert_relative_eq!(back.z, 1.0, epsilon = 1e-6);
        assert_normals_point_outward(&mesh);
    }

    #[test]
    fn degenerate_dimensions_are_rejected_without_side_effects() {
        let mut mesh = Mesh::default();
        add_box(&mut mesh, 1.0, 1.0, 1.0, Vec3::ZERO, colors::STONE).unwrap();

        let bad = [
            Shape::Box {
                width: 0.0,
                height: 1.0,
                depth: 1.0,
            },
            Shape::Box {
                width: 1.0,
                height: -2.0,
                depth: 1.0,
            },
            Shape::Pyramid {
                base_width: 1.0,
                height: f32::NAN,
            },
            Shape::Prism {
                radius: 1.0,
                height: 1.0,
                segments: 2,
            },
            Shape::Ramp {
                width: 1.0,
                height: 1.0,
                depth: 0.0,
            },
        ];
        for shape in bad {
            assert!(build_mesh(&mut mesh, shape, Vec3::ZERO, colors::STONE).is_err());
        }
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.face_count(), 6);
    }

    #[test]
    fn too_few_segments_reports_count() {
        let mut mesh = Mesh::default();
        assert_eq!(
            add_prism(&mut mesh, 1.0, 1.0, 2, Vec3::ZERO, colors::TEAL),
            Err(BuildError::TooFewSegments(2))
        );
    }

    #[test]
    fn oversized_prism_is_rejected_before_allocating() {
        let mut mesh = Mesh::default();
        add_prism(&mut mesh, 1.0, 1.0, 12, Vec3::ZERO, colors::TEAL).unwrap();
        let vertex_count = mesh.vertex_count();

        for segments in [MAX_PRISM_SEGMENTS + 1, u32::MAX / 2 + 1, u32::MAX] {
            assert_eq!(
                add_prism(&mut mesh, 1.0, 1.0, segments, Vec3::ZERO, colors::TEAL),
                Err(BuildError::TooManySegments {
                    segments,
                    max: MAX_PRISM_SEGMENTS
                })
            );
        }
        assert_eq!(mesh.vertex_count(), vertex_count);
    }

    #[test]
    fn earlier_faces_stay_valid_after_more_builds() {
        let mut mesh = Mesh::default();
        let first = add_box(&mut mesh, 1.0, 1.0, 1.0, Vec3::ZERO, colors::STONE).unwrap();
        let retained: Vec<_> = first
            .clone()
            .map(|id| mesh.face(id).unwrap().clone())
            .collect();

        let offsets = (1..20).map(|i| Vec3::new(i as f32 * 3.0, 0.0, 0.0));
        for (i, offset) in offsets.enumerate() {
            let shape = match i % 4 {
                0 => Shape::Box {
                    width: 1.0,
                    height: 2.0,
                    depth: 1.0,
                },
                1 => Shape::Pyramid {
                    base_width: 1.0,
                    height: 1.0,
                },
                2 => Shape::Prism {
                    radius: 1.0,
                    height: 1.0,
                    segments: 6,
                },
                _ => Shape::Ramp {
                    width: 1.0,
                    height: 1.0,
                    depth: 2.0,
                },
            };
            build_mesh(&mut mesh, shape, offset, colors::BRICK).unwrap();
            // Also interleave a rejected build.
            let _ = add_prism(&mut mesh, 1.0, 1.0, 1, offset, colors::BRICK);
        }

        for (id, face) in first.zip(&retained) {
            assert_eq!(mesh.face(id), Some(face));
            assert!(mesh.resolves(face));
            assert!(face
                .indices()
                .iter()
                .all(|&i| (i as usize) < mesh.vertex_count()));
        }
        assert!(mesh.faces().iter().all(|face| mesh.resolves(face)));
    }
}
