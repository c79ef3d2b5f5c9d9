//! Polyhedral meshes built from flat-colored polygonal faces.
//!
//! A [`Mesh`] owns an append-only list of object-space vertices and the
//! [`Face`]s that index into it. Vertices are never removed or reordered, so
//! an index handed out by a face stays valid for the lifetime of the mesh no
//! matter how many shapes are appended afterwards.
//!
//! Faces are created exclusively through [`Mesh::add_face`] (directly or via
//! the [`builder`] functions), which validates the indices and computes the
//! outward normal once.

pub mod builder;

pub use builder::{add_box, add_prism, add_pyramid, add_ramp, build_mesh, Shape};

use crate::error::BuildError;
use crate::math::vec3::Vec3;

/// Index of a face within its owning mesh.
pub type FaceId = usize;

/// A planar convex polygon referencing vertices of its owning mesh.
///
/// The indices are wound clockwise when the face is seen from outside the
/// solid. `normal` is the unit object-space normal computed from the first
/// three vertices at build time and points outward.
#[derive(Clone, Debug, PartialEq)]
pub struct Face {
    indices: Vec<u32>,
    color: u32,
    normal: Vec3,
}

impl Face {
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn color(&self) -> u32 {
        self.color
    }

    /// Unit outward normal in object space.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn vertex_count(&self) -> usize {
        self.indices.len()
    }
}

/// A mesh instance: local geometry plus a world position and yaw.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    position: Vec3,
    yaw: f32,
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
}

impl Mesh {
    /// Creates an empty mesh placed at `position` and rotated by `yaw` radians.
    pub fn new(position: Vec3, yaw: f32) -> Self {
        Self {
            position,
            yaw,
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    // ============ Pose ============

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) -> &mut Self {
        self.position = position;
        self
    }

    pub fn translate(&mut self, delta: Vec3) -> &mut Self {
        self.position = self.position + delta;
        self
    }

    /// Rotation about the vertical axis, in radians.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn set_yaw(&mut self, yaw: f32) -> &mut Self {
        self.yaw = yaw;
        self
    }

    pub fn rotate_yaw(&mut self, delta: f32) -> &mut Self {
        self.yaw = (self.yaw + delta).rem_euclid(std::f32::consts::TAU);
        self
    }

    // ============ Geometry ============

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn face(&self, id: FaceId) -> Option<&Face> {
        self.faces.get(id)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Appends a vertex and returns its index.
    pub fn push_vertex(&mut self, vertex: Vec3) -> Result<u32, BuildError> {
        let index =
            u32::try_from(self.vertices.len()).map_err(|_| BuildError::TooManyVertices)?;
        self.vertices.push(vertex);
        Ok(index)
    }

    /// Appends a face over existing vertices.
    ///
    /// Rejects faces with fewer than three indices, indices outside the current
    /// vertex range, repeated indices, and faces whose first three vertices are
    /// collinear (no normal can be derived). On error the mesh is unchanged.
    pub fn add_face(&mut self, indices: &[u32], color: u32) -> Result<FaceId, BuildError> {
        if indices.len() < 3 {
            return Err(BuildError::TooFewIndices(indices.len()));
        }
        for (i, &index) in indices.iter().enumerate() {
            if index as usize >= self.vertices.len() {
                return Err(BuildError::IndexOutOfRange {
                    index,
                    vertex_count: self.vertices.len(),
                });
            }
            if indices[..i].contains(&index) {
                return Err(BuildError::DuplicateIndex(index));
            }
        }

        let a = self.vertices[indices[0] as usize];
        let b = self.vertices[indices[1] as usize];
        let c = self.vertices[indices[2] as usize];
        let (ab, ac) = (b - a, c - a);
        let cross = ab.cross(ac);
        // Relative test so that small but valid shapes are not rejected.
        if cross.magnitude() <= ab.magnitude() * ac.magnitude() * 1e-6 {
            return Err(BuildError::DegenerateFace);
        }
        let normal = cross.try_normalize().ok_or(BuildError::DegenerateFace)?;

        self.faces.push(Face {
            indices: indices.to_vec(),
            color,
            normal,
        });
        Ok(self.faces.len() - 1)
    }

    /// Drops faces and vertices appended after the given counts.
    ///
    /// Only used to undo a shape build that failed halfway; nothing outside
    /// that build can reference the removed elements.
    pub(crate) fn rollback(&mut self, vertex_count: usize, face_count: usize) {
        debug_assert!(vertex_count <= self.vertices.len() && face_count <= self.faces.len());
        self.faces.truncate(face_count);
        self.vertices.truncate(vertex_count);
    }

    /// Returns true if every index of `face` resolves within this mesh.
    pub fn resolves(&self, face: &Face) -> bool {
        face.indices
            .iter()
            .all(|&index| (index as usize) < self.vertices.len())
    }

    /// Average of all vertices in object space.
    pub fn centroid(&self) -> Vec3 {
        if self.vertices.is_empty() {
            return Vec3::ZERO;
        }
        let sum = self
            .vertices
            .iter()
            .fold(Vec3::ZERO, |acc, &vertex| acc + vertex);
        sum / self.vertices.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors;
    use approx::assert_relative_eq;

    fn triangle_mesh() -> Mesh {
        let mut mesh = Mesh::default();
        for vertex in [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(2.0, 2.0, 0.0),
        ] {
            mesh.push_vertex(vertex).unwrap();
        }
        mesh
    }

    #[test]
    fn add_face_computes_unit_normal_from_first_three_vertices() {
        let mut mesh = triangle_mesh();
        let id = mesh.add_face(&[0, 1, 2], colors::STONE).unwrap();
        let normal = mesh.face(id).unwrap().normal();
        assert_relative_eq!(normal.z, -1.0, epsilon = 1e-6);
        assert_relative_eq!(normal.magnitude(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn add_face_rejects_bad_indices() {
        let mut mesh = triangle_mesh();
        assert_eq!(
            mesh.add_face(&[0, 1], colors::STONE),
            Err(BuildError::TooFewIndices(2))
        );
        assert_eq!(
            mesh.add_face(&[0, 1, 9], colors::STONE),
            Err(BuildError::IndexOutOfRange {
                index: 9,
                vertex_count: 4
            })
        );
        assert_eq!(
            mesh.add_face(&[0, 1, 0], colors::STONE),
            Err(BuildError::DuplicateIndex(0))
        );
        assert_eq!(mesh.face_count(), 0);
    }

    #[test]
    fn add_face_rejects_collinear_vertices() {
        let mut mesh = triangle_mesh();
        // 0, 2 and 3 lie on the line y = x.
        assert_eq!(
            mesh.add_face(&[0, 2, 3], colors::STONE),
            Err(BuildError::DegenerateFace)
        );
    }

    #[test]
    fn rotate_yaw_wraps_into_one_turn() {
        let mut mesh = Mesh::default();
        mesh.rotate_yaw(std::f32::consts::TAU + 0.5);
        assert_relative_eq!(mesh.yaw(), 0.5, epsilon = 1e-5);
    }
}
