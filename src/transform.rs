//! Object-to-screen transform pipeline.
//!
//! Every vertex of a face goes through the same fixed chain:
//!
//! ```text
//! local --rotate_y(mesh yaw)--> + mesh position --> - camera position
//!       --rotate_y(-camera yaw)--> rotate_x(camera pitch) --> view space
//! ```
//!
//! followed by the near-plane test and the perspective divide. The sines and
//! cosines are computed once per mesh ([`ModelTransform`]) and once per frame
//! ([`ViewTransform`]), never per vertex.
//!
//! A face is all-or-nothing: if any of its vertices is at or behind the near
//! clip the whole face is rejected for the frame. Faces straddling the camera
//! plane therefore disappear instead of being clipped.

use crate::camera::Camera;
use crate::context::FrameStats;
use crate::culling::{self, CullMode};
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::mesh::{Face, Mesh};
use crate::projection::Projection;
use crate::render::RenderItem;
use crate::shading::Shader;

/// Object space to world space for one mesh: yaw about +Y, then translation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelTransform {
    sin_yaw: f32,
    cos_yaw: f32,
    position: Vec3,
}

impl ModelTransform {
    pub fn new(position: Vec3, yaw: f32) -> Self {
        let (sin_yaw, cos_yaw) = yaw.sin_cos();
        Self {
            sin_yaw,
            cos_yaw,
            position,
        }
    }

    pub fn from_mesh(mesh: &Mesh) -> Self {
        Self::new(mesh.position(), mesh.yaw())
    }

    /// Transforms an object-space point to world space.
    #[inline]
    pub fn apply(&self, local: Vec3) -> Vec3 {
        self.rotate(local) + self.position
    }

    /// Rotates an object-space direction into world space.
    #[inline]
    pub fn rotate(&self, direction: Vec3) -> Vec3 {
        direction.rotated_y(self.sin_yaw, self.cos_yaw)
    }
}

/// World space to camera-aligned view space.
///
/// In view space the eye sits at the origin looking along +Z, with +X to the
/// right and +Y up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    position: Vec3,
    sin_yaw: f32,
    cos_yaw: f32,
    sin_pitch: f32,
    cos_pitch: f32,
}

impl ViewTransform {
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        let (sin_yaw, cos_yaw) = yaw.sin_cos();
        let (sin_pitch, cos_pitch) = pitch.sin_cos();
        Self {
            position,
            sin_yaw,
            cos_yaw,
            sin_pitch,
            cos_pitch,
        }
    }

    pub fn from_camera(camera: &Camera) -> Self {
        Self::new(camera.position(), camera.yaw(), camera.pitch())
    }

    /// Transforms a world-space point to view space.
    #[inline]
    pub fn apply(&self, world: Vec3) -> Vec3 {
        self.rotate(world - self.position)
    }

    /// Rotates a world-space direction into view space.
    #[inline]
    pub fn rotate(&self, direction: Vec3) -> Vec3 {
        // Undo the yaw first, then the pitch.
        direction
            .rotated_y(-self.sin_yaw, self.cos_yaw)
            .rotated_x(self.sin_pitch, self.cos_pitch)
    }
}

/// Why a face produced no render item this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// A vertex lies at or behind the near clip.
    NearPlane,
    /// The face points away from the camera.
    BackFace,
    /// The face references a vertex its mesh does not have.
    BadIndex,
}

/// A face that survived the near-plane and facing tests.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectedFace {
    pub points: Vec<Vec2>,
    /// Mean view-space depth.
    pub depth: f32,
    pub world_normal: Vec3,
}

/// Per-frame state shared by every mesh: camera, lens, culling and shading.
#[derive(Clone, Copy, Debug)]
pub struct Pipeline {
    view: ViewTransform,
    projection: Projection,
    cull: CullMode,
    shader: Shader,
    background: u32,
    outline: u32,
}

impl Pipeline {
    pub fn new(
        camera: &Camera,
        projection: Projection,
        cull: CullMode,
        shader: Shader,
        background: u32,
        outline: u32,
    ) -> Self {
        Self {
            view: ViewTransform::from_camera(camera),
            projection,
            cull,
            shader,
            background,
            outline,
        }
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Runs one face through transform, near-plane test, culling and projection.
    pub fn project_face(
        &self,
        mesh: &Mesh,
        model: &ModelTransform,
        face: &Face,
    ) -> Result<ProjectedFace, Rejection> {
        // Faces only come from `Mesh::add_face` over an append-only vertex
        // list, so a dangling index is a bug in the crate itself.
        debug_assert!(
            mesh.resolves(face),
            "face {:?} references a vertex outside its mesh",
            face.indices()
        );
        if !mesh.resolves(face) {
            log::error!(
                "skipping face {:?}: mesh has only {} vertices",
                face.indices(),
                mesh.vertex_count()
            );
            return Err(Rejection::BadIndex);
        }

        let vertices = mesh.vertices();
        let mut view_vertices = Vec::with_capacity(face.vertex_count());
        let mut depth_sum = 0.0;
        for &index in face.indices() {
            let view = self.view.apply(model.apply(vertices[index as usize]));
            if !self.projection.in_front(view.z) {
                return Err(Rejection::NearPlane);
            }
            depth_sum += view.z;
            view_vertices.push(view);
        }

        let world_normal = model.rotate(face.normal());
        if self.cull == CullMode::ObjectNormal {
            let view_normal = self.view.rotate(world_normal);
            if !culling::is_front_facing_normal(view_normal, view_vertices[0]) {
                return Err(Rejection::BackFace);
            }
        }

        let points = view_vertices
            .iter()
            .map(|&v| self.projection.project(v).ok_or(Rejection::NearPlane))
            .collect::<Result<Vec<_>, _>>()?;

        if self.cull == CullMode::ScreenSpace && !culling::is_front_facing_screen(&points) {
            return Err(Rejection::BackFace);
        }

        Ok(ProjectedFace {
            points,
            depth: depth_sum / view_vertices.len() as f32,
            world_normal,
        })
    }

    /// Appends one render item per visible face of `mesh`.
    pub fn collect_mesh(&self, mesh: &Mesh, items: &mut Vec<RenderItem>, stats: &mut FrameStats) {
        let model = ModelTransform::from_mesh(mesh);
        stats.meshes += 1;

        for face in mesh.faces() {
            stats.faces += 1;
            match self.project_face(mesh, &model, face) {
                Ok(projected) => items.push(self.resolve(face, projected)),
                Err(Rejection::NearPlane) => stats.near_rejected += 1,
                Err(Rejection::BackFace) => stats.back_culled += 1,
                Err(Rejection::BadIndex) => stats.index_faults += 1,
            }
        }
    }

    fn resolve(&self, face: &Face, projected: ProjectedFace) -> RenderItem {
        let depth = projected.depth;
        RenderItem {
            color: self
                .shader
                .shade(face.color(), projected.world_normal, depth, self.background),
            outline: self.shader.fog.apply(self.outline, depth, self.background),
            points: projected.points,
            depth,
        }
    }
}
