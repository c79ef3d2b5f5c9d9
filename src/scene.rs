//! Persistent mesh instances keyed by entity id.
//!
//! Static props are inserted once and never touched again. Moving entities
//! keep their mesh and only have their pose updated each tick with
//! [`MeshPool::set_pose`]; [`MeshPool::rebuild`] replaces the geometry when
//! the shape itself changes.

use slotmap::{new_key_type, SlotMap};

use crate::error::BuildError;
use crate::math::vec3::Vec3;
use crate::mesh::Mesh;

new_key_type! {
    /// Stable handle to a mesh in a [`MeshPool`].
    pub struct EntityId;
}

/// Arena of mesh instances.
#[derive(Debug, Default)]
pub struct MeshPool {
    meshes: SlotMap<EntityId, Mesh>,
}

impl MeshPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, mesh: Mesh) -> EntityId {
        self.meshes.insert(mesh)
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Mesh> {
        self.meshes.remove(id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Mesh> {
        self.meshes.get(id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Mesh> {
        self.meshes.get_mut(id)
    }

    /// Moves and turns an instance without touching its geometry.
    ///
    /// Returns false if `id` is no longer in the pool.
    pub fn set_pose(&mut self, id: EntityId, position: Vec3, yaw: f32) -> bool {
        match self.meshes.get_mut(id) {
            Some(mesh) => {
                mesh.set_position(position).set_yaw(yaw);
                true
            }
            None => false,
        }
    }

    /// Replaces the geometry of an instance, keeping its pose.
    ///
    /// `build` receives an empty mesh at the current pose. If it fails, the
    /// previous geometry stays in place.
    pub fn rebuild<F>(&mut self, id: EntityId, build: F) -> Result<bool, BuildError>
    where
        F: FnOnce(&mut Mesh) -> Result<(), BuildError>,
    {
        let Some(mesh) = self.meshes.get_mut(id) else {
            return Ok(false);
        };
        let mut fresh = Mesh::new(mesh.position(), mesh.yaw());
        build(&mut fresh)?;
        *mesh = fresh;
        Ok(true)
    }

    /// Every mesh in the pool, in no particular order.
    pub fn meshes(&self) -> impl Iterator<Item = &Mesh> {
        self.meshes.values()
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}
