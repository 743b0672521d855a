//! Boundary to the host that owns assets and the scene.
//!
//! The layout engine never touches meshes or scene objects directly. It asks an
//! [`AssetResolver`] for bounding data by logical name and asks a [`World`] to spawn,
//! label and scale objects. [`memory`] provides in-process implementations used by
//! tests, benches and demos.
use std::sync::Arc;

use glam::{Vec2, Vec3};

use crate::error::Result;
use crate::geometry::footprint_size;

pub mod memory;

pub use memory::{MemoryWorld, SpawnedObject, StaticAssets};

/// Opaque reference to a resolved mesh with its bounding data.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshHandle {
    /// Logical asset name the mesh was resolved from.
    pub name: Arc<str>,
    /// Bounding box origin relative to the mesh pivot.
    pub origin: Vec3,
    /// Bounding box half-extent.
    pub box_extent: Vec3,
}

impl MeshHandle {
    pub fn new(name: impl Into<Arc<str>>, origin: Vec3, box_extent: Vec3) -> Self {
        Self {
            name: name.into(),
            origin,
            box_extent,
        }
    }

    /// Mesh with its bounds centered on the pivot.
    pub fn centered(name: impl Into<Arc<str>>, box_extent: Vec3) -> Self {
        Self::new(name, Vec3::ZERO, box_extent)
    }

    /// Planar footprint size under `scale`.
    pub fn footprint_size(&self, scale: Vec3) -> Vec2 {
        footprint_size(self.box_extent, scale)
    }
}

/// Identifier of an object spawned by the host world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectHandle(pub u64);

/// Resolves logical asset names to mesh bounding data.
pub trait AssetResolver {
    /// Returns `None` when the name cannot be resolved; callers skip the object.
    fn resolve(&self, name: &str) -> Option<MeshHandle>;
}

/// Scene that receives spawned objects.
///
/// `Ok(None)` from [`World::spawn`] is an expected refusal and counts as a failed
/// attempt. `Err` is a host fault and aborts the run.
pub trait World {
    fn spawn(
        &mut self,
        mesh: &MeshHandle,
        position: Vec3,
        yaw_degrees: f32,
    ) -> Result<Option<ObjectHandle>>;

    fn set_label(&mut self, handle: ObjectHandle, label: &str) -> Result<()>;

    fn set_scale(&mut self, handle: ObjectHandle, scale: Vec3) -> Result<()>;
}

impl<T: AssetResolver + ?Sized> AssetResolver for &T {
    fn resolve(&self, name: &str) -> Option<MeshHandle> {
        (**self).resolve(name)
    }
}

impl<T: World + ?Sized> World for &mut T {
    fn spawn(
        &mut self,
        mesh: &MeshHandle,
        position: Vec3,
        yaw_degrees: f32,
    ) -> Result<Option<ObjectHandle>> {
        (**self).spawn(mesh, position, yaw_degrees)
    }

    fn set_label(&mut self, handle: ObjectHandle, label: &str) -> Result<()> {
        (**self).set_label(handle, label)
    }

    fn set_scale(&mut self, handle: ObjectHandle, scale: Vec3) -> Result<()> {
        (**self).set_scale(handle, scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_footprint_uses_planar_extent() {
        let mesh = MeshHandle::centered("Well", Vec3::new(60.0, 40.0, 120.0));
        assert_eq!(mesh.footprint_size(Vec3::ONE), Vec2::new(60.0, 40.0));
        assert_eq!(
            mesh.footprint_size(Vec3::splat(0.5)),
            Vec2::new(30.0, 20.0)
        );
        assert_eq!(&*mesh.name, "Well");
    }
}
