//! In-memory host implementations.
use std::collections::HashMap;

use glam::Vec3;

use crate::error::{Error, Result};
use crate::host::{AssetResolver, MeshHandle, ObjectHandle, World};

/// Asset table keyed by logical name.
#[derive(Debug, Clone, Default)]
pub struct StaticAssets {
    meshes: HashMap<String, MeshHandle>,
}

impl StaticAssets {
    pub fn new() -> Self {
        Self {
            meshes: HashMap::new(),
        }
    }

    /// Register a mesh centered on its pivot with the given half-extent (builder-style).
    pub fn with_mesh(mut self, name: &str, box_extent: Vec3) -> Self {
        self.insert(MeshHandle::centered(name, box_extent));
        self
    }

    pub fn insert(&mut self, mesh: MeshHandle) {
        self.meshes.insert(mesh.name.to_string(), mesh);
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

impl AssetResolver for StaticAssets {
    fn resolve(&self, name: &str) -> Option<MeshHandle> {
        self.meshes.get(name).cloned()
    }
}

/// An object held by [`MemoryWorld`].
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnedObject {
    pub handle: ObjectHandle,
    pub mesh: MeshHandle,
    pub position: Vec3,
    pub yaw_degrees: f32,
    pub scale: Vec3,
    pub label: Option<String>,
}

/// Scene that records spawned objects in a `Vec`.
#[derive(Debug, Default)]
pub struct MemoryWorld {
    objects: Vec<SpawnedObject>,
    next_id: u64,
    spawn_limit: Option<usize>,
}

impl MemoryWorld {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            next_id: 1,
            spawn_limit: None,
        }
    }

    /// Refuse spawns once `limit` objects exist (builder-style).
    pub fn with_spawn_limit(mut self, limit: usize) -> Self {
        self.spawn_limit = Some(limit);
        self
    }

    pub fn objects(&self) -> &[SpawnedObject] {
        &self.objects
    }

    pub fn object(&self, handle: ObjectHandle) -> Option<&SpawnedObject> {
        self.objects.iter().find(|o| o.handle == handle)
    }

    pub fn find_by_label(&self, label: &str) -> Option<&SpawnedObject> {
        self.objects
            .iter()
            .find(|o| o.label.as_deref() == Some(label))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn object_mut(&mut self, handle: ObjectHandle) -> Result<&mut SpawnedObject> {
        self.objects
            .iter_mut()
            .find(|o| o.handle == handle)
            .ok_or_else(|| Error::Host(format!("unknown object handle {}", handle.0)))
    }
}

impl World for MemoryWorld {
    fn spawn(
        &mut self,
        mesh: &MeshHandle,
        position: Vec3,
        yaw_degrees: f32,
    ) -> Result<Option<ObjectHandle>> {
        if self.spawn_limit.is_some_and(|limit| self.objects.len() >= limit) {
            return Ok(None);
        }
        // Handles start at 1 even for a `Default`-constructed world.
        let handle = ObjectHandle(self.next_id.max(1));
        self.next_id = handle.0 + 1;
        self.objects.push(SpawnedObject {
            handle,
            mesh: mesh.clone(),
            position,
            yaw_degrees,
            scale: Vec3::ONE,
            label: None,
        });
        Ok(Some(handle))
    }

    fn set_label(&mut self, handle: ObjectHandle, label: &str) -> Result<()> {
        self.object_mut(handle)?.label = Some(label.to_owned());
        Ok(())
    }

    fn set_scale(&mut self, handle: ObjectHandle, scale: Vec3) -> Result<()> {
        self.object_mut(handle)?.scale = scale;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_assets_resolve_registered_names() {
        let assets = StaticAssets::new().with_mesh("Barrel", Vec3::new(20.0, 20.0, 40.0));
        assert_eq!(assets.len(), 1);
        let mesh = assets.resolve("Barrel").expect("registered");
        assert_eq!(mesh.box_extent, Vec3::new(20.0, 20.0, 40.0));
        assert!(assets.resolve("Chest").is_none());
    }

    #[test]
    fn memory_world_tracks_labels_and_scale() {
        let mesh = MeshHandle::centered("Barrel", Vec3::splat(10.0));
        let mut world = MemoryWorld::new();
        let handle = world
            .spawn(&mesh, Vec3::new(1.0, 2.0, 0.0), 45.0)
            .unwrap()
            .expect("spawned");
        world.set_label(handle, "Tavern_Barrel_0").unwrap();
        world.set_scale(handle, Vec3::splat(2.0)).unwrap();

        let obj = world.find_by_label("Tavern_Barrel_0").expect("labelled");
        assert_eq!(obj.handle, handle);
        assert_eq!(obj.scale, Vec3::splat(2.0));
        assert_eq!(obj.yaw_degrees, 45.0);
    }

    #[test]
    fn default_world_hands_out_nonzero_handles() {
        let mesh = MeshHandle::centered("Rock_1", Vec3::ONE);
        let mut world = MemoryWorld::default();
        let a = world.spawn(&mesh, Vec3::ZERO, 0.0).unwrap().unwrap();
        let b = world.spawn(&mesh, Vec3::ZERO, 0.0).unwrap().unwrap();
        assert_eq!(a, ObjectHandle(1));
        assert_eq!(b, ObjectHandle(2));
    }

    #[test]
    fn spawn_limit_refuses_without_error() {
        let mesh = MeshHandle::centered("Rock_1", Vec3::ONE);
        let mut world = MemoryWorld::new().with_spawn_limit(1);
        assert!(world.spawn(&mesh, Vec3::ZERO, 0.0).unwrap().is_some());
        assert!(world.spawn(&mesh, Vec3::ZERO, 0.0).unwrap().is_none());
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn unknown_handle_is_a_host_fault() {
        let mut world = MemoryWorld::new();
        let err = world.set_label(ObjectHandle(99), "ghost").unwrap_err();
        assert!(matches!(err, Error::Host(_)));
    }
}
