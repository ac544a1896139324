use glam::Vec3;
use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::core::bounds::Ray;
use crate::error::SceneError;

/// Result of a successful pointer pick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickInfo {
    pub entity: EntityId,
    /// Distance along the ray.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
}

/// Simple entity storage using a flat Vec.
/// Designed for small scenes (tens to hundreds of entities).
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(64),
        }
    }

    /// Add an entity to the scene.
    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Remove an entity by ID. Returns the removed entity if found.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(idx))
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Like `get_mut`, but reports a missing entity as an error.
    pub fn require_mut(&mut self, id: EntityId) -> Result<&mut Entity, SceneError> {
        self.get_mut(id).ok_or(SceneError::UnknownEntity(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Find the first entity with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.name == name)
    }

    /// Cast a ray and return the nearest active, visible, pickable entity.
    /// Both the mesh bounds and the collider count as hits.
    pub fn pick(&self, ray: &Ray) -> Option<PickInfo> {
        let mut best: Option<PickInfo> = None;
        for entity in self.entities.iter() {
            if !entity.active || !entity.visible || !entity.pickable {
                continue;
            }
            let hits = [entity.mesh_bounds(), entity.collider_bounds()];
            for sphere in hits.iter().flatten() {
                if let Some(distance) = ray.intersect_sphere(sphere) {
                    if best.map_or(true, |b| distance < b.distance) {
                        best = Some(PickInfo {
                            entity: entity.id,
                            distance,
                            point: ray.at(distance),
                        });
                    }
                }
            }
        }
        best
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
