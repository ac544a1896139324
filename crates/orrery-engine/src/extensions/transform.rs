// extensions/transform.rs
//
// Parent/child hierarchy tracked by EntityId, kept outside Entity/Scene.
// Entities carry their local Transform; the graph composes world matrices.
//
// Usage:
//   graph.attach(label_id, planet_id);          // keep local transform as given
//   graph.add_child(&scene, planet_id, lab_id)?; // keep current world transform
//   graph.propagate(&mut scene);                 // refresh Entity.world

use std::collections::HashMap;
use glam::Mat4;
use crate::api::types::EntityId;
use crate::components::entity::Transform;
use crate::core::scene::Scene;
use crate::error::SceneError;

/// Transform hierarchy. Entities without a node are roots.
#[derive(Debug, Default)]
pub struct TransformGraph {
    parents: HashMap<EntityId, EntityId>,
    children: HashMap<EntityId, Vec<EntityId>>,
}

impl TransformGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parent `child` under `parent`, interpreting the child's transform as local.
    pub fn attach(&mut self, child: EntityId, parent: EntityId) -> Result<(), SceneError> {
        if child == parent || self.is_ancestor(child, parent) {
            return Err(SceneError::Cycle { child, parent });
        }
        self.detach(child);
        self.parents.insert(child, parent);
        self.children.entry(parent).or_default().push(child);
        Ok(())
    }

    /// Parent `child` under `parent` without moving it in the world.
    /// The child's local transform is rewritten relative to the new parent.
    pub fn add_child(
        &mut self,
        scene: &mut Scene,
        child: EntityId,
        parent: EntityId,
    ) -> Result<(), SceneError> {
        let child_world = self.world_matrix(scene, child)?;
        let parent_world = self.world_matrix(scene, parent)?;
        self.attach(child, parent)?;
        let local = parent_world.inverse() * child_world;
        let entity = scene.require_mut(child)?;
        entity.transform = Transform::from_matrix(&local);
        entity.world = child_world;
        Ok(())
    }

    /// Make `child` a root again. Its local transform is left untouched.
    pub fn detach(&mut self, child: EntityId) {
        if let Some(old) = self.parents.remove(&child) {
            if let Some(siblings) = self.children.get_mut(&old) {
                siblings.retain(|&c| c != child);
            }
        }
    }

    pub fn parent(&self, id: EntityId) -> Option<EntityId> {
        self.parents.get(&id).copied()
    }

    pub fn children(&self, id: EntityId) -> &[EntityId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `ancestor` appears on the parent chain of `id`.
    pub fn is_ancestor(&self, ancestor: EntityId, id: EntityId) -> bool {
        let mut current = self.parent(id);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.parent(p);
        }
        false
    }

    /// Remove an entity from the hierarchy. Its children become roots.
    pub fn remove(&mut self, id: EntityId) {
        self.detach(id);
        if let Some(orphans) = self.children.remove(&id) {
            for child in orphans {
                self.parents.remove(&child);
            }
        }
    }

    /// Compose the world matrix of one entity from the current local transforms.
    pub fn world_matrix(&self, scene: &Scene, id: EntityId) -> Result<Mat4, SceneError> {
        let entity = scene.get(id).ok_or(SceneError::UnknownEntity(id))?;
        let local = entity.transform.matrix();
        match self.parent(id) {
            Some(parent) => Ok(self.world_matrix(scene, parent)? * local),
            None => Ok(local),
        }
    }

    /// Recompute `Entity.world` for every entity in the scene, roots first.
    pub fn propagate(&self, scene: &mut Scene) {
        let roots: Vec<EntityId> = scene
            .iter()
            .map(|e| e.id)
            .filter(|id| !self.parents.contains_key(id))
            .collect();
        for root in roots {
            self.propagate_recursive(root, Mat4::IDENTITY, scene);
        }
    }

    fn propagate_recursive(&self, id: EntityId, parent_world: Mat4, scene: &mut Scene) {
        let Some(entity) = scene.get_mut(id) else { return };
        let world = parent_world * entity.transform.matrix();
        entity.world = world;

        for &child in self.children(id) {
            self.propagate_recursive(child, world, scene);
        }
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn clear(&mut self) {
        self.parents.clear();
        self.children.clear();
    }
}
