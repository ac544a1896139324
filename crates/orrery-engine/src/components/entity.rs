use glam::{EulerRot, Mat4, Quat, Vec3};
use crate::api::types::EntityId;
use crate::components::label::LabelComponent;
use crate::components::material::Material;
use crate::components::mesh::MeshComponent;
use crate::core::bounds::{BoundingSphere, SphereCollider};

/// Local transform of an entity, relative to its parent (or the world).
///
/// Rotation is stored as Euler angles in radians and applied yaw (Y),
/// pitch (X), roll (Z).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scaling: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scaling: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.rotation.y, self.rotation.x, self.rotation.z)
    }

    /// Compose scale, rotation, translation into a matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scaling, self.quat(), self.position)
    }

    /// Decompose a matrix back into a local transform.
    pub fn from_matrix(m: &Mat4) -> Self {
        let (scaling, rot, position) = m.to_scale_rotation_translation();
        let (y, x, z) = rot.to_euler(EulerRot::YXZ);
        Self {
            position,
            rotation: Vec3::new(x, y, z),
            scaling,
        }
    }
}

/// Fat entity: a single struct with optional components.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// Name for finding entities, e.g. "Mercury" or "platform3".
    pub name: String,
    /// Inactive entities are skipped by picking, rendering and triggers.
    pub active: bool,
    /// Invisible entities are not rendered and cannot be picked.
    pub visible: bool,
    /// Whether pointer rays can hit this entity.
    pub pickable: bool,
    /// Transform relative to the parent.
    pub transform: Transform,
    /// World matrix, written by `TransformGraph::propagate`.
    pub world: Mat4,
    pub mesh: Option<MeshComponent>,
    pub material: Material,
    /// Trigger sphere used for intersection tests and hover.
    pub collider: Option<SphereCollider>,
    pub label: Option<LabelComponent>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            name: String::new(),
            active: true,
            visible: true,
            pickable: true,
            transform: Transform::default(),
            world: Mat4::IDENTITY,
            mesh: None,
            material: Material::default(),
            collider: None,
            label: None,
        }
    }

    // -- Builder pattern --

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self.world = self.transform.matrix();
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.transform.rotation = rotation;
        self.world = self.transform.matrix();
        self
    }

    pub fn with_scaling(mut self, scaling: Vec3) -> Self {
        self.transform.scaling = scaling;
        self.world = self.transform.matrix();
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_collider(mut self, collider: SphereCollider) -> Self {
        self.collider = Some(collider);
        self
    }

    pub fn with_label(mut self, label: LabelComponent) -> Self {
        self.label = Some(label);
        self
    }

    pub fn with_pickable(mut self, pickable: bool) -> Self {
        self.pickable = pickable;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    // -- World-space queries --

    pub fn world_position(&self) -> Vec3 {
        self.world.w_axis.truncate()
    }

    pub fn world_scale(&self) -> Vec3 {
        self.world.to_scale_rotation_translation().0
    }

    pub fn world_rotation(&self) -> Quat {
        self.world.to_scale_rotation_translation().1
    }

    /// Bounding sphere of the rendered mesh in world space.
    pub fn mesh_bounds(&self) -> Option<BoundingSphere> {
        let mesh = self.mesh.as_ref()?;
        let scale = self.world_scale().abs().max_element();
        Some(BoundingSphere::new(self.world_position(), mesh.bounding_radius * scale))
    }

    /// Collider sphere in world space. The radius ignores entity scaling.
    pub fn collider_bounds(&self) -> Option<BoundingSphere> {
        let collider = self.collider.as_ref()?;
        Some(BoundingSphere::new(
            self.world.transform_point3(collider.offset),
            collider.radius,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_world_in_sync_for_roots() {
        let e = Entity::new(EntityId(1))
            .with_position(Vec3::new(1.0, 2.0, 3.0))
            .with_scaling(Vec3::splat(2.0));
        assert_eq!(e.world_position(), Vec3::new(1.0, 2.0, 3.0));
        assert!((e.world_scale() - Vec3::splat(2.0)).length() < 1e-5);
    }

    #[test]
    fn transform_round_trips_through_matrix() {
        let t = Transform {
            position: Vec3::new(-12.2, 17.5, 6.0),
            rotation: Vec3::new(0.3, -0.4, 0.5),
            scaling: Vec3::splat(0.2),
        };
        let back = Transform::from_matrix(&t.matrix());
        assert!((back.position - t.position).length() < 1e-4);
        assert!((back.rotation - t.rotation).length() < 1e-4);
        assert!((back.scaling - t.scaling).length() < 1e-4);
    }

    #[test]
    fn collider_radius_ignores_scale() {
        let e = Entity::new(EntityId(1))
            .with_scaling(Vec3::splat(0.001))
            .with_collider(SphereCollider::new(0.5));
        let bounds = e.collider_bounds().unwrap();
        assert_eq!(bounds.radius, 0.5);
    }

    #[test]
    fn mesh_bounds_scale_with_entity() {
        let e = Entity::new(EntityId(1))
            .with_scaling(Vec3::splat(3.0))
            .with_mesh(MeshComponent::sphere(1.0));
        let bounds = e.mesh_bounds().unwrap();
        assert!((bounds.radius - 1.5).abs() < 1e-5);
    }
}
