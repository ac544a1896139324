use crate::components::entity::Entity;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Build the render buffer from a set of entities.
/// Only active, visible entities with a mesh produce an instance.
/// Returns how many entities did not fit.
pub fn build_render_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    buffer: &mut RenderBuffer,
) -> usize {
    buffer.clear();
    let mut dropped = 0;

    for entity in entities {
        if !entity.active || !entity.visible {
            continue;
        }
        let Some(mesh) = &entity.mesh else { continue };

        let (scale, rotation, position) = entity.world.to_scale_rotation_translation();
        let m = &entity.material;
        let instance = RenderInstance {
            position: position.to_array(),
            rotation: rotation.to_array(),
            scale: scale.to_array(),
            color: [m.diffuse.r, m.diffuse.g, m.diffuse.b, m.alpha],
            mesh_kind: mesh.shape.kind_code(),
            entity_id: entity.id.0 as f32,
            texture: m.texture.as_ref().map_or(RenderInstance::NO_TEXTURE, |t| t.handle as f32),
        };
        if !buffer.push(instance) {
            dropped += 1;
        }
    }

    if dropped > 0 {
        log::warn!("render buffer full; {dropped} entities not drawn");
    }
    dropped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::material::{Color3, Material, TextureRef};
    use crate::components::mesh::MeshComponent;
    use glam::Vec3;

    #[test]
    fn writes_world_transform_and_material() {
        let entities = vec![
            Entity::new(EntityId(4))
                .with_position(Vec3::new(-2.75, 18.0, -6.0))
                .with_mesh(MeshComponent::cylinder(0.3, 1.0))
                .with_material(Material::colored(Color3::RED, 0.2)),
        ];
        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &mut buffer);

        assert_eq!(buffer.instance_count(), 1);
        let inst = buffer.instances[0];
        assert_eq!(inst.position, [-2.75, 18.0, -6.0]);
        assert_eq!(inst.color, [1.0, 0.0, 0.0, 0.2]);
        assert_eq!(inst.mesh_kind, 2.0);
        assert_eq!(inst.entity_id, 4.0);
        assert_eq!(inst.texture, RenderInstance::NO_TEXTURE);
    }

    #[test]
    fn textured_materials_carry_the_host_handle() {
        let mut material = Material::default();
        material.texture = Some(TextureRef { path: "assets/textures/planets/mercury.jpg".into(), handle: 9 });
        let entities = vec![Entity::new(EntityId(1))
            .with_mesh(MeshComponent::sphere(1.0))
            .with_material(material)];
        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &mut buffer);
        assert_eq!(buffer.instances[0].texture, 9.0);
    }

    #[test]
    fn inactive_hidden_and_meshless_entities_are_skipped() {
        let mut inactive = Entity::new(EntityId(1)).with_mesh(MeshComponent::sphere(1.0));
        inactive.active = false;
        let hidden = Entity::new(EntityId(2))
            .with_mesh(MeshComponent::sphere(1.0))
            .with_visible(false);
        let bare = Entity::new(EntityId(3));

        let entities = vec![inactive, hidden, bare];
        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &mut buffer);
        assert_eq!(buffer.instance_count(), 0);
    }

    #[test]
    fn overflow_is_counted() {
        let entities: Vec<_> = (0..3)
            .map(|i| Entity::new(EntityId(i)).with_mesh(MeshComponent::sphere(1.0)))
            .collect();
        let mut buffer = RenderBuffer::with_capacity(2);
        assert_eq!(build_render_buffer(entities.iter(), &mut buffer), 1);
    }
}
