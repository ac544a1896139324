/// Target zones: translucent spheres over the platforms that watch for
/// their body.

use glam::Vec3;
use orrery_engine::*;

/// Look and latch behavior of a target zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetStyle {
    /// Diameter before the zone's own scale is applied.
    pub diameter: f32,
    pub alpha: f32,
    pub idle: Color3,
    pub matched: Color3,
    /// Latched zones keep their first match forever.
    pub latch: bool,
}

/// Lab zones: faint, red until the right planet arrives, then green for good.
pub const LAB_TARGET: TargetStyle = TargetStyle {
    diameter: 1.0,
    alpha: 0.2,
    idle: Color3::RED,
    matched: Color3::GREEN,
    latch: true,
};

/// Sandbox zones: small solid markers that turn blue while touched.
pub const SANDBOX_TARGET: TargetStyle = TargetStyle {
    diameter: 0.2,
    alpha: 1.0,
    idle: Color3::RED,
    matched: Color3::BLUE,
    latch: false,
};

/// One zone bound to one expected body.
#[derive(Debug, Clone)]
pub struct TargetZone {
    /// Name of the body this zone expects, used when reporting.
    pub body_name: String,
    /// Index of the expected body in the game's body list.
    pub body: usize,
    pub entity: EntityId,
    pub matched: bool,
    style: TargetStyle,
    locked: bool,
}

impl TargetZone {
    /// Spawn the zone sphere at `center`, uniformly scaled by `scale`.
    pub fn spawn(
        ctx: &mut EngineContext,
        body: usize,
        body_name: &str,
        center: Vec3,
        scale: f32,
        style: TargetStyle,
    ) -> Self {
        let id = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(id)
                .with_name(format!("{body_name}_target"))
                .with_position(center)
                .with_scaling(Vec3::splat(scale))
                .with_mesh(MeshComponent::sphere(style.diameter))
                .with_material(Material::colored(style.idle, style.alpha))
                .with_pickable(false),
        );
        Self {
            body_name: body_name.to_string(),
            body,
            entity: id,
            matched: false,
            style,
            locked: false,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// World-space centre of the zone.
    pub fn center(&self, scene: &Scene) -> Option<Vec3> {
        scene.get(self.entity).map(Entity::world_position)
    }

    /// Test the zone against its body and recolor it. Returns true on the
    /// frame a latching zone locks.
    pub fn update(&mut self, scene: &mut Scene, body: EntityId) -> bool {
        if self.locked {
            return false;
        }

        let zone = scene.get(self.entity).filter(|e| e.active).and_then(Entity::mesh_bounds);
        let reach = scene
            .get(body)
            .filter(|e| e.active)
            .and_then(|e| e.collider_bounds().or_else(|| e.mesh_bounds()));
        let hit = match (zone, reach) {
            (Some(zone), Some(reach)) => zone.intersects(&reach),
            _ => false,
        };

        if hit != self.matched {
            if let Some(entity) = scene.get_mut(self.entity) {
                entity.material.diffuse = if hit { self.style.matched } else { self.style.idle };
            }
        }
        self.matched = hit;

        if hit && self.style.latch {
            self.locked = true;
            return true;
        }
        false
    }
}
