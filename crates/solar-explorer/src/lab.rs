/// The design lab scene: camera, light, skydome, scenery, platforms with
/// their target zones, the planets, the roof, the button and the whiteboard.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec3;
use orrery_engine::*;

use crate::bodies::{self, BodySpec, MOON, PLANETS};
use crate::celestial::CelestialBody;
use crate::submit;
use crate::target::{TargetZone, LAB_TARGET};

const CAMERA_POSITION: Vec3 = Vec3::new(28.0, 32.0, -7.0);
const CAMERA_SPEED: f32 = 1.0;
const LIGHT_DIRECTION: Vec3 = Vec3::new(-1.0, 1.0, 0.0);

const BUTTON_POSITION: Vec3 = Vec3::new(-2.75, 18.0, -6.0);

const WHITEBOARD_POSITION: Vec3 = Vec3::new(-113.35, 47.5, 0.0);
const WHITEBOARD_TEXT: &str = concat!(
    "\nWelcome to the Solar System Explorer! \n\n",
    "Find the planets and put them on the platforms on the table in the correct order. ",
    "Press the white button once you are done. \n\n",
    "Use the distance from the sun as a hint!"
);

/// Roof panel, in the lab model's space.
const ROOF_POSITION: Vec3 = Vec3::new(2.1, 7.6, -1.8);
const ROOF_SCALING: Vec3 = Vec3::new(1.85, 3.0, 0.1);
const ROOF_ROTATION: Vec3 = Vec3::new(FRAC_PI_2, 0.0, 0.0);
const ROOF_FPS: f32 = 60.0;
pub const ROOF_FRAMES: f32 = 960.0;
const ROOF_LIFT: f32 = 150.0;

/// Platform name plates, in the platform model's space.
const PLATE_POSITION: Vec3 = Vec3::new(-20.0, 3.0, 0.0);
const PLATE_ROTATION: Vec3 = Vec3::new(FRAC_PI_2, FRAC_PI_2, 0.0);

/// Handles to everything the game drives after setup.
#[derive(Debug, Clone)]
pub struct Lab {
    pub lab: EntityId,
    pub roof: EntityId,
    pub moon: EntityId,
    pub button: EntityId,
    pub whiteboard: EntityId,
    pub platforms: Vec<EntityId>,
    /// Planets, in catalog order.
    pub bodies: Vec<CelestialBody>,
    /// One zone per planet, in catalog order.
    pub targets: Vec<TargetZone>,
}

/// Camera rig, light and XR. Independent of loaded assets.
pub fn setup_environment(env: &mut EnvironmentState) {
    env.set_camera(
        UserCamera::new(CAMERA_POSITION, WHITEBOARD_POSITION)
            .with_speed(CAMERA_SPEED)
            .with_collisions(true),
    );
    env.set_light(HemisphericLight::new(LIGHT_DIRECTION, 1.0));
    env.enable_xr();
}

/// Point the host's photo dome at the manifest's skybox, if it has one.
pub fn apply_skybox(env: &mut EnvironmentState, manifest: &AssetManifest) {
    if let Some(sky) = &manifest.skybox {
        env.set_dome(PhotoDome {
            texture: sky.path.clone(),
            size: sky.size,
            resolution: sky.resolution,
        });
    }
}

/// Build the scene from loaded models. Models missing from `registry` are
/// spawned without a mesh.
pub fn build(ctx: &mut EngineContext, registry: &AssetRegistry) -> Result<Lab, SceneError> {
    let lab = spawn_model(ctx, registry, bodies::LAB_NAME)
        .with_scaling(Vec3::splat(bodies::LAB_SCALE))
        .with_pickable(false);
    let lab_id = lab.id;
    ctx.scene.spawn(lab);

    let roof = spawn_roof(ctx, lab_id)?;
    let platforms = spawn_platforms(ctx, registry)?;

    let mut targets = Vec::with_capacity(PLANETS.len());
    let mut planets = Vec::with_capacity(PLANETS.len());
    for (index, (spec, &platform)) in PLANETS.iter().zip(&platforms).enumerate() {
        let center = ctx
            .scene
            .get(platform)
            .map(|p| p.transform.position + Vec3::new(0.0, bodies::TARGET_HEIGHT, 0.0))
            .ok_or(SceneError::UnknownEntity(platform))?;
        targets.push(TargetZone::spawn(ctx, index, spec.name, center, spec.target_scale, LAB_TARGET));
        planets.push(spawn_planet(ctx, registry, spec)?);
    }

    let moon = spawn_moon(ctx, registry, planets[MOON.parent].entity)?;
    let button = submit::spawn_button(ctx, BUTTON_POSITION);
    let whiteboard = spawn_whiteboard(ctx);
    apply_textures(&mut ctx.scene, registry);

    ctx.graph.propagate(&mut ctx.scene);
    log::info!("lab ready: {} planets, {} platforms", planets.len(), platforms.len());

    Ok(Lab {
        lab: lab_id,
        roof,
        moon,
        button,
        whiteboard,
        platforms,
        bodies: planets,
        targets,
    })
}

/// Put each loaded texture on the entity that shares its name.
pub fn apply_textures(scene: &mut Scene, registry: &AssetRegistry) {
    for texture in registry.textures() {
        match scene.find_by_name_mut(&texture.name) {
            Some(entity) => {
                entity.material.texture = Some(TextureRef { path: texture.path.clone(), handle: texture.handle });
            }
            None => log::warn!("texture {} matches no entity", texture.name),
        }
    }
}

fn spawn_model(ctx: &mut EngineContext, registry: &AssetRegistry, name: &str) -> Entity {
    let entity = Entity::new(ctx.next_id()).with_name(name);
    match registry.mesh_component(name) {
        Some(mesh) => entity.with_mesh(mesh),
        None => {
            log::warn!("no model loaded for {name}");
            entity
        }
    }
}

fn spawn_planet(
    ctx: &mut EngineContext,
    registry: &AssetRegistry,
    spec: &BodySpec,
) -> Result<CelestialBody, SceneError> {
    let entity = spawn_model(ctx, registry, spec.name)
        .with_position(spec.position)
        .with_scaling(Vec3::splat(spec.scale));
    let mut body = CelestialBody::new(spec.name, entity.id);
    ctx.scene.spawn(entity);

    body.add_collider(&mut ctx.scene)?;
    body.create_label(ctx, spec.info, spec.label_offset)?;
    if let Err(err) = body.set_draggable(&ctx.scene) {
        log::debug!("{} stays where it was placed: {err}", spec.name);
    }
    Ok(body)
}

fn spawn_moon(ctx: &mut EngineContext, registry: &AssetRegistry, parent: EntityId) -> Result<EntityId, SceneError> {
    let moon = spawn_model(ctx, registry, MOON.name)
        .with_position(MOON.local_position)
        .with_scaling(Vec3::splat(MOON.scale));
    let id = moon.id;
    ctx.scene.spawn(moon);
    ctx.graph.attach(id, parent)?;
    Ok(id)
}

/// The first platform plus seven copies of its model, each with a name plate.
fn spawn_platforms(ctx: &mut EngineContext, registry: &AssetRegistry) -> Result<Vec<EntityId>, SceneError> {
    let first = spawn_model(ctx, registry, bodies::PLATFORM_NAME);
    let mesh = first.mesh.clone();

    let mut platforms = Vec::with_capacity(PLANETS.len());
    for (index, spec) in PLANETS.iter().enumerate() {
        let platform = if index == 0 {
            first.clone()
        } else {
            let copy = Entity::new(ctx.next_id()).with_name(format!("platform{index}"));
            match &mesh {
                Some(mesh) => copy.with_mesh(mesh.clone()),
                None => copy,
            }
        };
        let platform = platform
            .with_position(bodies::platform_position(index))
            .with_scaling(Vec3::splat(bodies::PLATFORM_SCALE))
            .with_pickable(false);
        let id = platform.id;
        ctx.scene.spawn(platform);

        let plate = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(plate)
                .with_name(format!("platform{index}_plate"))
                .with_position(PLATE_POSITION)
                .with_rotation(PLATE_ROTATION)
                .with_pickable(false)
                .with_label(LabelComponent::plane(spec.name, 4.5, 2.5, 64.0)),
        );
        ctx.graph.attach(plate, id)?;
        platforms.push(id);
    }
    Ok(platforms)
}

fn spawn_roof(ctx: &mut EngineContext, lab: EntityId) -> Result<EntityId, SceneError> {
    let id = ctx.next_id();
    ctx.scene.spawn(
        Entity::new(id)
            .with_name("roof")
            .with_position(ROOF_POSITION)
            .with_rotation(ROOF_ROTATION)
            .with_scaling(ROOF_SCALING)
            .with_mesh(MeshComponent::plane(10.0, 10.0).double_sided())
            .with_pickable(false),
    );
    ctx.graph.attach(id, lab)?;
    Ok(id)
}

fn spawn_whiteboard(ctx: &mut EngineContext) -> EntityId {
    let id = ctx.next_id();
    ctx.scene.spawn(
        Entity::new(id)
            .with_name("Whiteboard")
            .with_position(WHITEBOARD_POSITION)
            .with_rotation(Vec3::new(0.0, -FRAC_PI_2, 0.0))
            .with_pickable(false)
            .with_label(
                LabelComponent::plane(WHITEBOARD_TEXT, 64.0, 32.0, 256.0)
                    .with_vertical_align(VerticalAlign::Top)
                    .with_padding(20.0)
                    .with_wrap(true),
            ),
    );
    id
}

/// Roof spins a full turn about Z while lifting off, starting from `from`.
pub fn roof_animations(from: Transform) -> Vec<Animation> {
    let spin = [(0.0, from.rotation), (ROOF_FRAMES, from.rotation + Vec3::new(0.0, 0.0, TAU))];
    let lift = [(0.0, from.position), (ROOF_FRAMES, from.position + Vec3::new(0.0, ROOF_LIFT, 0.0))];
    vec![
        Animation::vector("roof_rotation", AnimatedProperty::Rotation, ROOF_FPS, &spin)
            .with_loop_mode(LoopMode::Constant),
        Animation::vector("roof_position", AnimatedProperty::Position, ROOF_FPS, &lift)
            .with_loop_mode(LoopMode::Constant),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;
    use crate::bodies::{EARTH, MERCURY, VENUS};

    fn registry() -> AssetRegistry {
        let manifest = bodies::builtin_manifest();
        AssetRegistry::from_meshes(manifest.meshes.iter().enumerate().map(|(i, m)| MeshAsset {
            name: m.name.clone(),
            path: m.path.clone(),
            handle: ModelHandle(i as u32),
            bounding_radius: 1.0,
        }))
    }

    fn built() -> (EngineContext, Lab) {
        let mut ctx = EngineContext::new();
        let lab = build(&mut ctx, &registry()).unwrap();
        (ctx, lab)
    }

    #[test]
    fn environment_matches_the_lab_layout() {
        let mut env = EnvironmentState::default();
        setup_environment(&mut env);
        apply_skybox(&mut env, &bodies::builtin_manifest());
        assert_eq!(env.camera.position, CAMERA_POSITION);
        assert_eq!(env.camera.target, WHITEBOARD_POSITION);
        assert_eq!(env.camera.speed, 1.0);
        assert_eq!(env.light.direction, LIGHT_DIRECTION);
        assert!(env.xr_enabled);
        let dome = env.dome.as_ref().unwrap();
        assert_eq!(dome.size, 10_000.0);
        assert_eq!(dome.texture, bodies::SKYDOME_TEXTURE);
    }

    #[test]
    fn planets_and_targets_are_placed() {
        let (ctx, lab) = built();
        assert_eq!(lab.bodies.len(), 8);
        assert_eq!(lab.targets.len(), 8);
        assert_eq!(lab.platforms.len(), 8);

        let mercury = ctx.scene.get(lab.bodies[MERCURY].entity).unwrap();
        assert_eq!(mercury.world_position(), Vec3::new(-6.2, 19.5, -6.0));
        assert!(mercury.collider.is_some());
        assert!(lab.bodies[MERCURY].is_draggable());

        let zone = ctx.scene.get(lab.targets[VENUS].entity).unwrap();
        assert!((zone.world_position() - Vec3::new(-12.2, 19.5, 0.0)).length() < 1e-4);
        assert_eq!(lab.targets[EARTH].body_name, "Earth");
    }

    #[test]
    fn moon_rides_on_earth() {
        let (ctx, lab) = built();
        assert_eq!(ctx.graph.parent(lab.moon), Some(lab.bodies[EARTH].entity));
        let moon = ctx.scene.get(lab.moon).unwrap();
        let expected = Vec3::new(-12.2, 19.5, 6.0) + Vec3::new(0.7, 0.7, 0.0);
        assert!((moon.world_position() - expected).length() < 1e-4);
        assert!(lab.bodies.iter().all(|b| b.entity != lab.moon));
    }

    #[test]
    fn roof_hangs_off_the_scaled_lab() {
        let (ctx, lab) = built();
        assert_eq!(ctx.graph.parent(lab.roof), Some(lab.lab));
        let roof = ctx.scene.get(lab.roof).unwrap();
        assert_eq!(roof.transform.position, ROOF_POSITION);
        assert!((roof.world_position() - ROOF_POSITION * 10.0).length() < 1e-3);
    }

    #[test]
    fn platforms_share_the_first_model_and_carry_plates() {
        let (ctx, lab) = built();
        let handles: Vec<_> = lab
            .platforms
            .iter()
            .map(|&id| ctx.scene.get(id).unwrap().mesh.as_ref().and_then(MeshComponent::model_handle))
            .collect();
        assert!(handles.iter().all(|h| h.is_some() && *h == handles[0]));
        assert_eq!(ctx.scene.get(lab.platforms[3]).unwrap().name, "platform3");

        let plate = ctx.graph.children(lab.platforms[3])[0];
        let label = ctx.scene.get(plate).unwrap().label.as_ref().unwrap();
        assert_eq!(label.text, "Mars");
        assert_eq!(label.texture_size(), Some((450, 250)));
    }

    #[test]
    fn whiteboard_and_button_exist() {
        let (ctx, lab) = built();
        let board = ctx.scene.get(lab.whiteboard).unwrap();
        let label = board.label.as_ref().unwrap();
        assert!(label.text.contains("Welcome to the Solar System Explorer!"));
        assert_eq!(label.vertical_align, VerticalAlign::Top);
        assert_eq!(ctx.scene.get(lab.button).unwrap().name, submit::BUTTON_NAME);
    }

    #[test]
    fn missing_models_leave_planets_in_place() {
        let mut ctx = EngineContext::new();
        let lab = build(&mut ctx, &AssetRegistry::new()).unwrap();
        assert!(lab.bodies.iter().all(|b| !b.is_draggable()));
        assert!(lab.bodies.iter().all(|b| b.card.is_some()));
        assert!(ctx.scene.get(lab.bodies[MERCURY].entity).unwrap().mesh.is_none());
    }

    #[test]
    fn loaded_textures_dress_their_namesakes() {
        let mut ctx = EngineContext::new();
        let mut registry = registry();
        registry.insert_texture(TextureAsset {
            name: "Mercury".into(),
            path: "assets/textures/planets/mercury.jpg".into(),
            handle: 3,
            width: 1024,
            height: 512,
        });
        let lab = build(&mut ctx, &registry).unwrap();
        let mercury = ctx.scene.get(lab.bodies[MERCURY].entity).unwrap();
        let texture = mercury.material.texture.as_ref().unwrap();
        assert_eq!(texture.path, "assets/textures/planets/mercury.jpg");
        assert_eq!(texture.handle, 3);
        let venus = ctx.scene.get(lab.bodies[VENUS].entity).unwrap();
        assert!(venus.material.texture.is_none());
    }

    #[test]
    fn roof_animation_turns_and_lifts() {
        let (mut ctx, lab) = built();
        let from = ctx.scene.get(lab.roof).unwrap().transform;
        ctx.animations.begin(lab.roof, roof_animations(from), 0.0, ROOF_FRAMES, false);
        for _ in 0..480 {
            ctx.step_animations(1.0 / 60.0);
        }
        let mid = ctx.scene.get(lab.roof).unwrap().transform;
        assert!((mid.rotation.z - PI).abs() < 1e-2);
        assert!((mid.position.y - (ROOF_POSITION.y + 75.0)).abs() < 0.2);
    }
}
