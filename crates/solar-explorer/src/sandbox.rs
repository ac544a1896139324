/// Test scene for the drag and trigger mechanics: three plain spheres, three
/// live target markers and the button, on a small floor.

use std::task::Poll;

use futures::future::LocalBoxFuture;
use glam::Vec3;
use orrery_engine::*;

use crate::celestial::CelestialBody;
use crate::game::{CUSTOM_SUBMIT, EVENT_SUBMIT};
use crate::interaction::PointerState;
use crate::lab;
use crate::submit;
use crate::target::{TargetZone, SANDBOX_TARGET};

const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 3.0, -5.0);
const CAMERA_TARGET: Vec3 = Vec3::new(0.0, 1.0, 0.0);
const CAMERA_SPEED: f32 = 0.3;
const LIGHT_INTENSITY: f32 = 0.7;
const BUTTON_POSITION: Vec3 = Vec3::new(0.0, 0.3, -4.0);

struct SphereSpec {
    name: &'static str,
    radius: f32,
    position: Vec3,
    target: Vec3,
}

const SPHERES: [SphereSpec; 3] = [
    SphereSpec { name: "A", radius: 0.5, position: Vec3::new(0.0, 1.0, 0.0), target: Vec3::new(0.0, 0.5, -2.0) },
    SphereSpec { name: "B", radius: 0.7, position: Vec3::new(-1.0, 1.0, 0.0), target: Vec3::new(1.0, 0.5, -2.0) },
    SphereSpec { name: "C", radius: 0.6, position: Vec3::new(1.0, 1.0, 0.0), target: Vec3::new(-1.0, 0.5, -2.0) },
];

const SPHERE_A_TEXTURE: &str = "assets/textures/planets/mercury.jpg";

pub struct SandboxLab {
    texture: Option<LocalBoxFuture<'static, AssetResult<TextureAsset>>>,
    spheres: Vec<CelestialBody>,
    targets: Vec<TargetZone>,
    button: Option<EntityId>,
    pointer: PointerState,
}

impl SandboxLab {
    pub fn new() -> Self {
        Self {
            texture: None,
            spheres: Vec::new(),
            targets: Vec::new(),
            button: None,
            pointer: PointerState::new(),
        }
    }
}

impl Default for SandboxLab {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for SandboxLab {
    fn init(&mut self, ctx: &mut EngineContext) {
        ctx.environment.set_camera(UserCamera::new(CAMERA_POSITION, CAMERA_TARGET).with_speed(CAMERA_SPEED));
        ctx.environment.set_light(HemisphericLight::new(Vec3::Y, LIGHT_INTENSITY));
        ctx.environment.enable_xr();

        let ground = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(ground)
                .with_name("Ground")
                .with_mesh(MeshComponent::ground(10.0, 10.0))
                .with_pickable(false),
        );

        for (index, spec) in SPHERES.iter().enumerate() {
            let id = ctx.next_id();
            ctx.scene.spawn(
                Entity::new(id)
                    .with_name(spec.name)
                    .with_position(spec.position)
                    .with_mesh(MeshComponent::sphere(spec.radius * 2.0)),
            );

            let mut sphere = CelestialBody::new(spec.name, id);
            if sphere.set_draggable(&ctx.scene).is_ok() {
                self.spheres.push(sphere);
            }
            self.targets.push(TargetZone::spawn(ctx, index, spec.name, spec.target, 1.0, SANDBOX_TARGET));
        }

        self.button = Some(submit::spawn_button(ctx, BUTTON_POSITION));
        self.texture = Some(AssetLoader::new(&mut ctx.assets).load_texture(SPHERE_A_TEXTURE, SPHERES[0].name));
        ctx.graph.propagate(&mut ctx.scene);
        log::info!("sandbox: {} spheres", self.spheres.len());
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        if let Some(load) = self.texture.as_mut() {
            if let Poll::Ready(result) = poll_now(load) {
                self.texture = None;
                match result {
                    Ok(texture) => {
                        let mut registry = AssetRegistry::new();
                        registry.insert_texture(texture);
                        lab::apply_textures(&mut ctx.scene, &registry);
                    }
                    Err(err) => log::warn!("sphere stays plain: {err}"),
                }
            }
        }

        let mut submit_pressed = false;
        for event in input.iter() {
            let ray = event.ray();
            match (event, ray) {
                (InputEvent::PointerDown { .. }, Some(ray)) => {
                    let hit = self.pointer.pointer_down(ctx, &mut self.spheres, &ray);
                    submit_pressed |= hit.is_some_and(|h| Some(h.entity) == self.button);
                }
                (InputEvent::PointerMove { .. }, Some(ray)) => {
                    self.pointer.pointer_move(ctx, &mut self.spheres, &ray);
                }
                (InputEvent::PointerUp { .. }, _) => self.pointer.pointer_up(&mut self.spheres),
                (InputEvent::Custom { kind: CUSTOM_SUBMIT, .. }, _) => submit_pressed = true,
                _ => {}
            }
        }

        for target in self.targets.iter_mut() {
            if let Some(sphere) = self.spheres.get(target.body) {
                target.update(&mut ctx.scene, sphere.entity);
            }
        }

        if submit_pressed {
            let report = submit::evaluate(&self.targets);
            ctx.emit_event(GameEvent::new(
                EVENT_SUBMIT,
                if report.passed { 1.0 } else { 0.0 },
                report.matched_count() as f32,
                report.results.len() as f32,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> (SandboxLab, EngineContext) {
        let mut ctx = EngineContext::new();
        let mut game = SandboxLab::new();
        game.init(&mut ctx);
        (game, ctx)
    }

    fn press(game: &mut SandboxLab, ctx: &mut EngineContext) -> GameEvent {
        ctx.clear_frame_data();
        let mut input = InputQueue::new();
        input.push(InputEvent::PointerDown {
            origin: BUTTON_POSITION + Vec3::new(0.0, 5.0, 0.0),
            direction: Vec3::NEG_Y,
        });
        game.update(ctx, &input);
        ctx.events[0]
    }

    fn place(ctx: &mut EngineContext, name: &str, at: Vec3) {
        ctx.scene.find_by_name_mut(name).unwrap().transform.position = at;
        ctx.graph.propagate(&mut ctx.scene);
    }

    #[test]
    fn scene_matches_the_test_layout() {
        let (game, ctx) = started();
        assert_eq!(game.spheres.len(), 3);
        assert_eq!(game.targets.len(), 3);
        assert_eq!(ctx.environment.camera.speed, CAMERA_SPEED);
        assert_eq!(ctx.environment.light.intensity, LIGHT_INTENSITY);

        let b = ctx.scene.find_by_name("B").unwrap();
        assert!((b.mesh_bounds().unwrap().radius - 0.7).abs() < 1e-6);
        let marker = ctx.scene.find_by_name("C_target").unwrap();
        assert_eq!(marker.world_position(), Vec3::new(-1.0, 0.5, -2.0));
    }

    #[test]
    fn sphere_a_wears_its_texture_once_loaded() {
        let (mut game, mut ctx) = started();
        let requests = ctx.assets.take_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].kind, AssetKind::Texture);
        assert_eq!(requests[0].path, SPHERE_A_TEXTURE);
        assert!(ctx.scene.find_by_name("A").unwrap().material.texture.is_none());

        ctx.assets
            .complete(requests[0].task, Ok(AssetPayload::Texture { handle: 1, width: 1024, height: 512 }))
            .unwrap();
        game.update(&mut ctx, &InputQueue::new());
        let a = ctx.scene.find_by_name("A").unwrap();
        assert_eq!(a.material.texture, Some(TextureRef { path: SPHERE_A_TEXTURE.into(), handle: 1 }));
    }

    #[test]
    fn a_missing_texture_leaves_the_sphere_plain() {
        let (mut game, mut ctx) = started();
        let request = ctx.assets.take_requests().remove(0);
        ctx.assets.complete(request.task, Err("404".into())).unwrap();
        game.update(&mut ctx, &InputQueue::new());
        assert!(ctx.scene.find_by_name("A").unwrap().material.texture.is_none());
        assert!(game.texture.is_none());
    }

    #[test]
    fn button_reports_live_matches() {
        let (mut game, mut ctx) = started();
        let event = press(&mut game, &mut ctx);
        assert_eq!((event.a, event.b), (0.0, 0.0));

        for spec in SPHERES.iter() {
            place(&mut ctx, spec.name, spec.target + Vec3::new(0.0, spec.radius, 0.0));
        }
        let event = press(&mut game, &mut ctx);
        assert_eq!((event.a, event.b), (1.0, 3.0));

        // No latch: moving one away fails again.
        place(&mut ctx, "B", Vec3::new(-1.0, 1.0, 0.0));
        let event = press(&mut game, &mut ctx);
        assert_eq!((event.a, event.b), (0.0, 2.0));
    }
}
