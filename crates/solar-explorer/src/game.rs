/// Solar System Explorer: drag the planets onto their platforms in order,
/// press the button, and watch the lab open up into space.

use std::task::Poll;

use futures::future::{self, LocalBoxFuture};
use futures::FutureExt;
use orrery_engine::*;

use crate::bodies;
use crate::interaction::PointerState;
use crate::lab::{self, Lab};
use crate::submit;
use crate::transition::{self, Transition};

// ── Custom event kinds from the host ─────────────────────────────────

/// Same as clicking the button.
pub const CUSTOM_SUBMIT: u32 = 1;

// ── Game event kinds to the host ─────────────────────────────────────

/// a = number of models loaded.
pub const EVENT_LOADED: f32 = 1.0;
pub const EVENT_LOAD_FAILED: f32 = 2.0;
/// a = planet index.
pub const EVENT_TARGET_LOCKED: f32 = 3.0;
/// a = 1 on pass, b = matched zones, c = total zones.
pub const EVENT_SUBMIT: f32 = 4.0;
pub const EVENT_TRANSITION_STARTED: f32 = 5.0;
pub const EVENT_ROOF_OPENED: f32 = 6.0;
pub const EVENT_FINISHED: f32 = 7.0;

type AssetLoad = LocalBoxFuture<'static, AssetResult<(Vec<MeshAsset>, Vec<TextureAsset>)>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting on the host for models.
    Loading,
    /// Puzzle in progress.
    Exploring,
    /// Passed; the reveal is playing.
    Transition,
    Finished,
    /// Loading or scene setup failed. Nothing more happens.
    Failed,
}

pub struct SolarExplorer {
    phase: Phase,
    loading: Option<AssetLoad>,
    lab: Option<Lab>,
    pointer: PointerState,
    transition: Transition,
}

impl SolarExplorer {
    pub fn new() -> Self {
        Self {
            phase: Phase::Loading,
            loading: None,
            lab: None,
            pointer: PointerState::new(),
            transition: Transition::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn lab(&self) -> Option<&Lab> {
        self.lab.as_ref()
    }

    /// Kick off asset loading on first call, then poll it once per step.
    fn poll_loading(&mut self, ctx: &mut EngineContext) {
        let load = self.loading.get_or_insert_with(|| start_loading(ctx));
        let assets = match poll_now(load) {
            Poll::Pending => return,
            Poll::Ready(result) => result,
        };
        self.loading = None;

        let built = assets.map_err(|err| err.to_string()).and_then(|(meshes, textures)| {
            let count = meshes.len();
            let mut registry = AssetRegistry::from_meshes(meshes);
            for texture in textures {
                registry.insert_texture(texture);
            }
            lab::build(ctx, &registry).map(|lab| (lab, count)).map_err(|err| err.to_string())
        });
        match built {
            Ok((lab, count)) => {
                log::info!("loaded {count} models; find the planets a home");
                self.lab = Some(lab);
                self.phase = Phase::Exploring;
                ctx.emit_event(GameEvent::new(EVENT_LOADED, count as f32, 0.0, 0.0));
            }
            Err(reason) => {
                log::error!("lab setup failed: {reason}");
                self.phase = Phase::Failed;
                ctx.emit_event(GameEvent::new(EVENT_LOAD_FAILED, 0.0, 0.0, 0.0));
            }
        }
    }
}

impl Default for SolarExplorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Load every model and texture in the pushed manifest, or the built-in one.
fn start_loading(ctx: &mut EngineContext) -> AssetLoad {
    let manifest = ctx.manifest.take().unwrap_or_else(bodies::builtin_manifest);
    lab::apply_skybox(&mut ctx.environment, &manifest);
    let (mesh_paths, mesh_names) = manifest.mesh_lists();
    let (texture_paths, texture_names) = manifest.texture_lists();
    log::info!("loading {} models and {} textures", mesh_paths.len(), texture_paths.len());

    let mut loader = AssetLoader::new(&mut ctx.assets);
    let meshes = loader.load_meshes(&mesh_paths, &mesh_names);
    let textures = loader.load_textures(&texture_paths, &texture_names);
    future::try_join(meshes, textures).boxed_local()
}

/// Latch zones their planet touches: snap the planet onto the zone and
/// start it spinning.
fn check_targets(ctx: &mut EngineContext, lab: &mut Lab) {
    for (index, target) in lab.targets.iter_mut().enumerate() {
        let Some(body) = lab.bodies.get_mut(target.body) else {
            continue;
        };
        if !target.update(&mut ctx.scene, body.entity) {
            continue;
        }

        body.lock();
        if let (Some(center), Some(entity)) = (target.center(&ctx.scene), ctx.scene.get_mut(body.entity)) {
            entity.transform.position = center;
        }
        body.start_idle(ctx);
        log::info!("{} locked onto its platform", body.name);
        ctx.emit_event(GameEvent::new(EVENT_TARGET_LOCKED, index as f32, 0.0, 0.0));
    }
}

impl Game for SolarExplorer {
    fn config(&self) -> GameConfig {
        GameConfig {
            max_instances: 256,
            max_events: 32,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        lab::setup_environment(&mut ctx.environment);
        log::info!("solar explorer: waiting for models");
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        if self.phase == Phase::Loading {
            self.poll_loading(ctx);
        }
        let Some(lab) = self.lab.as_mut() else {
            return;
        };

        // ── Handle input ─────────────────────────────────────────────
        let mut submit_pressed = false;
        for event in input.iter() {
            let ray = event.ray();
            match (event, ray) {
                (InputEvent::PointerDown { .. }, Some(ray)) => {
                    let hit = self.pointer.pointer_down(ctx, &mut lab.bodies, &ray);
                    submit_pressed |= hit.is_some_and(|h| h.entity == lab.button);
                }
                (InputEvent::PointerMove { .. }, Some(ray)) => {
                    self.pointer.pointer_move(ctx, &mut lab.bodies, &ray);
                }
                (InputEvent::PointerUp { .. }, _) => self.pointer.pointer_up(&mut lab.bodies),
                (InputEvent::Custom { kind: CUSTOM_SUBMIT, .. }, _) => submit_pressed = true,
                _ => {}
            }
        }

        // ── Matching ─────────────────────────────────────────────────
        if self.phase == Phase::Exploring {
            check_targets(ctx, lab);
        }

        if submit_pressed {
            let report = submit::evaluate(&lab.targets);
            ctx.emit_event(GameEvent::new(
                EVENT_SUBMIT,
                if report.passed { 1.0 } else { 0.0 },
                report.matched_count() as f32,
                report.results.len() as f32,
            ));
            if report.passed && self.transition.begin(ctx, lab) {
                self.phase = Phase::Transition;
                ctx.emit_event(GameEvent::new(EVENT_TRANSITION_STARTED, 0.0, 0.0, 0.0));
            }
        }

        // ── Scripted sequence ────────────────────────────────────────
        let completed = ctx.animations.drain_completed();
        if self.transition.on_completed(&completed) {
            self.phase = Phase::Finished;
            ctx.emit_event(GameEvent::new(EVENT_FINISHED, 0.0, 0.0, 0.0));
        }
        let opened: Vec<u32> = ctx.animations.drain_events().collect();
        for event_id in opened {
            if event_id == transition::ROOF_OPENED {
                ctx.emit_event(GameEvent::new(EVENT_ROOF_OPENED, 0.0, 0.0, 0.0));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use crate::bodies::{MERCURY, PLANETS, PLANET_COUNT};

    fn step(game: &mut SolarExplorer, ctx: &mut EngineContext, input: &InputQueue) {
        ctx.clear_frame_data();
        game.update(ctx, input);
        ctx.step_animations(1.0 / 60.0);
    }

    fn idle(game: &mut SolarExplorer, ctx: &mut EngineContext) {
        step(game, ctx, &InputQueue::new());
    }

    fn has_event(ctx: &EngineContext, kind: f32) -> bool {
        ctx.events.iter().any(|e| e.kind == kind)
    }

    /// Play the host: answer every pending asset request.
    fn answer_requests(ctx: &mut EngineContext) -> usize {
        let requests = ctx.assets.take_requests();
        for (i, req) in requests.iter().enumerate() {
            let payload = match req.kind {
                AssetKind::Mesh => AssetPayload::Mesh { handle: i as u32, bounding_radius: 1.0 },
                AssetKind::Texture => AssetPayload::Texture { handle: i as u32, width: 512, height: 256 },
            };
            ctx.assets.complete(req.task, Ok(payload)).unwrap();
        }
        requests.len()
    }

    fn loaded() -> (SolarExplorer, EngineContext) {
        let mut ctx = EngineContext::new();
        let mut game = SolarExplorer::new();
        game.init(&mut ctx);
        idle(&mut game, &mut ctx);
        assert_eq!(answer_requests(&mut ctx), PLANET_COUNT + 3);
        idle(&mut game, &mut ctx);
        assert_eq!(game.phase(), Phase::Exploring);
        (game, ctx)
    }

    fn submit(game: &mut SolarExplorer, ctx: &mut EngineContext) -> GameEvent {
        let mut input = InputQueue::new();
        input.push(InputEvent::Custom { kind: CUSTOM_SUBMIT, a: 0.0, b: 0.0, c: 0.0 });
        step(game, ctx, &input);
        *ctx.events.iter().find(|e| e.kind == EVENT_SUBMIT).unwrap()
    }

    #[test]
    fn loads_the_builtin_manifest() {
        let mut ctx = EngineContext::new();
        let mut game = SolarExplorer::new();
        game.init(&mut ctx);
        assert!(ctx.environment.xr_enabled);

        idle(&mut game, &mut ctx);
        assert_eq!(game.phase(), Phase::Loading);
        assert_eq!(ctx.environment.dome.as_ref().map(|d| d.size), Some(bodies::SKYDOME_SIZE));
        assert_eq!(answer_requests(&mut ctx), 11);

        idle(&mut game, &mut ctx);
        assert_eq!(game.phase(), Phase::Exploring);
        assert!(has_event(&ctx, EVENT_LOADED));
        assert!(ctx.scene.find_by_name("Mercury").is_some());
    }

    #[test]
    fn pushed_manifest_replaces_the_builtin_one() {
        let mut ctx = EngineContext::new();
        let mut game = SolarExplorer::new();
        game.init(&mut ctx);
        ctx.manifest = Some(AssetManifest::default().with_mesh("Mercury", "mercury.glb"));

        idle(&mut game, &mut ctx);
        let requests = ctx.assets.take_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "mercury.glb");
        assert!(ctx.environment.dome.is_none());
    }

    #[test]
    fn manifest_textures_are_loaded_and_applied() {
        let mut ctx = EngineContext::new();
        let mut game = SolarExplorer::new();
        game.init(&mut ctx);
        ctx.manifest = Some(
            bodies::builtin_manifest().with_texture("Mercury", "assets/textures/planets/mercury.jpg"),
        );

        idle(&mut game, &mut ctx);
        let requests = ctx.assets.take_requests();
        let textures: Vec<_> = requests.iter().filter(|r| r.kind == AssetKind::Texture).collect();
        assert_eq!(textures.len(), 1);
        assert_eq!(textures[0].path, "assets/textures/planets/mercury.jpg");

        for (i, req) in requests.iter().enumerate() {
            let payload = match req.kind {
                AssetKind::Mesh => AssetPayload::Mesh { handle: i as u32, bounding_radius: 1.0 },
                AssetKind::Texture => AssetPayload::Texture { handle: i as u32, width: 512, height: 256 },
            };
            ctx.assets.complete(req.task, Ok(payload)).unwrap();
        }
        assert_eq!(ctx.assets.pending_count(), 0);

        idle(&mut game, &mut ctx);
        assert_eq!(game.phase(), Phase::Exploring);
        let mercury = ctx.scene.find_by_name("Mercury").unwrap();
        let texture = mercury.material.texture.as_ref().map(|t| t.path.as_str());
        assert_eq!(texture, Some("assets/textures/planets/mercury.jpg"));
    }

    #[test]
    fn a_failed_texture_fails_the_game_too() {
        let mut ctx = EngineContext::new();
        let mut game = SolarExplorer::new();
        game.init(&mut ctx);
        ctx.manifest = Some(
            AssetManifest::default()
                .with_mesh("Mercury", "mercury.glb")
                .with_texture("Mercury", "missing.jpg"),
        );
        idle(&mut game, &mut ctx);

        for req in ctx.assets.take_requests() {
            let outcome = match req.kind {
                AssetKind::Mesh => Ok(AssetPayload::Mesh { handle: 0, bounding_radius: 1.0 }),
                AssetKind::Texture => Err("404".to_string()),
            };
            ctx.assets.complete(req.task, outcome).unwrap();
        }
        idle(&mut game, &mut ctx);
        assert_eq!(game.phase(), Phase::Failed);
    }

    #[test]
    fn a_failed_model_fails_the_game() {
        let mut ctx = EngineContext::new();
        let mut game = SolarExplorer::new();
        game.init(&mut ctx);
        idle(&mut game, &mut ctx);

        let requests = ctx.assets.take_requests();
        ctx.assets.complete(requests[3].task, Err("404".into())).unwrap();
        idle(&mut game, &mut ctx);
        assert_eq!(game.phase(), Phase::Failed);
        assert!(has_event(&ctx, EVENT_LOAD_FAILED));
        assert!(game.lab().is_none());
    }

    #[test]
    fn planets_already_over_their_platform_lock_at_once() {
        let (game, ctx) = loaded();

        let lab = game.lab().unwrap();
        let locked: Vec<bool> = lab.targets.iter().map(|t| t.is_locked()).collect();
        // Only Mercury starts away from its platform.
        assert!(!locked[MERCURY]);
        assert!(locked[1..].iter().all(|&l| l));
        assert_eq!(ctx.events.iter().filter(|e| e.kind == EVENT_TARGET_LOCKED).count(), 7);
        assert!(!lab.bodies[MERCURY].is_locked());
        assert!(lab.bodies[1].is_locked());
    }

    #[test]
    fn failing_submit_reports_and_keeps_exploring() {
        let (mut game, mut ctx) = loaded();
        idle(&mut game, &mut ctx);

        let event = submit(&mut game, &mut ctx);
        assert_eq!(event.a, 0.0);
        assert_eq!(event.b, 7.0);
        assert_eq!(event.c, 8.0);
        assert_eq!(game.phase(), Phase::Exploring);
    }

    #[test]
    fn clicking_the_button_submits() {
        let (mut game, mut ctx) = loaded();
        let mut input = InputQueue::new();
        input.push(InputEvent::PointerDown {
            origin: Vec3::new(-2.75, 25.0, -6.0),
            direction: Vec3::NEG_Y,
        });
        step(&mut game, &mut ctx, &input);
        assert!(has_event(&ctx, EVENT_SUBMIT));
    }

    #[test]
    fn dragging_mercury_home_then_submitting_plays_the_reveal() {
        let (mut game, mut ctx) = loaded();

        // Grab Mercury from below and slide it across to its platform.
        let mercury = PLANETS[MERCURY].position;
        let anchor = mercury + Vec3::new(0.0, -0.3, -0.4);
        let eye = mercury + Vec3::new(0.0, 0.0, -5.0);
        let mut input = InputQueue::new();
        input.push(InputEvent::PointerDown { origin: eye, direction: anchor - eye });
        // The grab lands on the model's bounds, about 1.17 in front of the centre.
        let goal = Vec3::new(-12.2, 19.25, -7.17);
        let high = Vec3::new(-12.2, 30.0, -20.0);
        input.push(InputEvent::PointerMove { origin: high, direction: goal - high });
        input.push(InputEvent::PointerUp { origin: high, direction: goal - high });
        step(&mut game, &mut ctx, &input);

        idle(&mut game, &mut ctx);
        let lab = game.lab().unwrap();
        assert!(lab.targets[MERCURY].is_locked());
        let snapped = ctx.scene.get(lab.bodies[MERCURY].entity).unwrap().transform.position;
        assert!((snapped - Vec3::new(-12.2, 19.5, -6.0)).length() < 0.25);

        let event = submit(&mut game, &mut ctx);
        assert_eq!(event.a, 1.0);
        assert_eq!(game.phase(), Phase::Transition);
        assert!(has_event(&ctx, EVENT_TRANSITION_STARTED));

        let mut roof_opened = false;
        for _ in 0..1000 {
            idle(&mut game, &mut ctx);
            roof_opened |= has_event(&ctx, EVENT_ROOF_OPENED);
        }
        assert!(roof_opened);
        assert_eq!(game.phase(), Phase::Finished);

        // A second pass does not replay the reveal.
        submit(&mut game, &mut ctx);
        assert_eq!(game.phase(), Phase::Finished);
    }
}
