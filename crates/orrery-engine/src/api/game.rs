use crate::api::types::{EntityId, GameEvent};
use crate::assets::manager::AssetsManager;
use crate::assets::manifest::AssetManifest;
use crate::core::scene::Scene;
use crate::extensions::animation::AnimationState;
use crate::extensions::transform::TransformGraph;
use crate::input::queue::InputQueue;
use crate::systems::lighting::EnvironmentState;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Maximum fixed steps run for one rendered frame (default: 4).
    pub max_steps: u32,
    /// Maximum number of render instances (default: 512).
    pub max_instances: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_steps: 4,
            max_instances: 512,
            max_events: 32,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, start loading assets.
    fn init(&mut self, ctx: &mut EngineContext);

    /// The game loop tick. Handle pointer rays, check triggers, drive scripted sequences.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub graph: TransformGraph,
    pub animations: AnimationState,
    pub assets: AssetsManager,
    pub environment: EnvironmentState,
    /// Manifest pushed by the host before loading started, if any.
    pub manifest: Option<AssetManifest>,
    pub events: Vec<GameEvent>,
    /// Seconds of fixed steps run so far.
    pub elapsed: f32,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            graph: TransformGraph::new(),
            animations: AnimationState::new(),
            assets: AssetsManager::new(),
            environment: EnvironmentState::default(),
            manifest: None,
            events: Vec::new(),
            elapsed: 0.0,
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Run keyframe animations for one step, then refresh world matrices.
    pub fn step_animations(&mut self, dt: f32) {
        self.animations.tick(dt, &mut self.scene);
        self.graph.propagate(&mut self.scene);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}
