use orrery_engine::systems::labels::labels_json;
use orrery_engine::systems::render::build_render_buffer;
use orrery_engine::{
    AssetManifest, AssetPayload, EngineContext, FixedTimestep, Game, GameConfig, InputEvent,
    InputQueue, ProtocolLayout, RenderBuffer, TaskId,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt, config.max_steps);
        let layout = ProtocolLayout::from_config(&config);
        let render_buffer = RenderBuffer::with_capacity(config.max_instances);

        Self {
            game,
            ctx: EngineContext::new(),
            input: InputQueue::new(),
            render_buffer,
            timestep,
            layout,
            config,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.ctx.graph.propagate(&mut self.ctx.scene);
        self.initialized = true;
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: fixed steps of game update and animation, then build
    /// the render buffer.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(dt);
        let step_dt = self.timestep.dt();
        for _ in 0..steps {
            self.game.update(&mut self.ctx, &self.input);
            // Input is seen by exactly one step.
            self.input.drain();
            self.ctx.elapsed += step_dt;
            self.ctx.step_animations(step_dt);
        }

        if self.ctx.events.len() > self.config.max_events {
            log::warn!(
                "{} game events this frame; only {} are delivered",
                self.ctx.events.len(),
                self.config.max_events
            );
            self.ctx.events.truncate(self.config.max_events);
        }

        build_render_buffer(self.ctx.scene.iter(), &mut self.render_buffer);
    }

    /// Install a manifest pushed by the host. Games read it when they start loading.
    pub fn load_manifest(&mut self, json: &str) {
        match AssetManifest::from_json(json) {
            Ok(manifest) => {
                log::info!("manifest: {} meshes, {} textures", manifest.meshes.len(), manifest.textures.len());
                self.ctx.manifest = Some(manifest);
            }
            Err(err) => log::error!("ignoring manifest: {err}"),
        }
    }

    // ---- Asset bridge ----

    /// Loads the host should start, as a JSON array. Each request is returned once.
    pub fn take_asset_requests(&mut self) -> String {
        let requests = self.ctx.assets.take_requests();
        serde_json::to_string(&requests).unwrap_or_else(|err| {
            log::error!("asset request list failed: {err}");
            String::from("[]")
        })
    }

    pub fn mesh_loaded(&mut self, task: u32, handle: u32, bounding_radius: f32) -> bool {
        self.complete(task, Ok(AssetPayload::Mesh { handle, bounding_radius }))
    }

    pub fn texture_loaded(&mut self, task: u32, handle: u32, width: u32, height: u32) -> bool {
        self.complete(task, Ok(AssetPayload::Texture { handle, width, height }))
    }

    pub fn asset_failed(&mut self, task: u32, message: &str) -> bool {
        self.complete(task, Err(message.to_string()))
    }

    fn complete(&mut self, task: u32, result: Result<AssetPayload, String>) -> bool {
        match self.ctx.assets.complete(TaskId(task), result) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("{err}");
                false
            }
        }
    }

    // ---- Snapshots ----

    pub fn labels_json(&self) -> String {
        labels_json(self.ctx.scene.iter())
    }

    pub fn environment_json(&self) -> String {
        self.ctx.environment.to_json()
    }

    pub fn environment_revision(&self) -> u32 {
        self.ctx.environment.revision
    }

    // ---- Pointer accessors for shared memory reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_floats(&self) -> &[f32] {
        self.render_buffer.as_floats()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    // ---- Capacity accessors ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn game(&self) -> &G {
        &self.game
    }
}
