pub mod runner;

pub use runner::GameRunner;

// The export macro names engine types through this path.
pub use orrery_engine;

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (game_init, game_tick, pointer rays, asset
///   bridge, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod game;
/// use game::SolarExplorer;
///
/// orrery_web::export_game!(SolarExplorer, "solar-explorer");
/// ```
///
/// The game type needs a `new()` constructor. The calling crate must depend
/// on `wasm-bindgen`, `log`, `console_log`, `console_error_panic_hook`,
/// `web-sys` (console feature), `js-sys` and `glam`.
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;
        use $crate::orrery_engine::InputEvent;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Game not initialized. Call game_init() first.");
                f(runner)
            })
        }

        fn ray_event(
            make: fn(glam::Vec3, glam::Vec3) -> InputEvent,
            ox: f32, oy: f32, oz: f32,
            dx: f32, dy: f32, dz: f32,
        ) -> InputEvent {
            make(glam::Vec3::new(ox, oy, oz), glam::Vec3::new(dx, dy, dz))
        }

        #[wasm_bindgen]
        pub fn game_init() {
            console_error_panic_hook::set_once();
            if console_log::init_with_level(log::Level::Info).is_err() {
                web_sys::console::warn_1(&"logger already installed".into());
            }

            let game = <$game_type>::new();
            let runner = $crate::GameRunner::new(game);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized", $game_name);
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        // ---- Pointer rays (mouse picking ray or XR controller aim) ----

        #[wasm_bindgen]
        pub fn game_pointer_down(ox: f32, oy: f32, oz: f32, dx: f32, dy: f32, dz: f32) {
            let event = ray_event(
                |origin, direction| InputEvent::PointerDown { origin, direction },
                ox, oy, oz, dx, dy, dz,
            );
            with_runner(|r| r.push_input(event));
        }

        #[wasm_bindgen]
        pub fn game_pointer_up(ox: f32, oy: f32, oz: f32, dx: f32, dy: f32, dz: f32) {
            let event = ray_event(
                |origin, direction| InputEvent::PointerUp { origin, direction },
                ox, oy, oz, dx, dy, dz,
            );
            with_runner(|r| r.push_input(event));
        }

        #[wasm_bindgen]
        pub fn game_pointer_move(ox: f32, oy: f32, oz: f32, dx: f32, dy: f32, dz: f32) {
            let event = ray_event(
                |origin, direction| InputEvent::PointerMove { origin, direction },
                ox, oy, oz, dx, dy, dz,
            );
            with_runner(|r| r.push_input(event));
        }

        #[wasm_bindgen]
        pub fn game_key_down(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_key_up(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyUp { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
        }

        #[wasm_bindgen]
        pub fn game_load_manifest(json: &str) {
            with_runner(|r| r.load_manifest(json));
        }

        // ---- Asset bridge ----

        #[wasm_bindgen]
        pub fn game_take_asset_requests() -> String {
            with_runner(|r| r.take_asset_requests())
        }

        #[wasm_bindgen]
        pub fn game_mesh_loaded(task: u32, handle: u32, bounding_radius: f32) -> bool {
            with_runner(|r| r.mesh_loaded(task, handle, bounding_radius))
        }

        #[wasm_bindgen]
        pub fn game_texture_loaded(task: u32, handle: u32, width: u32, height: u32) -> bool {
            with_runner(|r| r.texture_loaded(task, handle, width, height))
        }

        #[wasm_bindgen]
        pub fn game_asset_failed(task: u32, message: &str) -> bool {
            with_runner(|r| r.asset_failed(task, message))
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_instances_ptr() -> *const f32 {
            with_runner(|r| r.instances_ptr())
        }

        /// Copy of the instance data, for hosts without shared memory access.
        #[wasm_bindgen]
        pub fn get_instances_copy() -> js_sys::Float32Array {
            with_runner(|r| js_sys::Float32Array::from(r.instance_floats()))
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(|r| r.instance_count())
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len())
        }

        #[wasm_bindgen]
        pub fn get_labels_json() -> String {
            with_runner(|r| r.labels_json())
        }

        #[wasm_bindgen]
        pub fn get_environment_json() -> String {
            with_runner(|r| r.environment_json())
        }

        #[wasm_bindgen]
        pub fn get_environment_revision() -> u32 {
            with_runner(|r| r.environment_revision())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_instances() -> u32 {
            with_runner(|r| r.max_instances())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }
    };
}
