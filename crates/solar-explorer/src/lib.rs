use wasm_bindgen::prelude::*;

pub mod bodies;
pub mod celestial;
pub mod game;
pub mod interaction;
pub mod lab;
pub mod sandbox;
pub mod submit;
pub mod target;
pub mod transition;

#[cfg(not(feature = "sandbox"))]
orrery_web::export_game!(game::SolarExplorer, "solar-explorer");

#[cfg(feature = "sandbox")]
orrery_web::export_game!(sandbox::SandboxLab, "sandbox");
