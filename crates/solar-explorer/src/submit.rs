/// The submit button and the pass/fail check it runs.

use glam::Vec3;
use orrery_engine::*;

use crate::target::TargetZone;

pub const BUTTON_NAME: &str = "Button";
const BUTTON_HEIGHT: f32 = 0.3;
const BUTTON_DIAMETER: f32 = 1.0;

/// Outcome of one press of the button.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitReport {
    /// Body name and whether its zone is matched, in zone order.
    pub results: Vec<(String, bool)>,
    pub passed: bool,
}

impl SubmitReport {
    pub fn matched_count(&self) -> usize {
        self.results.iter().filter(|(_, matched)| *matched).count()
    }
}

/// Spawn the white button cylinder.
pub fn spawn_button(ctx: &mut EngineContext, position: Vec3) -> EntityId {
    let id = ctx.next_id();
    ctx.scene.spawn(
        Entity::new(id)
            .with_name(BUTTON_NAME)
            .with_position(position)
            .with_mesh(MeshComponent::cylinder(BUTTON_HEIGHT, BUTTON_DIAMETER)),
    );
    id
}

/// Report every zone, then pass only if all of them are matched.
pub fn evaluate(targets: &[TargetZone]) -> SubmitReport {
    let results: Vec<_> = targets
        .iter()
        .map(|t| {
            log::info!("{}: {}", t.body_name, if t.matched { "Match" } else { "No Match" });
            (t.body_name.clone(), t.matched)
        })
        .collect();
    let passed = results.iter().all(|(_, matched)| *matched);
    log::info!("{}", if passed { "Pass!" } else { "Fail" });
    SubmitReport { results, passed }
}
