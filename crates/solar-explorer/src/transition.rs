/// The reveal after a passing submit: the roof lifts off, the planets fly
/// out into space and their cards open with the full descriptions.

use orrery_engine::*;

use crate::bodies::PLANETS;
use crate::celestial::LabelState;
use crate::lab::{self, Lab};

/// Completion event id registered for the roof animation.
pub const ROOF_OPENED: u32 = 1;

#[derive(Debug, Default)]
pub struct Transition {
    pending: Vec<AnimationId>,
    started: bool,
    finished: bool,
}

impl Transition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Start every transition animation. Only the first call does anything.
    pub fn begin(&mut self, ctx: &mut EngineContext, lab: &mut Lab) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        log::info!("transition started");

        if let Some(roof) = ctx.scene.get(lab.roof).map(|e| e.transform) {
            let id = ctx.animations.begin(lab.roof, lab::roof_animations(roof), 0.0, lab::ROOF_FRAMES, false);
            ctx.animations.set_on_complete(id, ROOF_OPENED);
            self.pending.push(id);
        }

        for (spec, body) in PLANETS.iter().zip(lab.bodies.iter_mut()) {
            body.lock();
            if let Some(id) = body.move_to_space(ctx, spec.destination, spec.space_scale) {
                self.pending.push(id);
            }
            body.set_label_text(&mut ctx.scene, spec.description);
            if let Some(id) = body.set_label_state(ctx, LabelState::AlwaysOn) {
                self.pending.push(id);
            }
        }
        true
    }

    /// Feed completed animation ids. Returns true once, when the last
    /// transition animation is done.
    pub fn on_completed(&mut self, completed: &[AnimationId]) -> bool {
        if !self.started || self.finished {
            return false;
        }
        self.pending.retain(|id| !completed.contains(id));
        if self.pending.is_empty() {
            self.finished = true;
            log::info!("transition finished");
            return true;
        }
        false
    }
}
