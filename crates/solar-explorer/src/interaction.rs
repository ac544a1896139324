/// Pointer routing shared by the lab and the sandbox: grab and drag
/// bodies, hover their cards, and report anything else that was clicked.

use orrery_engine::*;

use crate::celestial::CelestialBody;

/// Which body the pointer holds or rests on.
#[derive(Debug, Default)]
pub struct PointerState {
    dragging: Option<usize>,
    hovered: Option<usize>,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dragging(&self) -> Option<usize> {
        self.dragging
    }

    /// Grab the body under the ray, if any. Any other hit is returned for the
    /// game to handle.
    pub fn pointer_down(
        &mut self,
        ctx: &mut EngineContext,
        bodies: &mut [CelestialBody],
        ray: &Ray,
    ) -> Option<PickInfo> {
        let hit = ctx.scene.pick(ray)?;
        let Some(index) = bodies.iter().position(|b| b.entity == hit.entity) else {
            return Some(hit);
        };
        let center = ctx.scene.get(hit.entity)?.world_position();
        if bodies[index].begin_drag(ray, hit.point, center) {
            self.dragging = Some(index);
        }
        None
    }

    /// Drag the held body, or update which body is hovered. A body that
    /// locked mid-drag is let go and the pointer goes back to hovering.
    pub fn pointer_move(&mut self, ctx: &mut EngineContext, bodies: &mut [CelestialBody], ray: &Ray) {
        if let Some(index) = self.dragging {
            match bodies.get_mut(index) {
                Some(body) if body.is_dragging() => {
                    body.drag_to(ray, &mut ctx.scene);
                    return;
                }
                _ => self.dragging = None,
            }
        }

        let over = ctx
            .scene
            .pick(ray)
            .and_then(|hit| bodies.iter().position(|b| b.entity == hit.entity));
        if over == self.hovered {
            return;
        }
        if let Some(body) = self.hovered.and_then(|i| bodies.get_mut(i)) {
            body.hover(ctx, false);
        }
        if let Some(body) = over.and_then(|i| bodies.get_mut(i)) {
            body.hover(ctx, true);
        }
        self.hovered = over;
    }

    pub fn pointer_up(&mut self, bodies: &mut [CelestialBody]) {
        if let Some(body) = self.dragging.take().and_then(|i| bodies.get_mut(i)) {
            body.end_drag();
        }
    }
}
