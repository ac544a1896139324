/// Draggable celestial bodies: dual vertical/horizontal drag, hover info
/// cards and the scripted idle and move-to-space animations.

use std::f32::consts::TAU;

use glam::Vec3;
use orrery_engine::*;

/// Info card size in pixels.
const CARD_WIDTH: f32 = 300.0;
const CARD_HEIGHT: f32 = 200.0;
/// Card grow/shrink: 10 frames at 30 fps.
const CARD_FPS: f32 = 30.0;
const CARD_FRAMES: f32 = 10.0;

/// Idle spin and bob: 120 frames at 60 fps.
const IDLE_FPS: f32 = 60.0;
const IDLE_FRAMES: f32 = 120.0;
const IDLE_BOB: f32 = 0.2;

/// Flight out of the lab: 360 frames at 60 fps.
const SPACE_FPS: f32 = 60.0;
pub const SPACE_FRAMES: f32 = 360.0;

/// Collider diameter in world units, independent of the model's scale.
const COLLIDER_DIAMETER: f32 = 1.0;

/// When a body's info card is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelState {
    Off,
    OnHover,
    AlwaysOn,
}

/// A body the user can pick up and drop onto a platform.
#[derive(Debug, Clone)]
pub struct CelestialBody {
    pub name: String,
    pub entity: EntityId,
    /// Entity carrying the info card, linked to the body.
    pub card: Option<EntityId>,
    pub label_state: LabelState,
    drag: Option<PointerDragBehavior>,
    hovered: bool,
    locked: bool,
}

impl CelestialBody {
    pub fn new(name: impl Into<String>, entity: EntityId) -> Self {
        Self {
            name: name.into(),
            entity,
            card: None,
            label_state: LabelState::Off,
            drag: None,
            hovered: false,
            locked: false,
        }
    }

    /// Attach the dual drag. Bodies without a mesh cannot be grabbed.
    pub fn set_draggable(&mut self, scene: &Scene) -> Result<(), SceneError> {
        let entity = scene.get(self.entity).ok_or(SceneError::UnknownEntity(self.entity))?;
        if entity.mesh.is_none() {
            let err = SceneError::MissingMesh(self.name.clone());
            log::warn!("{err}; unable to set draggable");
            return Err(err);
        }
        self.drag = Some(PointerDragBehavior::axis(Vec3::Y));
        Ok(())
    }

    pub fn is_draggable(&self) -> bool {
        !self.locked && self.drag.as_ref().is_some_and(|d| d.enabled)
    }

    /// Give the body a unit trigger sphere that follows it around.
    pub fn add_collider(&self, scene: &mut Scene) -> Result<(), SceneError> {
        scene.require_mut(self.entity)?.collider = Some(SphereCollider::from_diameter(COLLIDER_DIAMETER));
        Ok(())
    }

    /// Spawn a collapsed info card linked to the body, `offset` above it in
    /// model space. Cards then show on hover.
    pub fn create_label(
        &mut self,
        ctx: &mut EngineContext,
        text: &str,
        offset: Vec3,
    ) -> Result<EntityId, SceneError> {
        let id = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(id)
                .with_name(format!("{}_label", self.name))
                .with_position(offset)
                .with_pickable(false)
                .with_label(LabelComponent::card(text, CARD_WIDTH, CARD_HEIGHT)),
        );
        ctx.graph.attach(id, self.entity)?;
        self.card = Some(id);
        self.label_state = LabelState::OnHover;
        Ok(id)
    }

    pub fn set_label_text(&self, scene: &mut Scene, text: &str) {
        let label = self.card.and_then(|id| scene.get_mut(id)).and_then(|e| e.label.as_mut());
        if let Some(label) = label {
            label.text = text.to_string();
        }
    }

    /// Switch the card mode. Returns the animation showing or hiding it, if any.
    pub fn set_label_state(&mut self, ctx: &mut EngineContext, state: LabelState) -> Option<AnimationId> {
        let previous = self.label_state;
        self.label_state = state;
        let shown = self.hovered && previous == LabelState::OnHover || previous == LabelState::AlwaysOn;
        match state {
            LabelState::AlwaysOn if !shown => self.play_card(ctx, true),
            LabelState::Off if shown => self.play_card(ctx, false),
            LabelState::OnHover if shown && !self.hovered => self.play_card(ctx, false),
            _ => None,
        }
    }

    /// Pointer entered or left the body's collider.
    pub fn hover(&mut self, ctx: &mut EngineContext, over: bool) {
        if self.hovered == over {
            return;
        }
        self.hovered = over;
        if self.label_state == LabelState::OnHover {
            self.play_card(ctx, over);
        }
    }

    fn play_card(&self, ctx: &mut EngineContext, show: bool) -> Option<AnimationId> {
        let card = self.card?;
        let (from, to) = if show { (0.0, CARD_FRAMES) } else { (CARD_FRAMES, 0.0) };
        Some(ctx.animations.begin(card, card_animations(), from, to, false))
    }

    // -- Dragging --

    /// Grab the body at `anchor`. Grabbing below the body's centre drags it
    /// on the horizontal plane instead of up and down.
    pub fn begin_drag(&mut self, ray: &Ray, anchor: Vec3, center: Vec3) -> bool {
        if self.locked {
            return false;
        }
        let Some(drag) = self.drag.as_mut() else {
            return false;
        };
        let Some(point) = drag.start(ray, anchor) else {
            return false;
        };
        if point.y < center.y {
            drag.set_mode(DragMode::Plane(Vec3::Y));
            return drag.start(ray, anchor).is_some();
        }
        true
    }

    /// Follow the pointer. Returns the world delta applied.
    pub fn drag_to(&mut self, ray: &Ray, scene: &mut Scene) -> Option<Vec3> {
        let delta = self.drag.as_mut()?.drag(ray)?;
        let entity = scene.get_mut(self.entity)?;
        entity.transform.position += delta;
        Some(delta)
    }

    /// Release the body. A horizontal drag hands back to the vertical one.
    pub fn end_drag(&mut self) -> bool {
        let Some(drag) = self.drag.as_mut() else {
            return false;
        };
        let was_dragging = drag.end();
        if matches!(drag.mode, DragMode::Plane(_)) {
            drag.set_mode(DragMode::Axis(Vec3::Y));
        }
        was_dragging
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.as_ref().is_some_and(|d| d.is_dragging())
    }

    pub fn drag_mode(&self) -> Option<DragMode> {
        self.drag.as_ref().map(|d| d.mode)
    }

    /// Stop accepting drags for good.
    pub fn lock(&mut self) {
        self.end_drag();
        if let Some(drag) = self.drag.as_mut() {
            drag.enabled = false;
        }
        self.locked = true;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    // -- Scripted animations --

    /// Spin and bob in place, forever.
    pub fn start_idle(&self, ctx: &mut EngineContext) -> Option<AnimationId> {
        let transform = ctx.scene.get(self.entity)?.transform;
        let tracks = idle_animations(transform.position, transform.rotation);
        Some(ctx.animations.begin(self.entity, tracks, 0.0, IDLE_FRAMES, true))
    }

    /// Fly to `destination`, growing by `factor`.
    pub fn move_to_space(&self, ctx: &mut EngineContext, destination: Vec3, factor: f32) -> Option<AnimationId> {
        let transform = ctx.scene.get(self.entity)?.transform;
        let tracks = move_to_space_animations(transform.position, transform.scaling, destination, factor);
        Some(ctx.animations.begin(self.entity, tracks, 0.0, SPACE_FRAMES, false))
    }
}

/// Card scale X and Y, collapsed at frame 0 and full size at frame 10.
pub fn card_animations() -> Vec<Animation> {
    let keys = [(0.0, 0.0), (CARD_FRAMES, 1.0)];
    vec![
        Animation::float("label_scale_x", AnimatedProperty::LabelScaleX, CARD_FPS, &keys)
            .with_loop_mode(LoopMode::Constant),
        Animation::float("label_scale_y", AnimatedProperty::LabelScaleY, CARD_FPS, &keys)
            .with_loop_mode(LoopMode::Constant),
    ]
}

/// One full turn about Y while rising 0.2 and settling back.
pub fn idle_animations(position: Vec3, rotation: Vec3) -> Vec<Animation> {
    let spin = [(0.0, rotation), (IDLE_FRAMES, rotation + Vec3::new(0.0, TAU, 0.0))];
    let bob = [
        (0.0, position),
        (IDLE_FRAMES / 2.0, position + Vec3::new(0.0, IDLE_BOB, 0.0)),
        (IDLE_FRAMES, position),
    ];
    vec![
        Animation::vector("idle_rotation", AnimatedProperty::Rotation, IDLE_FPS, &spin),
        Animation::vector("idle_position", AnimatedProperty::Position, IDLE_FPS, &bob),
    ]
}

pub fn move_to_space_animations(position: Vec3, scaling: Vec3, destination: Vec3, factor: f32) -> Vec<Animation> {
    let grow = [(0.0, scaling), (SPACE_FRAMES, scaling * factor)];
    let fly = [(0.0, position), (SPACE_FRAMES, destination)];
    vec![
        Animation::vector("space_scaling", AnimatedProperty::Scaling, SPACE_FPS, &grow)
            .with_loop_mode(LoopMode::Constant)
            .with_easing(Easing::ease_in_out(EasingCurve::Sine)),
        Animation::vector("space_position", AnimatedProperty::Position, SPACE_FPS, &fly)
            .with_loop_mode(LoopMode::Constant)
            .with_easing(Easing::ease_in_out(EasingCurve::Sine)),
    ]
}
