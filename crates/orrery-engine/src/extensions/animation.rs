// extensions/animation.rs
//
// Keyframe animation, addressed by EntityId and kept outside Entity/Scene.
//
// Usage:
//   let spin = Animation::vector("spin", AnimatedProperty::Rotation, 60.0, &[(0.0, r0), (120.0, r1)]);
//   let id = ctx.animations.begin(planet, vec![spin], 0.0, 120.0, true);
//   ctx.animations.tick(dt, &mut ctx.scene);

use std::collections::HashMap;
use glam::Vec3;
use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::core::scene::Scene;
use super::easing::{lerp, lerp_vec3, Easing};

/// Entity property driven by an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimatedProperty {
    Position,
    /// Euler angles in radians.
    Rotation,
    Scaling,
    LabelScaleX,
    LabelScaleY,
    /// Material alpha.
    Alpha,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationValue {
    Float(f32),
    Vector(Vec3),
}

impl AnimationValue {
    fn lerp(self, other: AnimationValue, t: f32) -> AnimationValue {
        match (self, other) {
            (Self::Float(a), Self::Float(b)) => Self::Float(lerp(a, b, t)),
            (Self::Vector(a), Self::Vector(b)) => Self::Vector(lerp_vec3(a, b, t)),
            // Mixed keys never interpolate; hold the earlier one.
            (a, _) => a,
        }
    }
}

/// What happens when looping playback reaches the last frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopMode {
    /// Restart from the first frame.
    #[default]
    Cycle,
    /// Hold the final value.
    Constant,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub frame: f32,
    pub value: AnimationValue,
}

/// A keyed track for one property.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub name: String,
    pub property: AnimatedProperty,
    /// Frames per second of the key timeline.
    pub fps: f32,
    pub loop_mode: LoopMode,
    pub easing: Easing,
    keys: Vec<Keyframe>,
}

impl Animation {
    pub fn new(name: impl Into<String>, property: AnimatedProperty, fps: f32) -> Self {
        Self {
            name: name.into(),
            property,
            fps,
            loop_mode: LoopMode::Cycle,
            easing: Easing::LINEAR,
            keys: Vec::new(),
        }
    }

    /// Track with scalar keys, e.g. label scale.
    pub fn float(
        name: impl Into<String>,
        property: AnimatedProperty,
        fps: f32,
        keys: &[(f32, f32)],
    ) -> Self {
        Self::new(name, property, fps).with_keys(
            keys.iter()
                .map(|&(frame, v)| Keyframe { frame, value: AnimationValue::Float(v) })
                .collect(),
        )
    }

    /// Track with vector keys: position, rotation or scaling.
    pub fn vector(
        name: impl Into<String>,
        property: AnimatedProperty,
        fps: f32,
        keys: &[(f32, Vec3)],
    ) -> Self {
        Self::new(name, property, fps).with_keys(
            keys.iter()
                .map(|&(frame, v)| Keyframe { frame, value: AnimationValue::Vector(v) })
                .collect(),
        )
    }

    /// Replace the keys. They are kept sorted by frame.
    pub fn with_keys(mut self, mut keys: Vec<Keyframe>) -> Self {
        keys.sort_by(|a, b| a.frame.total_cmp(&b.frame));
        self.keys = keys;
        self
    }

    pub fn with_loop_mode(mut self, mode: LoopMode) -> Self {
        self.loop_mode = mode;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Value at `frame`. Frames outside the key range clamp to the end keys.
    pub fn sample(&self, frame: f32) -> Option<AnimationValue> {
        let (lo, hi, t) = key_span(&self.keys, frame)?;
        let a = self.keys[lo].value;
        if lo == hi {
            return Some(a);
        }
        Some(a.lerp(self.keys[hi].value, self.easing.apply(t)))
    }

    fn apply(&self, entity: &mut Entity, value: AnimationValue) {
        match (self.property, value) {
            (AnimatedProperty::Position, AnimationValue::Vector(v)) => entity.transform.position = v,
            (AnimatedProperty::Rotation, AnimationValue::Vector(v)) => entity.transform.rotation = v,
            (AnimatedProperty::Scaling, AnimationValue::Vector(v)) => entity.transform.scaling = v,
            (AnimatedProperty::LabelScaleX, AnimationValue::Float(v)) => {
                if let Some(label) = &mut entity.label {
                    label.scale_x = v;
                }
            }
            (AnimatedProperty::LabelScaleY, AnimationValue::Float(v)) => {
                if let Some(label) = &mut entity.label {
                    label.scale_y = v;
                }
            }
            (AnimatedProperty::Alpha, AnimationValue::Float(v)) => entity.material.alpha = v,
            (property, value) => {
                log::debug!("animation {}: {value:?} does not fit {property:?}", self.name);
            }
        }
    }
}

/// Bounding key indices and the blend factor between them.
fn key_span(keys: &[Keyframe], frame: f32) -> Option<(usize, usize, f32)> {
    let last = keys.len().checked_sub(1)?;
    if last == 0 || frame <= keys[0].frame {
        return Some((0, 0, 0.0));
    }
    if frame >= keys[last].frame {
        return Some((last, last, 0.0));
    }

    let mut lo = 0;
    let mut hi = last;
    while lo < hi - 1 {
        let mid = (lo + hi) / 2;
        if keys[mid].frame <= frame {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    let span = keys[hi].frame - keys[lo].frame;
    let t = if span > 0.0 { (frame - keys[lo].frame) / span } else { 0.0 };
    Some((lo, hi, t))
}

/// Accumulated float time may land a hair short of the last frame.
const FRAME_EPSILON: f32 = 1e-3;

/// Handle to a running set of animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(pub u32);

/// Animations started together on one target.
#[derive(Debug, Clone)]
struct Animatable {
    target: EntityId,
    animations: Vec<Animation>,
    from: f32,
    to: f32,
    looping: bool,
    elapsed: f32,
    on_complete: Option<u32>,
}

impl Animatable {
    /// Current frame of one track and whether that track is done.
    fn frame_of(&self, animation: &Animation) -> (f32, bool) {
        let span = (self.to - self.from).abs();
        let direction = if self.to >= self.from { 1.0 } else { -1.0 };
        let travelled = self.elapsed * animation.fps;
        if span <= 0.0 {
            return (self.from, !self.looping);
        }

        let (offset, done) = match (self.looping, animation.loop_mode) {
            (true, LoopMode::Cycle) => (travelled.rem_euclid(span), false),
            _ => {
                let done = travelled >= span - FRAME_EPSILON;
                (if done { span } else { travelled }, done)
            }
        };
        (self.from + direction * offset, done)
    }
}

/// All running animatables.
#[derive(Debug, Default)]
pub struct AnimationState {
    running: HashMap<AnimationId, Animatable>,
    next_id: u32,
    completed: Vec<AnimationId>,
    completed_events: Vec<u32>,
}

impl AnimationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Play `animations` on `target` from frame `from` to frame `to`.
    /// Playback runs backwards when `from > to`. Anything already playing on
    /// the same target is stopped first.
    pub fn begin(
        &mut self,
        target: EntityId,
        animations: Vec<Animation>,
        from: f32,
        to: f32,
        looping: bool,
    ) -> AnimationId {
        self.stop(target);
        let id = AnimationId(self.next_id);
        self.next_id += 1;
        self.running.insert(id, Animatable {
            target,
            animations,
            from,
            to,
            looping,
            elapsed: 0.0,
            on_complete: None,
        });
        id
    }

    /// Report `event_id` through `drain_events` when `id` completes.
    pub fn set_on_complete(&mut self, id: AnimationId, event_id: u32) {
        if let Some(a) = self.running.get_mut(&id) {
            a.on_complete = Some(event_id);
        }
    }

    /// Stop everything playing on `target`, leaving properties where they are.
    pub fn stop(&mut self, target: EntityId) {
        self.running.retain(|_, a| a.target != target);
    }

    pub fn is_playing(&self, id: AnimationId) -> bool {
        self.running.contains_key(&id)
    }

    pub fn is_animating(&self, target: EntityId) -> bool {
        self.running.values().any(|a| a.target == target)
    }

    /// Advance every animatable by `dt` seconds and write sampled values.
    /// Returns the number that completed this tick.
    pub fn tick(&mut self, dt: f32, scene: &mut Scene) -> usize {
        let mut finished = Vec::new();

        for (&id, animatable) in self.running.iter_mut() {
            animatable.elapsed += dt;
            let mut all_done = true;

            let entity = scene.get_mut(animatable.target);
            let Some(entity) = entity else {
                finished.push(id);
                continue;
            };

            for animation in &animatable.animations {
                let (frame, done) = animatable.frame_of(animation);
                all_done &= done;
                if let Some(value) = animation.sample(frame) {
                    animation.apply(entity, value);
                }
            }

            if all_done {
                finished.push(id);
            }
        }

        finished.sort();
        for id in &finished {
            if let Some(a) = self.running.remove(id) {
                if let Some(event_id) = a.on_complete {
                    self.completed_events.push(event_id);
                }
            }
        }
        let count = finished.len();
        self.completed.extend(finished);
        count
    }

    /// Ids that completed since the last drain.
    pub fn drain_completed(&mut self) -> Vec<AnimationId> {
        std::mem::take(&mut self.completed)
    }

    /// Completion event ids registered with `set_on_complete`.
    pub fn drain_events(&mut self) -> impl Iterator<Item = u32> + '_ {
        self.completed_events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.running.len()
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }

    pub fn clear(&mut self) {
        self.running.clear();
        self.completed.clear();
        self.completed_events.clear();
    }
}
