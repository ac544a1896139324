// extensions/mod.rs
//
// Systems kept outside Entity/Scene; they address entities by id.

pub mod animation;
pub mod drag;
pub mod easing;
pub mod transform;

pub use animation::{
    AnimatedProperty, Animation, AnimationId, AnimationState, AnimationValue, Keyframe, LoopMode,
};
pub use drag::{DragMode, PointerDragBehavior};
pub use easing::{ease, ease_vec3, lerp, lerp_vec3, Easing, EasingCurve, EasingMode};
pub use transform::TransformGraph;
