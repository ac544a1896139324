use glam::Vec3;
use crate::core::bounds::Ray;

/// Input event types the engine understands.
/// Pointer events carry a world-space ray, from a mouse or an XR controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A press began along this ray.
    PointerDown { origin: Vec3, direction: Vec3 },
    /// A press ended along this ray.
    PointerUp { origin: Vec3, direction: Vec3 },
    /// The pointer moved; the ray is its new aim.
    PointerMove { origin: Vec3, direction: Vec3 },
    KeyDown { key_code: u32 },
    KeyUp { key_code: u32 },
    /// A custom event from the host page (HTML buttons, XR menu).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

impl InputEvent {
    /// The pointer ray, for pointer events. A zero-length aim has no ray.
    pub fn ray(&self) -> Option<Ray> {
        match *self {
            InputEvent::PointerDown { origin, direction }
            | InputEvent::PointerUp { origin, direction }
            | InputEvent::PointerMove { origin, direction } => {
                (direction.length_squared() > f32::EPSILON).then(|| Ray::new(origin, direction))
            }
            _ => None,
        }
    }
}

/// A queue of input events.
/// The host pushes events; the runner hands them to the game and clears them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
