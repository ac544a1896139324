use glam::Vec3;
use serde::Serialize;

/// First-person camera the user walks around with (and the XR rig's start pose).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UserCamera {
    pub position: Vec3,
    /// Point the camera looks at when the scene starts.
    pub target: Vec3,
    /// Movement speed in units per key press tick.
    pub speed: f32,
    /// Near clip distance.
    pub min_z: f32,
    pub check_collisions: bool,
    pub apply_gravity: bool,
    /// Half-extents of the collision ellipsoid.
    pub ellipsoid: Vec3,
}

impl Default for UserCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.6, -5.0),
            target: Vec3::ZERO,
            speed: 1.0,
            min_z: 0.1,
            check_collisions: false,
            apply_gravity: false,
            ellipsoid: Vec3::new(0.5, 1.0, 0.5),
        }
    }
}

impl UserCamera {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            ..Self::default()
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_collisions(mut self, enabled: bool) -> Self {
        self.check_collisions = enabled;
        self
    }
}
