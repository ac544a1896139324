/// Scene-wide lighting and camera setup the host applies.
///
/// These change rarely (once at scene setup), so the host fetches them as a
/// JSON snapshot instead of through the per-frame instance buffer.

use glam::Vec3;
use serde::Serialize;

use crate::components::material::Color3;
use crate::renderer::camera::UserCamera;

/// Sky/ground light coming from one direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HemisphericLight {
    /// Direction pointing towards the sky.
    pub direction: Vec3,
    pub intensity: f32,
    pub diffuse: Color3,
    /// Color for surfaces facing away from `direction`.
    pub ground: Color3,
}

impl HemisphericLight {
    pub fn new(direction: Vec3, intensity: f32) -> Self {
        Self {
            direction,
            intensity,
            diffuse: Color3::WHITE,
            ground: Color3::BLACK,
        }
    }
}

impl Default for HemisphericLight {
    fn default() -> Self {
        Self::new(Vec3::Y, 1.0)
    }
}

/// Skydome around the scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhotoDome {
    pub texture: String,
    pub size: f32,
    pub resolution: u32,
}

/// Light, camera and sky for the current scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EnvironmentState {
    pub light: HemisphericLight,
    pub camera: UserCamera,
    pub dome: Option<PhotoDome>,
    /// Whether the host should offer entering immersive XR.
    pub xr_enabled: bool,
    /// Bumped on every change so the host can skip re-reading.
    pub revision: u32,
}

impl EnvironmentState {
    pub fn set_light(&mut self, light: HemisphericLight) {
        self.light = light;
        self.revision += 1;
    }

    pub fn set_camera(&mut self, camera: UserCamera) {
        self.camera = camera;
        self.revision += 1;
    }

    pub fn set_dome(&mut self, dome: PhotoDome) {
        self.dome = Some(dome);
        self.revision += 1;
    }

    pub fn enable_xr(&mut self) {
        self.xr_enabled = true;
        self.revision += 1;
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|err| {
            log::error!("environment snapshot failed: {err}");
            String::from("{}")
        })
    }
}
