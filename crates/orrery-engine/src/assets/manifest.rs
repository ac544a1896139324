use serde::{Deserialize, Serialize};
use crate::error::AssetResult;

/// Files a game loads at startup, by name.
/// Parsed from JSON pushed by the host, or built in code as a default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetManifest {
    #[serde(default)]
    pub meshes: Vec<MeshDescriptor>,
    #[serde(default)]
    pub textures: Vec<TextureDescriptor>,
    #[serde(default)]
    pub skybox: Option<SkyboxDescriptor>,
}

/// A model file; the loaded mesh takes `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshDescriptor {
    pub name: String,
    /// Relative path to the model (e.g., "assets/solarsystem/mars.glb").
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureDescriptor {
    pub name: String,
    pub path: String,
}

/// Equirectangular photo wrapped around the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkyboxDescriptor {
    pub path: String,
    #[serde(default = "default_sky_size")]
    pub size: f32,
    #[serde(default = "default_sky_resolution")]
    pub resolution: u32,
}

fn default_sky_size() -> f32 {
    1000.0
}

fn default_sky_resolution() -> u32 {
    32
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> AssetResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_mesh(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.meshes.push(MeshDescriptor { name: name.into(), path: path.into() });
        self
    }

    pub fn with_texture(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.textures.push(TextureDescriptor { name: name.into(), path: path.into() });
        self
    }

    pub fn with_skybox(mut self, path: impl Into<String>, size: f32, resolution: u32) -> Self {
        self.skybox = Some(SkyboxDescriptor { path: path.into(), size, resolution });
        self
    }

    pub fn mesh_path(&self, name: &str) -> Option<&str> {
        self.meshes.iter().find(|m| m.name == name).map(|m| m.path.as_str())
    }

    /// Mesh paths and names as parallel lists, in manifest order.
    pub fn mesh_lists(&self) -> (Vec<&str>, Vec<&str>) {
        self.meshes.iter().map(|m| (m.path.as_str(), m.name.as_str())).unzip()
    }

    /// Texture paths and names as parallel lists, in manifest order.
    pub fn texture_lists(&self) -> (Vec<&str>, Vec<&str>) {
        self.textures.iter().map(|t| (t.path.as_str(), t.name.as_str())).unzip()
    }
}
