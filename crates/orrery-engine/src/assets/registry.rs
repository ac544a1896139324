use std::collections::HashMap;
use crate::assets::loader::{MeshAsset, TextureAsset};
use crate::components::mesh::MeshComponent;

/// Loaded assets by name, for game code to build entities from.
#[derive(Debug, Default)]
pub struct AssetRegistry {
    meshes: HashMap<String, MeshAsset>,
    textures: HashMap<String, TextureAsset>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_meshes(meshes: impl IntoIterator<Item = MeshAsset>) -> Self {
        let mut registry = Self::new();
        for mesh in meshes {
            registry.insert_mesh(mesh);
        }
        registry
    }

    pub fn insert_mesh(&mut self, mesh: MeshAsset) {
        self.meshes.insert(mesh.name.clone(), mesh);
    }

    pub fn insert_texture(&mut self, texture: TextureAsset) {
        self.textures.insert(texture.name.clone(), texture);
    }

    pub fn mesh(&self, name: &str) -> Option<&MeshAsset> {
        self.meshes.get(name)
    }

    pub fn texture(&self, name: &str) -> Option<&TextureAsset> {
        self.textures.get(name)
    }

    pub fn textures(&self) -> impl Iterator<Item = &TextureAsset> {
        self.textures.values()
    }

    /// Mesh component for a loaded model. Returns None if not found.
    pub fn mesh_component(&self, name: &str) -> Option<MeshComponent> {
        let mesh = self.meshes.get(name)?;
        Some(MeshComponent::model(mesh.path.clone(), mesh.handle, mesh.bounding_radius))
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::mesh::{MeshShape, ModelHandle};

    fn asset(name: &str, handle: u32) -> MeshAsset {
        MeshAsset {
            name: name.into(),
            path: format!("assets/solarsystem/{}.glb", name.to_lowercase()),
            handle: ModelHandle(handle),
            bounding_radius: 2.0,
        }
    }

    #[test]
    fn builds_model_components_by_name() {
        let reg = AssetRegistry::from_meshes([asset("Saturn", 6), asset("Uranus", 7)]);
        assert_eq!(reg.mesh_count(), 2);

        let mesh = reg.mesh_component("Saturn").expect("Saturn should exist");
        assert_eq!(mesh.bounding_radius, 2.0);
        match mesh.shape {
            MeshShape::Model { handle, .. } => assert_eq!(handle, ModelHandle(6)),
            other => panic!("expected a model, got {other:?}"),
        }
    }

    #[test]
    fn textures_are_kept_by_name() {
        let mut reg = AssetRegistry::new();
        reg.insert_texture(TextureAsset {
            name: "Mercury".into(),
            path: "assets/textures/planets/mercury.jpg".into(),
            handle: 1,
            width: 512,
            height: 256,
        });
        assert_eq!(reg.texture("Mercury").map(|t| t.width), Some(512));
        assert_eq!(reg.textures().count(), 1);
        assert!(reg.texture("Venus").is_none());
    }

    #[test]
    fn unknown_returns_none() {
        let reg = AssetRegistry::new();
        assert!(reg.mesh("Pluto").is_none());
        assert!(reg.mesh_component("Pluto").is_none());
    }
}
