pub mod api;
pub mod assets;
pub mod bridge;
pub mod components;
pub mod core;
pub mod error;
pub mod extensions;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::game::{EngineContext, Game, GameConfig};
pub use api::types::{EntityId, GameEvent};
pub use assets::loader::{poll_now, AssetLoader, MeshAsset, TextureAsset};
pub use assets::manager::{AssetKind, AssetPayload, AssetRequest, AssetsManager, TaskId};
pub use assets::manifest::AssetManifest;
pub use assets::registry::AssetRegistry;
pub use bridge::protocol::ProtocolLayout;
pub use components::entity::{Entity, Transform};
pub use components::label::{LabelComponent, LabelKind, VerticalAlign};
pub use components::material::{Color3, Material, TextureRef};
pub use components::mesh::{MeshComponent, MeshShape, ModelHandle};
pub use core::bounds::{BoundingSphere, Ray, SphereCollider};
pub use core::scene::{PickInfo, Scene};
pub use core::time::FixedTimestep;
pub use error::{AssetError, AssetResult, SceneError};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::camera::UserCamera;
pub use renderer::instance::{RenderBuffer, RenderInstance};
pub use systems::lighting::{EnvironmentState, HemisphericLight, PhotoDome};

// Extensions: systems kept outside Entity/Scene
pub use extensions::{
    ease, ease_vec3, lerp, lerp_vec3, AnimatedProperty, Animation, AnimationId, AnimationState,
    AnimationValue, DragMode, Easing, EasingCurve, EasingMode, Keyframe, LoopMode,
    PointerDragBehavior, TransformGraph,
};
