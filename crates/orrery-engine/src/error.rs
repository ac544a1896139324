//! Error types shared across the engine.

use thiserror::Error;

use crate::api::types::EntityId;
use crate::assets::manager::TaskId;

/// Result type for asset loading.
pub type AssetResult<T> = Result<T, AssetError>;

/// Errors produced while loading assets through the host.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssetError {
    #[error("failed to load {path}: {reason}")]
    LoadFailed { path: String, reason: String },

    #[error("load of {0} was cancelled before the host answered")]
    Cancelled(String),

    #[error("unknown asset task {0:?}")]
    UnknownTask(TaskId),

    #[error("asset task {0:?} already completed")]
    AlreadyCompleted(TaskId),

    #[error("expected {expected} names for the requested paths, got {got}")]
    NameCountMismatch { expected: usize, got: usize },

    #[error("asset {0} resolved to the wrong kind of asset")]
    WrongKind(String),

    #[error("manifest error: {0}")]
    Manifest(String),
}

impl From<serde_json::Error> for AssetError {
    fn from(err: serde_json::Error) -> Self {
        AssetError::Manifest(err.to_string())
    }
}

/// Errors produced while wiring up a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("entity {0:?} not found")]
    UnknownEntity(EntityId),

    #[error("no entity named {0}")]
    UnknownName(String),

    #[error("{0} is missing a mesh")]
    MissingMesh(String),

    #[error("parenting {child:?} under {parent:?} would create a cycle")]
    Cycle { child: EntityId, parent: EntityId },
}
