/// Label snapshots for the host's text toolkit.

use serde::Serialize;

use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::components::label::LabelComponent;

/// One label and where it is anchored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelSnapshot<'a> {
    pub entity: EntityId,
    /// World position of the entity the label is linked to.
    pub anchor: [f32; 3],
    pub rotation: [f32; 4],
    #[serde(flatten)]
    pub label: &'a LabelComponent,
}

/// Collect labels of active entities.
pub fn collect_labels<'a>(entities: impl Iterator<Item = &'a Entity>) -> Vec<LabelSnapshot<'a>> {
    entities
        .filter(|e| e.active)
        .filter_map(|e| {
            let label = e.label.as_ref()?;
            Some(LabelSnapshot {
                entity: e.id,
                anchor: e.world_position().to_array(),
                rotation: e.world_rotation().to_array(),
                label,
            })
        })
        .collect()
}

pub fn labels_json<'a>(entities: impl Iterator<Item = &'a Entity>) -> String {
    serde_json::to_string(&collect_labels(entities)).unwrap_or_else(|err| {
        log::error!("label snapshot failed: {err}");
        String::from("[]")
    })
}
