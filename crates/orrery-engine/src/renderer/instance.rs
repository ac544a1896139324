use bytemuck::{Pod, Zeroable};

/// Per-instance render data read by the host renderer.
/// Must match the host protocol: 17 floats = 68 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// World-space position.
    pub position: [f32; 3],
    /// World-space rotation quaternion (x, y, z, w).
    pub rotation: [f32; 4],
    /// World-space scale.
    pub scale: [f32; 3],
    /// Diffuse color and alpha.
    pub color: [f32; 4],
    /// `MeshShape::kind_code` of the entity's mesh.
    pub mesh_kind: f32,
    /// Entity id, so the host can look up model handles and labels.
    pub entity_id: f32,
    /// Host handle of the diffuse texture, or -1 for none.
    pub texture: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 17;
    pub const NO_TEXTURE: f32 = -1.0;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Render buffer containing all mesh instances for a frame.
pub struct RenderBuffer {
    pub instances: Vec<RenderInstance>,
    capacity: usize,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Add an instance. Returns false when the buffer is full.
    pub fn push(&mut self, instance: RenderInstance) -> bool {
        if self.instances.len() >= self.capacity {
            return false;
        }
        self.instances.push(instance);
        true
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Instance data as flat floats.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Raw pointer to instance data for shared memory reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
