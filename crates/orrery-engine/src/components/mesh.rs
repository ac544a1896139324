use serde::Serialize;

/// Handle the host assigns to a loaded model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ModelHandle(pub u32);

/// Geometry the host should draw for an entity.
#[derive(Debug, Clone, PartialEq)]
pub enum MeshShape {
    /// A model loaded through the asset loader.
    Model { asset: String, handle: ModelHandle },
    Sphere { diameter: f32, segments: u32 },
    Cylinder { height: f32, diameter: f32 },
    /// Vertical plane in the local XY plane.
    Plane { width: f32, height: f32, double_sided: bool },
    /// Horizontal plane in the local XZ plane.
    Ground { width: f32, depth: f32 },
}

impl MeshShape {
    /// Numeric kind written into the render instance.
    pub fn kind_code(&self) -> f32 {
        match self {
            MeshShape::Model { .. } => 0.0,
            MeshShape::Sphere { .. } => 1.0,
            MeshShape::Cylinder { .. } => 2.0,
            MeshShape::Plane { .. } => 3.0,
            MeshShape::Ground { .. } => 4.0,
        }
    }

    /// Radius of a sphere enclosing the unscaled primitive.
    fn enclosing_radius(&self) -> f32 {
        match *self {
            MeshShape::Model { .. } => 0.5,
            MeshShape::Sphere { diameter, .. } => diameter * 0.5,
            MeshShape::Cylinder { height, diameter } => {
                (diameter * diameter + height * height).sqrt() * 0.5
            }
            MeshShape::Plane { width, height, .. } => (width * width + height * height).sqrt() * 0.5,
            MeshShape::Ground { width, depth } => (width * width + depth * depth).sqrt() * 0.5,
        }
    }
}

/// Component describing renderable geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshComponent {
    pub shape: MeshShape,
    /// Local-space bounding radius, used for picking.
    pub bounding_radius: f32,
}

impl MeshComponent {
    pub fn new(shape: MeshShape) -> Self {
        let bounding_radius = shape.enclosing_radius();
        Self { shape, bounding_radius }
    }

    pub fn sphere(diameter: f32) -> Self {
        Self::new(MeshShape::Sphere { diameter, segments: 32 })
    }

    pub fn cylinder(height: f32, diameter: f32) -> Self {
        Self::new(MeshShape::Cylinder { height, diameter })
    }

    pub fn plane(width: f32, height: f32) -> Self {
        Self::new(MeshShape::Plane { width, height, double_sided: false })
    }

    pub fn ground(width: f32, depth: f32) -> Self {
        Self::new(MeshShape::Ground { width, depth })
    }

    /// A loaded model; the host reports its bounding radius.
    pub fn model(asset: impl Into<String>, handle: ModelHandle, bounding_radius: f32) -> Self {
        Self {
            shape: MeshShape::Model { asset: asset.into(), handle },
            bounding_radius,
        }
    }

    pub fn double_sided(mut self) -> Self {
        if let MeshShape::Plane { ref mut double_sided, .. } = self.shape {
            *double_sided = true;
        }
        self
    }

    pub fn model_handle(&self) -> Option<ModelHandle> {
        match self.shape {
            MeshShape::Model { handle, .. } => Some(handle),
            _ => None,
        }
    }
}
