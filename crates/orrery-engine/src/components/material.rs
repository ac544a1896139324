use serde::Serialize;

/// Linear RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color3 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color3 {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color3 {
    fn default() -> Self {
        Self::WHITE
    }
}

/// A texture the host has loaded, by path and host handle.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureRef {
    pub path: String,
    pub handle: u32,
}

/// Standard material: diffuse color, opacity and an optional diffuse texture.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub diffuse: Color3,
    /// 0.0 = fully transparent, 1.0 = opaque.
    pub alpha: f32,
    pub texture: Option<TextureRef>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse: Color3::WHITE,
            alpha: 1.0,
            texture: None,
        }
    }
}

impl Material {
    pub fn colored(diffuse: Color3, alpha: f32) -> Self {
        Self { diffuse, alpha, texture: None }
    }
}
