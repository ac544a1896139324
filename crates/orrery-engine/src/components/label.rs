//! Text labels drawn by the host's GUI toolkit.
//!
//! The engine only carries what to show and how large; layout and text
//! rasterisation are left to the host.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum VerticalAlign {
    Top,
    #[default]
    Center,
    Bottom,
}

/// Where a label lives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum LabelKind {
    /// Screen-space card linked to the entity, offset in pixels.
    Card {
        width_px: f32,
        height_px: f32,
        link_offset_x: f32,
        link_offset_y: f32,
        corner_radius: f32,
    },
    /// World-space plane textured with the text. 100 texels per unit.
    Plane { width: f32, height: f32 },
}

/// A block of text attached to an entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelComponent {
    pub kind: LabelKind,
    pub text: String,
    pub font_size: f32,
    pub color: String,
    pub background: String,
    pub alpha: f32,
    /// Animated card scale; cards start collapsed.
    pub scale_x: f32,
    pub scale_y: f32,
    pub vertical_align: VerticalAlign,
    pub padding_px: f32,
    pub wrap: bool,
}

impl LabelComponent {
    /// White card with black wrapped text, collapsed until shown.
    pub fn card(text: impl Into<String>, width_px: f32, height_px: f32) -> Self {
        Self {
            kind: LabelKind::Card {
                width_px,
                height_px,
                link_offset_x: width_px / 2.0,
                link_offset_y: -height_px / 2.0,
                corner_radius: 30.0,
            },
            text: text.into(),
            font_size: 14.0,
            color: "Black".into(),
            background: "White".into(),
            alpha: 0.9,
            scale_x: 0.0,
            scale_y: 0.0,
            vertical_align: VerticalAlign::Top,
            padding_px: 20.0,
            wrap: true,
        }
    }

    /// Text plane with a white background.
    pub fn plane(text: impl Into<String>, width: f32, height: f32, font_size: f32) -> Self {
        Self {
            kind: LabelKind::Plane { width, height },
            text: text.into(),
            font_size,
            color: "black".into(),
            background: "white".into(),
            alpha: 1.0,
            scale_x: 1.0,
            scale_y: 1.0,
            vertical_align: VerticalAlign::Center,
            padding_px: 0.0,
            wrap: false,
        }
    }

    pub fn with_vertical_align(mut self, align: VerticalAlign) -> Self {
        self.vertical_align = align;
        self
    }

    pub fn with_padding(mut self, padding_px: f32) -> Self {
        self.padding_px = padding_px;
        self
    }

    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    /// Texture resolution the host should allocate for a plane label.
    pub fn texture_size(&self) -> Option<(u32, u32)> {
        match self.kind {
            LabelKind::Plane { width, height } => {
                Some(((width * 100.0) as u32, (height * 100.0) as u32))
            }
            LabelKind::Card { .. } => None,
        }
    }

    pub fn is_shown(&self) -> bool {
        self.scale_x > 0.0 && self.scale_y > 0.0
    }
}
