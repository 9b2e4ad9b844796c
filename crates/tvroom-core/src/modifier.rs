use taffy::{AlignItems, JustifyContent};

use crate::{Brush, Color, Size};

#[derive(Clone, Debug, PartialEq)]
pub struct Border {
    pub width: f32,
    pub color: Color,
    pub radius: f32,
}

/// `inset 0 0 <blur>px <color>` style shadow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InsetShadow {
    pub blur: f32,
    pub color: Color,
}

/// Multiplicative brightness/contrast transform, in percent (100 = identity).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Filter {
    pub brightness: f32,
    pub contrast: f32,
}

impl Filter {
    pub fn to_css(&self) -> String {
        format!(
            "brightness({}%) contrast({}%)",
            self.brightness, self.contrast
        )
    }
}

/// Pattern tile for repeating backgrounds. `None` on an axis means 100%.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tile {
    pub width: Option<f32>,
    pub height: Option<f32>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Modifier {
    pub size: Option<Size>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub fill_max: bool,
    pub fill_max_w: bool,
    pub padding: Option<f32>,
    pub background: Option<Brush>,
    pub background_tile: Option<Tile>,
    pub inset_shadow: Option<InsetShadow>,
    pub border: Option<Border>,
    pub filter: Option<Filter>,
    pub alpha: Option<f32>,
    pub flex_grow: Option<f32>,
    pub justify_content: Option<JustifyContent>,
    pub align_items: Option<AlignItems>,
    pub absolute: bool,
    pub offset_left: Option<f32>,
    pub offset_top: Option<f32>,
    pub offset_right: Option<f32>,
    pub z_index: f32,
}

impl Modifier {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn size(mut self, w: f32, h: f32) -> Self {
        self.size = Some(Size {
            width: w,
            height: h,
        });
        self
    }
    pub fn height(mut self, h: f32) -> Self {
        self.height = Some(h);
        self
    }
    pub fn fill_max_size(mut self) -> Self {
        self.fill_max = true;
        self
    }
    pub fn fill_max_width(mut self) -> Self {
        self.fill_max_w = true;
        self
    }
    pub fn padding(mut self, v: f32) -> Self {
        self.padding = Some(v);
        self
    }
    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(Brush::Solid(color));
        self
    }
    pub fn background_brush(mut self, brush: Brush) -> Self {
        self.background = Some(brush);
        self
    }
    pub fn background_tile(mut self, tile: Tile) -> Self {
        self.background_tile = Some(tile);
        self
    }
    pub fn inset_shadow(mut self, blur: f32, color: Color) -> Self {
        self.inset_shadow = Some(InsetShadow { blur, color });
        self
    }
    pub fn border(mut self, width: f32, color: Color, radius: f32) -> Self {
        self.border = Some(Border {
            width,
            color,
            radius,
        });
        self
    }
    pub fn filter(mut self, brightness: f32, contrast: f32) -> Self {
        self.filter = Some(Filter {
            brightness,
            contrast,
        });
        self
    }
    pub fn alpha(mut self, a: f32) -> Self {
        self.alpha = Some(a.clamp(0.0, 1.0));
        self
    }
    pub fn flex_grow(mut self, v: f32) -> Self {
        self.flex_grow = Some(v);
        self
    }
    pub fn justify_content(mut self, j: JustifyContent) -> Self {
        self.justify_content = Some(j);
        self
    }
    pub fn align_items(mut self, a: AlignItems) -> Self {
        self.align_items = Some(a);
        self
    }
    pub fn absolute(mut self) -> Self {
        self.absolute = true;
        self
    }
    pub fn offset(mut self, left: Option<f32>, top: Option<f32>, right: Option<f32>) -> Self {
        self.offset_left = left;
        self.offset_top = top;
        self.offset_right = right;
        self
    }
    pub fn z_index(mut self, z: f32) -> Self {
        self.z_index = z;
        self
    }
}
