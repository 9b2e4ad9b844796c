//! Wall fills derived from a single base color.

use serde::{Deserialize, Serialize};
use tvroom_core::{Brush, Color, ColorStop, Modifier, Tile, adjust_color};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallTexture {
    #[default]
    Paint,
    Wood,
    Wallpaper,
}

impl WallTexture {
    /// Unrecognized names paint the wall.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "paint" => WallTexture::Paint,
            "wood" => WallTexture::Wood,
            "wallpaper" => WallTexture::Wallpaper,
            other => {
                log::debug!("unknown wall texture `{other}`, using paint");
                WallTexture::Paint
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WallTexture::Paint => "paint",
            WallTexture::Wood => "wood",
            WallTexture::Wallpaper => "wallpaper",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallAppearance {
    #[serde(rename = "wallColor")]
    pub color: String,
    #[serde(rename = "wallTexture")]
    pub texture: WallTexture,
}

impl Default for WallAppearance {
    fn default() -> Self {
        Self {
            color: "#e8d0b3".into(),
            texture: WallTexture::Paint,
        }
    }
}

impl WallAppearance {
    pub fn new(color: impl Into<String>, texture: WallTexture) -> Self {
        Self {
            color: color.into(),
            texture,
        }
    }

    pub fn fill(&self) -> FillDescription {
        resolve(self.texture, &self.color)
    }
}

/// Background of the wall: a brush, optionally tiled, optionally with an inner
/// shadow.
#[derive(Clone, Debug, PartialEq)]
pub struct FillDescription {
    pub brush: Brush,
    pub tile: Option<Tile>,
    pub inset_shadow: Option<(f32, Color)>,
}

impl FillDescription {
    pub fn apply(&self, m: Modifier) -> Modifier {
        let mut m = m.background_brush(self.brush.clone());
        if let Some(tile) = self.tile {
            m = m.background_tile(tile);
        }
        if let Some((blur, color)) = self.inset_shadow {
            m = m.inset_shadow(blur, color);
        }
        m
    }

    /// Equivalent CSS declarations, one per line.
    pub fn to_css(&self) -> String {
        let mut out = Vec::new();
        match self.tile {
            Some(tile) => {
                out.push(format!("background-image: {};", self.brush.to_css()));
                let axis = |v: Option<f32>| v.map_or("100%".to_string(), |v| format!("{v}px"));
                out.push(format!(
                    "background-size: {} {};",
                    axis(tile.width),
                    axis(tile.height)
                ));
            }
            None => out.push(format!("background: {};", self.brush.to_css())),
        }
        if let Some((blur, color)) = self.inset_shadow {
            out.push(format!("box-shadow: inset 0 0 {blur}px {};", color.to_css()));
        }
        out.join("\n")
    }
}

const PAINT_ANGLE: f32 = 170.0;
const PAINT_SHADE: i32 = -15;
const PAINT_SHADOW_BLUR: f32 = 100.0;
const WOOD_PLANK: f32 = 20.0;
const WOOD_SEAM: f32 = 2.0;
const WOOD_SHADE: i32 = -10;
const WALLPAPER_DOT: f32 = 0.5;
const WALLPAPER_SPREAD: f32 = 15.0;
const WALLPAPER_TILE: f32 = 20.0;
const WALLPAPER_TINT: i32 = 5;

/// Maps a texture and base color to the wall's fill.
///
/// An invalid base color degrades to black through [`adjust_color`]; it never
/// fails.
pub fn resolve(texture: WallTexture, base_color: &str) -> FillDescription {
    let base = Color::from_hex(base_color);
    let shade = |amount: i32| Color::from_hex(&adjust_color(base_color, amount));

    match texture {
        WallTexture::Paint => FillDescription {
            brush: Brush::Linear {
                angle_deg: PAINT_ANGLE,
                stops: vec![
                    ColorStop::percent(base, 0.0),
                    ColorStop::percent(shade(PAINT_SHADE), 100.0),
                ],
            },
            tile: None,
            inset_shadow: Some((PAINT_SHADOW_BLUR, Color(0, 0, 0, 26))),
        },
        WallTexture::Wood => {
            let seam = shade(WOOD_SHADE);
            let plank_end = WOOD_PLANK;
            let seam_end = WOOD_PLANK + WOOD_SEAM;
            let tile = seam_end + WOOD_PLANK;
            FillDescription {
                brush: Brush::Linear {
                    angle_deg: 90.0,
                    stops: vec![
                        ColorStop::px(base, 0.0),
                        ColorStop::px(base, plank_end),
                        ColorStop::px(seam, plank_end),
                        ColorStop::px(seam, seam_end),
                        ColorStop::px(base, seam_end),
                        ColorStop::px(base, tile),
                    ],
                },
                tile: Some(Tile {
                    width: Some(tile),
                    height: None,
                }),
                inset_shadow: None,
            }
        }
        WallTexture::Wallpaper => {
            let dot = shade(WALLPAPER_TINT);
            FillDescription {
                brush: Brush::Radial {
                    cx: 50.0,
                    cy: 50.0,
                    stops: vec![
                        ColorStop::percent(dot, 0.0),
                        ColorStop::px(dot, WALLPAPER_DOT),
                        ColorStop::px(base, WALLPAPER_DOT),
                        ColorStop::px(base, WALLPAPER_SPREAD),
                    ],
                },
                tile: Some(Tile {
                    width: Some(WALLPAPER_TILE),
                    height: Some(WALLPAPER_TILE),
                }),
                inset_shadow: None,
            }
        }
    }
}
