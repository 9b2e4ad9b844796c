use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tvroom_core::{Color, Error, Modifier, Size, View};

use crate::{Box, Text, ViewExt, debug_log};

pub const STAND_KEY: &str = "tv-stand";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StandHeight {
    Short,
    #[default]
    Medium,
    Large,
}

impl StandHeight {
    pub fn as_str(self) -> &'static str {
        match self {
            StandHeight::Short => "short",
            StandHeight::Medium => "medium",
            StandHeight::Large => "large",
        }
    }

    /// Height in dp.
    pub fn dp(self) -> f32 {
        match self {
            StandHeight::Short => 60.0,
            StandHeight::Medium => 90.0,
            StandHeight::Large => 120.0,
        }
    }
}

impl FromStr for StandHeight {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short" => Ok(StandHeight::Short),
            "medium" => Ok(StandHeight::Medium),
            "large" => Ok(StandHeight::Large),
            other => Err(Error::InvalidStandHeight(other.to_string())),
        }
    }
}

impl std::fmt::Display for StandHeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cabinet under the TV: top, body and base. Matches the TV's width; the
/// height comes from the preset.
pub struct Stand;

impl Stand {
    /// `measured` is the stand's last laid-out size; until there is one the
    /// debug label shows the nominal size.
    pub fn view(height: StandHeight, width: f32, show_debug: bool, measured: Option<Size>) -> View {
        let nominal = Size::new(width, height.dp());
        let shown = measured.unwrap_or(nominal);
        debug_log!(show_debug, "[Stand] {height} {}x{}", shown.width, shown.height);

        let top = Box(Modifier::new()
            .fill_max_width()
            .height(8.0)
            .background(Color::from_hex("#5c3d2e")));
        let body = Box(Modifier::new()
            .fill_max_width()
            .flex_grow(1.0)
            .background(Color::from_hex("#4a3024"))
            .border(1.0, Color::from_hex("#3b2519"), 4.0));
        let base = Box(Modifier::new()
            .fill_max_width()
            .height(10.0)
            .background(Color::from_hex("#3b2519")));

        Box(Modifier::new().size(nominal.width, nominal.height))
            .key(STAND_KEY)
            .child((
                top,
                body,
                base,
                show_debug.then(|| {
                    Box(Modifier::new()
                        .absolute()
                        .offset(Some(0.0), Some(0.0), None)
                        .z_index(10.0))
                    .key("tv-stand-debug")
                    .child(Text(debug_label(height, shown)))
                }),
            ))
    }
}

fn debug_label(height: StandHeight, size: Size) -> String {
    format!("Stand: {height} ({}x{})", size.width.round(), size.height.round())
}
