#![allow(non_snake_case)]
//! The room: wall, TV, stand and light switch, plus the primitives they are
//! built from and the layout pass used for debug measurement.

pub mod layout;
pub mod light_switch;
pub mod measure;
pub mod room;
pub mod stand;
#[cfg(test)]
mod testing;
pub mod tv;
pub mod wall;

use std::rc::Rc;

use tvroom_core::*;

pub use layout::{LayoutRects, layout};
pub use light_switch::{LightSwitch, SwitchMode};
pub use measure::{DebugMeasurer, Measured};
pub use room::{Room, RoomConfig, RoomEvent, RoomReducer, RoomState, display_settings_for};
pub use stand::{Stand, StandHeight};
pub use tv::{DisplaySettings, Tv, TvProps, TvSize};
pub use wall::{FillDescription, WallAppearance, WallTexture, resolve};

/// `log::debug!` only when the component's debug flag is on.
#[macro_export]
macro_rules! debug_log {
    ($enabled:expr, $($arg:tt)+) => {
        if $enabled {
            log::debug!($($arg)+);
        }
    };
}

pub fn Box(modifier: Modifier) -> View {
    View::new(0, ViewKind::Box).modifier(modifier)
}

pub fn Column(modifier: Modifier) -> View {
    View::new(0, ViewKind::Column).modifier(modifier)
}

pub fn Text(text: impl Into<String>) -> View {
    View::new(
        0,
        ViewKind::Text {
            text: text.into(),
            color: Color::WHITE,
            font_size: 12.0,
        },
    )
}

pub fn Button(text: impl Into<String>, on_click: impl Fn() + 'static) -> View {
    View::new(
        0,
        ViewKind::Button {
            text: text.into(),
            on_click: Some(Rc::new(on_click)),
        },
    )
}

pub fn VideoEmbed(src: impl Into<String>) -> View {
    View::new(0, ViewKind::VideoEmbed { src: src.into() })
}

/// Extension trait for child building
pub trait ViewExt: Sized {
    fn child(self, children: impl IntoChildren) -> Self;
}

impl ViewExt for View {
    fn child(self, children: impl IntoChildren) -> Self {
        self.with_children(children.into_children())
    }
}

pub trait IntoChildren {
    fn into_children(self) -> Vec<View>;
}

impl IntoChildren for View {
    fn into_children(self) -> Vec<View> {
        vec![self]
    }
}

impl IntoChildren for Option<View> {
    fn into_children(self) -> Vec<View> {
        self.into_iter().collect()
    }
}

impl IntoChildren for Vec<View> {
    fn into_children(self) -> Vec<View> {
        self
    }
}

macro_rules! impl_into_children_tuple {
    ($($idx:tt $t:ident),+) => {
        impl<$($t: IntoChildren),+> IntoChildren for ($($t,)+) {
            fn into_children(self) -> Vec<View> {
                let mut v = Vec::new();
                $(v.extend(self.$idx.into_children());)+
                v
            }
        }
    };
}

impl_into_children_tuple!(0 A, 1 B);
impl_into_children_tuple!(0 A, 1 B, 2 C);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E);
