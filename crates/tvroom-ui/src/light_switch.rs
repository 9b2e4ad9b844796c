use std::rc::Rc;

use smallvec::{SmallVec, smallvec};
use tvroom_core::{Color, Modifier, View};

use crate::{Box, Button, RoomEvent, ViewExt};

pub const SWITCH_KEY: &str = "light-switch";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SwitchMode {
    /// Only toggles the lights.
    Simple,
    /// Turning the lights off also powers the TV off.
    #[default]
    Cascading,
}

pub type Events = SmallVec<[RoomEvent; 2]>;

pub struct LightSwitch;

impl LightSwitch {
    /// Events for one activation. Always exactly one `ToggleLights`; the
    /// cascade never powers the TV back on.
    pub fn events(mode: SwitchMode, is_dark_mode: bool, is_tv_on: bool) -> Events {
        match mode {
            SwitchMode::Cascading if !is_dark_mode && is_tv_on => {
                smallvec![RoomEvent::ToggleLights, RoomEvent::PowerOffTv]
            }
            _ => smallvec![RoomEvent::ToggleLights],
        }
    }

    pub fn label(is_dark_mode: bool) -> &'static str {
        if is_dark_mode { "☀️" } else { "🌙" }
    }

    pub fn view(
        mode: SwitchMode,
        is_dark_mode: bool,
        is_tv_on: bool,
        on_event: impl Fn(RoomEvent) + 'static,
    ) -> View {
        let on_event = Rc::new(on_event);
        let plate = if is_dark_mode {
            Color::from_hex("#444444")
        } else {
            Color::from_hex("#f5f5f5")
        };

        Box(Modifier::new()
            .size(48.0, 72.0)
            .background(plate)
            .border(1.0, Color::from_hex("#999999"), 6.0))
        .key(SWITCH_KEY)
        .child(Button(Self::label(is_dark_mode), move || {
            for ev in Self::events(mode, is_dark_mode, is_tv_on) {
                on_event(ev);
            }
        }))
    }
}
