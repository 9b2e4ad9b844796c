//! The room: owns light/power/debug state and composes the wall, TV, stand
//! and light switch from it.
//!
//! State only changes through [`RoomEvent`]s reduced by [`RoomReducer`]; the
//! TV's display settings are derived from the result on every pass and
//! handed down unmodified.

use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};
use tvroom_core::prelude::*;
use tvroom_devtools::{DebugPanel, DebugSnapshot};
use tvroom_player::{DEFAULT_VIDEO_ID, VideoProvider};

use crate::light_switch::SWITCH_KEY;
use crate::measure::MeasureFn;
use crate::stand::STAND_KEY;
use crate::tv::TV_KEY;
use crate::{
    Box, Button, Column, DebugMeasurer, DisplaySettings, LightSwitch, Measured, Stand,
    StandHeight, SwitchMode, Text, Tv, TvProps, TvSize, ViewExt, WallAppearance, WallTexture,
    debug_log, layout,
};

pub const CONTAINER_KEY: &str = "tv-container";
pub const SCENE_KEY: &str = "tv-scene";
pub const DEBUG_TOGGLE_KEY: &str = "debug-toggle";
pub const DEBUG_PANEL_KEY: &str = "debug-panel";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomEvent {
    ToggleLights,
    PowerOffTv,
    TogglePower,
    ToggleDebug,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomState {
    pub is_dark_mode: bool,
    pub is_tv_on: bool,
    pub show_debug: bool,
}

impl Default for RoomState {
    fn default() -> Self {
        Self {
            is_dark_mode: false,
            is_tv_on: true,
            show_debug: false,
        }
    }
}

impl RoomState {
    pub fn display_settings(&self) -> DisplaySettings {
        display_settings_for(self.is_dark_mode)
    }
}

/// Brighter, punchier picture once the lights are off.
pub fn display_settings_for(is_dark_mode: bool) -> DisplaySettings {
    if is_dark_mode {
        DisplaySettings::DARK
    } else {
        DisplaySettings::LIT
    }
}

pub struct RoomReducer;

impl StateHolder for RoomReducer {
    type State = RoomState;
    type Event = RoomEvent;

    fn initial_state() -> RoomState {
        RoomState::default()
    }

    fn reduce(state: &RoomState, event: RoomEvent) -> RoomState {
        let mut next = *state;
        match event {
            RoomEvent::ToggleLights => next.is_dark_mode = !state.is_dark_mode,
            RoomEvent::PowerOffTv => next.is_tv_on = false,
            RoomEvent::TogglePower => next.is_tv_on = !state.is_tv_on,
            RoomEvent::ToggleDebug => next.show_debug = !state.show_debug,
        }
        next
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RoomConfig {
    pub tv_size: TvSize,
    pub wall: WallAppearance,
    pub stand_height: StandHeight,
    pub switch_mode: SwitchMode,
    pub video_id: String,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            tv_size: TvSize::XLarge,
            wall: WallAppearance::new("#e6ccac", WallTexture::Paint),
            stand_height: StandHeight::Medium,
            switch_mode: SwitchMode::Cascading,
            video_id: DEFAULT_VIDEO_ID.to_string(),
        }
    }
}

pub struct Room {
    this: Weak<Room>,
    config: RoomConfig,
    store: Store<RoomReducer>,
    tv: Tv,
    measurer: DebugMeasurer,
    scope: Scope,
}

impl Room {
    /// Mounts the TV (creating its player) and wires debug measurement to the
    /// debug flag. Everything registered here is torn down by [`Room::unmount`].
    pub fn mount(
        config: RoomConfig,
        host: Rc<dyn Host>,
        provider: &dyn VideoProvider,
    ) -> Rc<Self> {
        let store: Store<RoomReducer> = Store::new();
        let initial = store.get();

        let room = Rc::new_cyclic(|this: &Weak<Room>| {
            let tv = Tv::mount(&tv_props(&config, &initial), provider, host.as_ref());

            let weak = this.clone();
            let measure: MeasureFn = Rc::new(move |viewport: Size| {
                weak.upgrade().and_then(|room| room.measure_at(viewport))
            });

            Room {
                this: this.clone(),
                config,
                store,
                tv,
                measurer: DebugMeasurer::new(host, measure),
                scope: Scope::new(),
            }
        });

        let weak = Rc::downgrade(&room);
        let signal = room.store.signal().clone();
        room.scope.run(|| {
            effect(move || {
                let id = signal.subscribe(move |state: &RoomState| {
                    let Some(room) = weak.upgrade() else {
                        return;
                    };
                    room.tv.set_power(state.is_tv_on);
                    if state.show_debug {
                        room.measurer.enable();
                    } else {
                        room.measurer.disable();
                    }
                });
                on_unmount(move || signal.unsubscribe(id))
            });

            let weak = Rc::downgrade(&room);
            effect(move || {
                on_unmount(move || {
                    if let Some(room) = weak.upgrade() {
                        room.measurer.disable();
                        room.tv.unmount();
                    }
                })
            });
        });

        log::info!("[Room] mounted ({} TV)", room.config.tv_size);
        room
    }

    pub fn state(&self) -> RoomState {
        self.store.get()
    }

    pub fn store(&self) -> &Store<RoomReducer> {
        &self.store
    }

    pub fn config(&self) -> &RoomConfig {
        &self.config
    }

    pub fn tv(&self) -> &Tv {
        &self.tv
    }

    pub fn measurer(&self) -> &DebugMeasurer {
        &self.measurer
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn dispatch(&self, event: RoomEvent) -> RoomState {
        let next = self.store.dispatch(event);
        debug_log!(next.show_debug, "[Room] {event:?} -> {next:?}");
        next
    }

    /// Props the TV is composed with in the current state.
    pub fn tv_props(&self) -> TvProps {
        tv_props(&self.config, &self.state())
    }

    /// Text of the debug panel for the latest measurement.
    pub fn debug_panel(&self) -> DebugPanel {
        let props = serde_json::to_value(self.tv_props()).unwrap_or_else(|e| {
            log::warn!("[Room] cannot serialize TV props: {e}");
            serde_json::Value::Null
        });
        let mut panel = DebugPanel::new(self.measurer.latest().get().snapshot, props);
        panel.measurements = self.measurer.count();
        panel
    }

    pub fn view(&self) -> View {
        let state = self.state();
        let props = tv_props(&self.config, &state);
        debug_log!(state.show_debug, "[Room] TV props being passed: {props:?}");

        let (tv_width, _) = props.size.frame();
        let stand_measured = state
            .show_debug
            .then(|| self.measurer.latest().get().stand)
            .filter(|s| *s != Size::ZERO);

        let this = self.this.clone();
        let switch = LightSwitch::view(
            self.config.switch_mode,
            state.is_dark_mode,
            state.is_tv_on,
            move |ev| {
                if let Some(room) = this.upgrade() {
                    room.dispatch(ev);
                }
            },
        );

        let scene = Column(Modifier::new()
            .fill_max_width()
            .flex_grow(1.0)
            .justify_content(JustifyContent::Center)
            .align_items(AlignItems::Center))
        .key(SCENE_KEY)
        .child((
            self.tv.view(&props),
            Stand::view(self.config.stand_height, tv_width, state.show_debug, stand_measured),
            Box(Modifier::new()
                .absolute()
                .offset(None, Some(120.0), Some(40.0)))
            .child(switch),
        ));

        let this = self.this.clone();
        let toggle = Box(Modifier::new()
            .absolute()
            .offset(None, Some(10.0), Some(10.0))
            .z_index(1000.0))
        .key(DEBUG_TOGGLE_KEY)
        .child(Button(
            if state.show_debug { "Hide Debug" } else { "Show Debug" },
            move || {
                if let Some(room) = this.upgrade() {
                    room.dispatch(RoomEvent::ToggleDebug);
                }
            },
        ));

        let panel = state.show_debug.then(|| {
            Column(Modifier::new()
                .absolute()
                .offset(None, Some(50.0), Some(10.0))
                .padding(10.0)
                .background(Color(0, 0, 0, 204))
                .z_index(1000.0))
            .key(DEBUG_PANEL_KEY)
            .child(
                self.debug_panel()
                    .lines()
                    .into_iter()
                    .map(Text)
                    .collect::<Vec<_>>(),
            )
        });

        let night = state.is_dark_mode.then(|| {
            Box(Modifier::new()
                .absolute()
                .offset(Some(0.0), Some(0.0), Some(0.0))
                .fill_max_size()
                .background(Color(0, 0, 0, 153)))
            .key("night")
        });

        Box(self.config.wall.fill().apply(Modifier::new().fill_max_size()))
            .key(CONTAINER_KEY)
            .child((night, toggle, panel, scene))
    }

    /// Lays the current view out at `viewport` and reads back the measured
    /// elements.
    pub fn measure_at(&self, viewport: Size) -> Option<Measured> {
        let rects = match layout(&self.view(), viewport) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("[Room] layout failed: {e}");
                return None;
            }
        };
        let m = Measured {
            snapshot: DebugSnapshot {
                tv_container: rects.size_of(CONTAINER_KEY),
                tv_scene: rects.size_of(SCENE_KEY),
                tv: rects.size_of(TV_KEY),
            },
            stand: rects.size_of(STAND_KEY),
        };
        log::debug!("[Room] new dimensions: {:?}", m.snapshot);
        Some(m)
    }

    pub fn toggle_debug(&self) -> bool {
        self.view()
            .find(DEBUG_TOGGLE_KEY)
            .is_some_and(|v| v.click())
    }

    pub fn click_light_switch(&self) -> bool {
        self.view().find(SWITCH_KEY).is_some_and(|v| v.click())
    }

    /// Disposes the room scope: debug measurement stops and the player handle
    /// is released. Idempotent.
    pub fn unmount(&self) {
        if !self.scope.is_disposed() {
            log::info!("[Room] unmounting");
        }
        self.scope.dispose();
    }
}

fn tv_props(config: &RoomConfig, state: &RoomState) -> TvProps {
    TvProps {
        size: config.tv_size,
        display_settings: state.display_settings(),
        wall: config.wall.clone(),
        is_on: state.is_tv_on,
        show_debug: state.show_debug,
        video_id: config.video_id.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeHost;
    use tvroom_player::scripted::ScriptedProvider;

    fn mounted() -> (Rc<FakeHost>, ScriptedProvider, Rc<Room>) {
        let host = FakeHost::with_viewport(Size::new(1280.0, 800.0));
        let provider = ScriptedProvider::new();
        let room = Room::mount(RoomConfig::default(), host.clone(), &provider);
        (host, provider, room)
    }

    #[test]
    fn reducer_transitions() {
        let s = RoomReducer::initial_state();
        assert_eq!(
            s,
            RoomState {
                is_dark_mode: false,
                is_tv_on: true,
                show_debug: false
            }
        );
        let dark = RoomReducer::reduce(&s, RoomEvent::ToggleLights);
        assert!(dark.is_dark_mode);
        let off = RoomReducer::reduce(&dark, RoomEvent::PowerOffTv);
        assert!(!off.is_tv_on);
        assert_eq!(RoomReducer::reduce(&off, RoomEvent::PowerOffTv), off);
        assert!(RoomReducer::reduce(&off, RoomEvent::TogglePower).is_tv_on);
        assert!(RoomReducer::reduce(&s, RoomEvent::ToggleDebug).show_debug);
    }

    #[test]
    fn display_settings_follow_the_lights() {
        let (_host, _provider, room) = mounted();
        assert_eq!(room.tv_props().display_settings, display_settings_for(false));
        assert_eq!(
            room.tv_props().display_settings,
            DisplaySettings::new(85, 75).unwrap()
        );

        room.dispatch(RoomEvent::ToggleLights);
        assert_eq!(
            room.tv_props().display_settings,
            DisplaySettings::new(100, 100).unwrap()
        );

        room.dispatch(RoomEvent::ToggleLights);
        assert_eq!(
            room.tv_props().display_settings,
            DisplaySettings::new(85, 75).unwrap()
        );
    }

    #[test]
    fn switch_cascades_power_off_once() {
        let (_host, _provider, room) = mounted();
        assert!(room.click_light_switch());
        let s = room.state();
        assert!(s.is_dark_mode);
        assert!(!s.is_tv_on);

        // Lights back on: the TV stays off.
        assert!(room.click_light_switch());
        let s = room.state();
        assert!(!s.is_dark_mode);
        assert!(!s.is_tv_on);
    }

    #[test]
    fn simple_switch_leaves_tv_alone() {
        let host = FakeHost::with_viewport(Size::new(1280.0, 800.0));
        let provider = ScriptedProvider::new();
        let room = Room::mount(
            RoomConfig {
                switch_mode: SwitchMode::Simple,
                ..RoomConfig::default()
            },
            host,
            &provider,
        );
        room.click_light_switch();
        assert!(room.state().is_dark_mode);
        assert!(room.state().is_tv_on);
    }

    #[test]
    fn screen_filter_matches_state() {
        let (_host, _provider, room) = mounted();
        room.dispatch(RoomEvent::ToggleLights);
        let v = room.view();
        let filter = v.find("tv-screen").and_then(|s| s.modifier.filter);
        assert_eq!(
            filter.map(|f| f.to_css()).as_deref(),
            Some("brightness(100%) contrast(100%)")
        );
    }

    #[test]
    fn debug_toggle_label_and_panel() {
        let (_host, _provider, room) = mounted();
        let v = room.view();
        assert_eq!(v.find(DEBUG_TOGGLE_KEY).unwrap().text_content(), "Show Debug");
        assert!(v.find(DEBUG_PANEL_KEY).is_none());
        assert!(v.find("tv-debug").is_none());

        assert!(room.toggle_debug());
        let v = room.view();
        assert_eq!(v.find(DEBUG_TOGGLE_KEY).unwrap().text_content(), "Hide Debug");
        let panel = v.find(DEBUG_PANEL_KEY).unwrap().text_content();
        assert!(panel.starts_with("Debug Information\nDimensions:"));
        assert!(panel.contains("\"wallColor\": \"#e6ccac\""));
        assert!(panel.contains("\"wallTexture\": \"paint\""));
        assert!(v.find("tv-debug").is_some());
        assert!(v.find("tv-stand-debug").is_some());
    }

    #[test]
    fn measurement_follows_debug_flag() {
        let (host, _provider, room) = mounted();
        assert_eq!(host.live_resize(), 0);
        assert_eq!(room.measurer().count(), 0);

        room.dispatch(RoomEvent::ToggleDebug);
        assert_eq!(room.measurer().count(), 1);
        assert_eq!(host.live_resize(), 1);
        assert_eq!(host.live_timers(), 1);

        let m = room.measurer().latest().get();
        assert_eq!(m.snapshot.tv_container, Size::new(1280.0, 800.0));
        assert_eq!(m.snapshot.tv, Size::new(800.0, 500.0));
        assert_eq!(m.stand, Size::new(800.0, 90.0));
        assert!(m.snapshot.tv_scene.height > 0.0);

        host.fire_timers();
        assert_eq!(room.measurer().count(), 2);

        host.resize_to(Size::new(1600.0, 900.0));
        assert_eq!(room.measurer().count(), 3);
        assert_eq!(
            room.measurer().latest().get().snapshot.tv_container,
            Size::new(1600.0, 900.0)
        );

        room.dispatch(RoomEvent::ToggleDebug);
        assert_eq!(host.live_resize(), 0);
        host.resize_to(Size::new(1280.0, 800.0));
        assert_eq!(room.measurer().count(), 3);

        room.dispatch(RoomEvent::ToggleDebug);
        assert_eq!(host.live_resize(), 1);
    }

    #[test]
    fn unmount_tears_down() {
        let (host, provider, room) = mounted();
        provider.fire_ready();
        room.dispatch(RoomEvent::ToggleDebug);
        assert_eq!(host.live_resize(), 1);

        room.unmount();
        assert_eq!(host.live_resize(), 0);
        assert_eq!(host.live_timers(), 0);
        assert!(!room.tv().controller().has_handle());
        assert_eq!(room.store().signal().subscriber_count(), 0);

        // Player signals after unmount issue nothing.
        let plays = provider.play_count();
        provider.fire_state(0);
        assert_eq!(provider.play_count(), plays);

        room.unmount();
    }

    #[test]
    fn tv_fades_when_switch_turns_it_off() {
        use tvroom_core::animation::{TestClock, reset_clock, set_clock};
        let clock = TestClock::default();
        set_clock(Rc::new(clock.clone()));

        let (_host, _provider, room) = mounted();
        room.view();
        room.click_light_switch();
        assert!(room.tv().is_fading());
        clock.advance(crate::tv::SCREEN_FADE);
        assert_eq!(room.tv().screen_opacity(), 0.0);
        reset_clock();
    }

    #[test]
    fn power_off_fades_without_a_render() {
        use tvroom_core::animation::{TestClock, reset_clock, set_clock};
        let clock = TestClock::default();
        set_clock(Rc::new(clock.clone()));

        let (_host, _provider, room) = mounted();
        assert_eq!(room.tv().screen_opacity(), 1.0);
        room.dispatch(RoomEvent::PowerOffTv);
        assert!(room.tv().is_fading());
        clock.advance(crate::tv::SCREEN_FADE / 2);
        let halfway = room.tv().screen_opacity();
        assert!(halfway > 0.0 && halfway < 1.0, "{halfway}");
        clock.advance(crate::tv::SCREEN_FADE);
        assert_eq!(room.tv().screen_opacity(), 0.0);
        assert!(!room.tv().is_fading());
        reset_clock();
    }
}
