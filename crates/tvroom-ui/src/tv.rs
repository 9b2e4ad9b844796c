//! The TV: a bezel around a filtered screen showing the looping video.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tvroom_core::animation::{AnimatedValue, AnimationSpec};
use tvroom_core::{Color, Error, Host, Modifier, View};
use tvroom_player::{LoopController, PlayerOptions, VideoProvider, init_api};
use web_time::Duration;

use crate::{Box, Column, Text, VideoEmbed, ViewExt, WallAppearance, debug_log};

pub const TV_KEY: &str = "tv";
pub const SCREEN_FADE: Duration = Duration::from_millis(300);
const BEZEL: f32 = 16.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TvSize {
    Small,
    #[default]
    Medium,
    Large,
    #[serde(rename = "xlarge")]
    XLarge,
}

impl TvSize {
    pub fn as_str(self) -> &'static str {
        match self {
            TvSize::Small => "small",
            TvSize::Medium => "medium",
            TvSize::Large => "large",
            TvSize::XLarge => "xlarge",
        }
    }

    /// Outer frame size in dp.
    pub fn frame(self) -> (f32, f32) {
        match self {
            TvSize::Small => (320.0, 200.0),
            TvSize::Medium => (480.0, 300.0),
            TvSize::Large => (640.0, 400.0),
            TvSize::XLarge => (800.0, 500.0),
        }
    }
}

impl FromStr for TvSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(TvSize::Small),
            "medium" => Ok(TvSize::Medium),
            "large" => Ok(TvSize::Large),
            "xlarge" => Ok(TvSize::XLarge),
            other => Err(Error::InvalidSize(other.to_string())),
        }
    }
}

impl std::fmt::Display for TvSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Screen filter, in percent. The TV applies it as given and never changes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDisplaySettings")]
pub struct DisplaySettings {
    brightness: u16,
    contrast: u16,
}

#[derive(Deserialize)]
struct RawDisplaySettings {
    brightness: u16,
    contrast: u16,
}

impl TryFrom<RawDisplaySettings> for DisplaySettings {
    type Error = Error;

    fn try_from(raw: RawDisplaySettings) -> Result<Self, Error> {
        Self::new(raw.brightness, raw.contrast)
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            brightness: 80,
            contrast: 70,
        }
    }
}

impl DisplaySettings {
    pub const MAX_PERCENT: u16 = 200;
    /// Picture with the room lights on.
    pub const LIT: Self = Self {
        brightness: 85,
        contrast: 75,
    };
    /// Picture with the room lights off.
    pub const DARK: Self = Self {
        brightness: 100,
        contrast: 100,
    };

    pub fn new(brightness: u16, contrast: u16) -> Result<Self, Error> {
        for (name, value) in [("brightness", brightness), ("contrast", contrast)] {
            if value > Self::MAX_PERCENT {
                return Err(Error::InvalidDisplaySetting { name, value });
            }
        }
        Ok(Self {
            brightness,
            contrast,
        })
    }

    pub fn brightness(&self) -> u16 {
        self.brightness
    }

    pub fn contrast(&self) -> u16 {
        self.contrast
    }

    pub fn css_filter(&self) -> String {
        format!(
            "brightness({}%) contrast({}%)",
            self.brightness, self.contrast
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TvProps {
    pub size: TvSize,
    pub display_settings: DisplaySettings,
    #[serde(flatten)]
    pub wall: WallAppearance,
    pub is_on: bool,
    pub show_debug: bool,
    pub video_id: String,
}

impl Default for TvProps {
    fn default() -> Self {
        Self {
            size: TvSize::Medium,
            display_settings: DisplaySettings::default(),
            wall: WallAppearance::default(),
            is_on: true,
            show_debug: false,
            video_id: tvroom_player::DEFAULT_VIDEO_ID.to_string(),
        }
    }
}

/// A mounted TV. Owns the player for its lifetime.
pub struct Tv {
    controller: Rc<LoopController>,
    embed_src: String,
    screen_alpha: RefCell<AnimatedValue<f32>>,
    powered: Cell<bool>,
}

impl Tv {
    /// Creates the embedded player. A provider failure is logged and leaves a
    /// TV with a dead screen; it never fails the mount.
    pub fn mount(props: &TvProps, provider: &dyn VideoProvider, host: &dyn Host) -> Self {
        init_api();
        debug_log!(props.show_debug, "[TV] mounting with props: {props:?}");

        let options = PlayerOptions::for_video(&props.video_id).with_origin(&host.origin());
        let embed_src = match options.embed_url(&props.video_id) {
            Ok(url) => url.to_string(),
            Err(e) => {
                log::error!("[TV] cannot build embed url for `{}`: {e}", props.video_id);
                String::new()
            }
        };

        let controller = LoopController::new();
        if let Err(e) = provider.create(&props.video_id, &options, controller.callbacks()) {
            log::error!("[TV] error during video playback initialization: {e}");
        }

        let initial = if props.is_on { 1.0 } else { 0.0 };
        Self {
            controller,
            embed_src,
            screen_alpha: RefCell::new(AnimatedValue::new(
                initial,
                AnimationSpec::tween(SCREEN_FADE),
            )),
            powered: Cell::new(props.is_on),
        }
    }

    pub fn controller(&self) -> &Rc<LoopController> {
        &self.controller
    }

    pub fn embed_src(&self) -> &str {
        &self.embed_src
    }

    /// Follows `is_on`, starting a fade whenever it flips.
    pub fn set_power(&self, is_on: bool) {
        if self.powered.replace(is_on) != is_on {
            let target = if is_on { 1.0 } else { 0.0 };
            self.screen_alpha.borrow_mut().set_target(target);
        }
    }

    /// Current screen opacity, advanced to now.
    pub fn screen_opacity(&self) -> f32 {
        let mut a = self.screen_alpha.borrow_mut();
        a.update();
        *a.get()
    }

    pub fn is_fading(&self) -> bool {
        self.screen_alpha.borrow().is_animating()
    }

    pub fn view(&self, props: &TvProps) -> View {
        self.set_power(props.is_on);
        let opacity = self.screen_opacity();
        let (w, h) = props.size.frame();
        debug_log!(
            props.show_debug,
            "[TV] rendering size={} filter={} opacity={opacity:.2}",
            props.size,
            props.display_settings.css_filter()
        );

        let screen = Box(Modifier::new()
            .fill_max_size()
            .background(Color::BLACK)
            .filter(
                props.display_settings.brightness() as f32,
                props.display_settings.contrast() as f32,
            )
            .alpha(opacity))
        .key("tv-screen")
        .child((
            VideoEmbed(self.embed_src.clone()).key("tv-video"),
            props.show_debug.then(|| {
                Column(Modifier::new().absolute().offset(Some(0.0), Some(0.0), None))
                    .child((Text("TV Component"), Text(format!("Size: {}", props.size))))
            }),
        ));

        let frame = Box(Modifier::new()
            .fill_max_size()
            .padding(BEZEL)
            .background(Color::from_hex("#1a1a1a"))
            .border(2.0, Color::from_hex("#333333"), 12.0))
        .key("tv-frame")
        .child(screen);

        Box(Modifier::new().size(w, h))
            .key(TV_KEY)
            .child((frame, props.show_debug.then(|| debug_overlay(props))))
    }

    /// Releases the player handle.
    pub fn unmount(&self) {
        self.controller.release();
    }
}

fn debug_overlay(props: &TvProps) -> View {
    Box(Modifier::new()
        .absolute()
        .offset(Some(0.0), Some(0.0), None)
        .border(2.0, Color::from_hex("#00ff00"), 0.0)
        .z_index(10.0))
    .key("tv-debug")
    .child(Text(format!(
        "TV: {}\nWall: {} ({})",
        props.size,
        props.wall.color,
        props.wall.texture.as_str()
    )))
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use tvroom_core::animation::{TestClock, reset_clock, set_clock};
    use crate::testing::FakeHost;
    use tvroom_core::{Size, ViewKind};
    use tvroom_player::Phase;
    use tvroom_player::scripted::ScriptedProvider;

    fn mounted(props: &TvProps) -> (Tv, ScriptedProvider) {
        let provider = ScriptedProvider::new();
        let host = FakeHost::with_viewport(Size::new(1280.0, 800.0));
        let tv = Tv::mount(props, &provider, host.as_ref());
        (tv, provider)
    }

    #[test]
    fn size_names() {
        assert_eq!("xlarge".parse::<TvSize>(), Ok(TvSize::XLarge));
        assert_eq!(
            "huge".parse::<TvSize>(),
            Err(Error::InvalidSize("huge".into()))
        );
        assert_eq!(TvSize::Small.to_string(), "small");
    }

    #[test]
    fn display_settings_bounds() {
        assert!(DisplaySettings::new(200, 0).is_ok());
        assert_eq!(
            DisplaySettings::new(85, 201),
            Err(Error::InvalidDisplaySetting {
                name: "contrast",
                value: 201
            })
        );
        assert_eq!(DisplaySettings::LIT.brightness(), 85);
        assert_eq!(DisplaySettings::LIT.contrast(), 75);
        assert_eq!(
            DisplaySettings::default().css_filter(),
            "brightness(80%) contrast(70%)"
        );
    }

    #[test]
    fn mount_creates_looping_muted_player() {
        let (tv, provider) = mounted(&TvProps::default());
        let created = provider.created();
        assert_eq!(created.len(), 1);
        let (id, opts) = &created[0];
        assert_eq!(id, tvroom_player::DEFAULT_VIDEO_ID);
        assert_eq!(opts.player_vars.autoplay, 1);
        assert_eq!(opts.player_vars.mute, 1);
        assert_eq!(opts.player_vars.looped, 1);
        assert_eq!(opts.player_vars.origin, "http://localhost:3000");
        assert!(tv.embed_src().contains("/embed/hf3r9TNSsyY"));
    }

    #[test]
    fn player_signals_drive_play_commands() {
        let (tv, provider) = mounted(&TvProps::default());
        provider.fire_ready();
        assert_eq!(provider.play_count(), 1);

        provider.fire_state(0);
        assert_eq!(provider.play_count(), 2);
        provider.fire_state(5);
        assert_eq!(provider.play_count(), 3);
        provider.fire_state(1);
        assert_eq!(provider.play_count(), 3);
        assert_eq!(tv.controller().phase(), Phase::Playing);
    }

    #[test]
    fn unmount_releases_player() {
        let (tv, provider) = mounted(&TvProps::default());
        provider.fire_ready();
        tv.unmount();
        provider.fire_state(0);
        assert_eq!(provider.play_count(), 1);
    }

    #[test]
    fn screen_carries_filter() {
        let (tv, _provider) = mounted(&TvProps::default());
        let props = TvProps {
            display_settings: DisplaySettings::new(85, 75).unwrap(),
            ..TvProps::default()
        };
        let v = tv.view(&props);
        let screen = v.find("tv-screen").unwrap();
        let filter = screen.modifier.filter.unwrap();
        assert_eq!(filter.to_css(), "brightness(85%) contrast(75%)");
        assert!(matches!(
            v.find("tv-video").unwrap().kind,
            ViewKind::VideoEmbed { .. }
        ));
    }

    #[test]
    fn power_off_fades_over_300ms() {
        let clock = TestClock::default();
        set_clock(Rc::new(clock.clone()));

        let (tv, _provider) = mounted(&TvProps::default());
        let mut props = TvProps::default();
        assert_eq!(tv.screen_opacity(), 1.0);

        props.is_on = false;
        tv.view(&props);
        clock.advance(Duration::from_millis(150));
        let mid = tv.screen_opacity();
        assert!(mid > 0.4 && mid < 0.6, "mid-fade opacity {mid}");
        assert!(tv.is_fading());

        clock.advance(Duration::from_millis(150));
        assert_eq!(tv.screen_opacity(), 0.0);
        let v = tv.view(&props);
        assert_eq!(v.find("tv-screen").unwrap().modifier.alpha, Some(0.0));

        props.is_on = true;
        tv.view(&props);
        clock.advance(SCREEN_FADE);
        assert_eq!(tv.screen_opacity(), 1.0);
        reset_clock();
    }

    #[test]
    fn debug_overlay_only_when_enabled() {
        let (tv, _provider) = mounted(&TvProps::default());
        let plain = tv.view(&TvProps::default());
        assert!(plain.find("tv-debug").is_none());

        let props = TvProps {
            show_debug: true,
            size: TvSize::XLarge,
            wall: WallAppearance::new("#e6ccac", crate::WallTexture::Wood),
            ..TvProps::default()
        };
        let v = tv.view(&props);
        let overlay = v.find("tv-debug").unwrap();
        assert_eq!(overlay.text_content(), "TV: xlarge\nWall: #e6ccac (wood)");
    }

    #[test]
    fn props_serialize_for_the_debug_panel() {
        let props = TvProps {
            size: TvSize::XLarge,
            ..TvProps::default()
        };
        let v = serde_json::to_value(&props).unwrap();
        assert_eq!(v["size"], "xlarge");
        assert_eq!(v["displaySettings"]["brightness"], 80);
        assert_eq!(v["wallColor"], "#e8d0b3");
        assert_eq!(v["wallTexture"], "paint");
        assert!(v.get("wall").is_none());
        let back: TvProps = serde_json::from_value(v).unwrap();
        assert_eq!(back, props);
    }

    #[test]
    fn out_of_range_display_settings_do_not_deserialize() {
        let mut v = serde_json::to_value(TvProps::default()).unwrap();
        v["displaySettings"]["brightness"] = 250.into();
        let err = serde_json::from_value::<TvProps>(v).unwrap_err();
        assert!(err.to_string().contains("brightness"), "{err}");

        let ok: DisplaySettings =
            serde_json::from_str(r#"{"brightness":100,"contrast":100}"#).unwrap();
        assert_eq!(ok, DisplaySettings::DARK);
    }
}
