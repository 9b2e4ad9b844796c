//! Mounts the room on a headless page and plays through a short session:
//! the player comes up and loops, debug measurement is switched on and the
//! window resized, then the lights go off (taking the TV with them).

use std::rc::Rc;

use anyhow::Context;
use tvroom_core::{Host, Size};
use tvroom_platform::{DEFAULT_CONTAINER_ID, HeadlessHost, mount};
use tvroom_player::scripted::ScriptedProvider;
use web_time::Duration;

fn main() -> anyhow::Result<()> {
    tvroom_platform::init_logging();

    let host = HeadlessHost::new(Size::new(1280.0, 800.0))
        .with_element(DEFAULT_CONTAINER_ID)
        .with_origin("http://localhost:3000");
    host.install_clock();

    let provider = ScriptedProvider::new();
    let mounted = mount(Rc::new(host.clone()), DEFAULT_CONTAINER_ID, &provider)
        .context("mounting the room")?;
    let room = mounted.room().clone();

    // Autoplay blocked: the video is cued, the lifecycle starts it anyway.
    provider.fire_ready();
    provider.fire_state(5);
    provider.fire_state(1);
    provider.seek(3599.0);
    provider.fire_state(0);
    provider.fire_state(1);
    provider.fire_error(150);

    let controller = room.tv().controller();
    let stats = controller.stats();
    println!(
        "player: phase={:?} plays={} restarts={} last_error={}",
        controller.phase(),
        stats.plays_issued,
        stats.restarts,
        controller
            .last_error()
            .map_or_else(|| "none".to_string(), |e| e.to_string())
    );

    room.toggle_debug();
    host.advance(Duration::from_millis(500));
    host.resize(Size::new(1600.0, 900.0));
    println!("{}", room.debug_panel().text());

    room.click_light_switch();
    room.view();
    host.advance(Duration::from_millis(300));
    let state = room.state();
    println!(
        "lights off: dark={} tv_on={} screen_opacity={:.2} filter={}",
        state.is_dark_mode,
        state.is_tv_on,
        room.tv().screen_opacity(),
        room.tv_props().display_settings.css_filter()
    );

    room.click_light_switch();
    let state = room.state();
    println!(
        "lights on: dark={} tv_on={} filter={}",
        state.is_dark_mode,
        state.is_tv_on,
        room.tv_props().display_settings.css_filter()
    );

    drop(room);
    mounted.unmount();
    anyhow::ensure!(
        host.resize_subscriber_count() == 0 && host.pending_timers() == 0,
        "room left {} resize listeners and {} timers behind",
        host.resize_subscriber_count(),
        host.pending_timers()
    );
    log::info!("viewport at exit: {:?}", host.viewport());
    Ok(())
}
