//! Runners for the room.
//!
//! [`mount`] is the bootstrap: it checks the page has the container element
//! and mounts a [`Room`] into it. [`HeadlessHost`] is a deterministic [`Host`]
//! with a manual clock, used by tests and the demo binary.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::{Rc, Weak};

use tvroom_core::animation::{TestClock, set_clock};
use tvroom_core::{Dispose, Error, Host, ResizeCallback, Size};
use tvroom_player::VideoProvider;
use tvroom_ui::{Room, RoomConfig};
use web_time::Duration;

pub const DEFAULT_CONTAINER_ID: &str = "root";

/// Installs `env_logger`, honoring `RUST_LOG` and defaulting to `info`.
/// Returns `false` if a logger was already set.
pub fn init_logging() -> bool {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init()
        .is_ok()
}

/// A room mounted into a container element. Dropping it unmounts.
pub struct MountedRoom {
    container_id: String,
    room: Rc<Room>,
}

impl MountedRoom {
    pub fn room(&self) -> &Rc<Room> {
        &self.room
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn unmount(self) {
        log::info!("unmounting room from #{}", self.container_id);
        drop(self);
    }
}

impl Drop for MountedRoom {
    fn drop(&mut self) {
        self.room.unmount();
    }
}

/// Mounts the default room into the element with id `container_id`.
pub fn mount(
    host: Rc<dyn Host>,
    container_id: &str,
    provider: &dyn VideoProvider,
) -> Result<MountedRoom, Error> {
    mount_with(host, container_id, RoomConfig::default(), provider)
}

pub fn mount_with(
    host: Rc<dyn Host>,
    container_id: &str,
    config: RoomConfig,
    provider: &dyn VideoProvider,
) -> Result<MountedRoom, Error> {
    if !host.has_element(container_id) {
        log::error!(
            "failed to find the root element: check that the page has an element with id=\"{container_id}\""
        );
        return Err(Error::MissingMountTarget(container_id.to_string()));
    }
    let room = Room::mount(config, host, provider);
    log::info!("room mounted into #{container_id}");
    Ok(MountedRoom {
        container_id: container_id.to_string(),
        room,
    })
}

type TimerFn = Box<dyn FnOnce()>;

struct Timer {
    id: u64,
    due: Duration,
    f: TimerFn,
}

struct Inner {
    clock: TestClock,
    elapsed: Cell<Duration>,
    viewport: Cell<Size>,
    origin: RefCell<String>,
    elements: RefCell<HashSet<String>>,
    resize: RefCell<Vec<(u64, Rc<dyn Fn(Size)>)>>,
    timers: RefCell<Vec<Timer>>,
    next_id: Cell<u64>,
}

impl Inner {
    fn next_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    fn set_elapsed(&self, to: Duration) {
        let now = self.elapsed.get();
        if to > now {
            self.clock.advance(to - now);
            self.elapsed.set(to);
        }
    }
}

/// In-memory page: a viewport, element ids, timers and resize listeners,
/// all driven by hand. Cloning yields another handle to the same page.
#[derive(Clone)]
pub struct HeadlessHost {
    inner: Rc<Inner>,
}

impl HeadlessHost {
    pub fn new(viewport: Size) -> Self {
        Self {
            inner: Rc::new(Inner {
                clock: TestClock::default(),
                elapsed: Cell::new(Duration::ZERO),
                viewport: Cell::new(viewport),
                origin: RefCell::new(String::new()),
                elements: RefCell::new(HashSet::new()),
                resize: RefCell::new(Vec::new()),
                timers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    pub fn with_element(self, id: &str) -> Self {
        self.add_element(id);
        self
    }

    pub fn with_origin(self, origin: &str) -> Self {
        *self.inner.origin.borrow_mut() = origin.to_string();
        self
    }

    pub fn add_element(&self, id: &str) {
        self.inner.elements.borrow_mut().insert(id.to_string());
    }

    /// Makes animations on this thread follow the host's clock.
    pub fn install_clock(&self) {
        set_clock(Rc::new(self.inner.clock.clone()));
    }

    pub fn clock(&self) -> &TestClock {
        &self.inner.clock
    }

    /// Time since the host was created.
    pub fn elapsed(&self) -> Duration {
        self.inner.elapsed.get()
    }

    /// Moves time forward by `by`, firing due timers in order. Each timer
    /// sees the clock at its own due time.
    pub fn advance(&self, by: Duration) {
        let target = self.inner.elapsed.get() + by;
        loop {
            let next = {
                let mut timers = self.inner.timers.borrow_mut();
                let due = timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.id))
                    .map(|(i, _)| i);
                due.map(|i| timers.remove(i))
            };
            let Some(timer) = next else { break };
            self.inner.set_elapsed(timer.due);
            (timer.f)();
        }
        self.inner.set_elapsed(target);
    }

    /// Changes the viewport and notifies resize listeners.
    pub fn resize(&self, size: Size) {
        self.inner.viewport.set(size);
        let listeners: Vec<_> = self
            .inner
            .resize
            .borrow()
            .iter()
            .map(|(_, f)| f.clone())
            .collect();
        log::debug!("viewport resized to {}x{}", size.width, size.height);
        for f in listeners {
            f(size);
        }
    }

    pub fn resize_subscriber_count(&self) -> usize {
        self.inner.resize.borrow().len()
    }

    pub fn pending_timers(&self) -> usize {
        self.inner.timers.borrow().len()
    }

    fn weak(&self) -> Weak<Inner> {
        Rc::downgrade(&self.inner)
    }
}

impl Host for HeadlessHost {
    fn viewport(&self) -> Size {
        self.inner.viewport.get()
    }

    fn on_resize(&self, f: ResizeCallback) -> Dispose {
        let id = self.inner.next_id();
        self.inner.resize.borrow_mut().push((id, Rc::from(f)));
        let inner = self.weak();
        Dispose::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner.resize.borrow_mut().retain(|(sid, _)| *sid != id);
            }
        })
    }

    fn set_timeout(&self, delay: Duration, f: Box<dyn FnOnce()>) -> Dispose {
        let id = self.inner.next_id();
        let due = self.inner.elapsed.get() + delay;
        self.inner.timers.borrow_mut().push(Timer { id, due, f });
        let inner = self.weak();
        Dispose::new(move || {
            if let Some(inner) = inner.upgrade() {
                // Take the closure out before dropping it.
                let removed: Vec<Timer> = {
                    let mut timers = inner.timers.borrow_mut();
                    let (gone, keep) = std::mem::take(&mut *timers)
                        .into_iter()
                        .partition(|t| t.id == id);
                    *timers = keep;
                    gone
                };
                drop(removed);
            }
        })
    }

    fn has_element(&self, id: &str) -> bool {
        self.inner.elements.borrow().contains(id)
    }

    fn origin(&self) -> String {
        self.inner.origin.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tvroom_core::animation::reset_clock;
    use tvroom_player::scripted::ScriptedProvider;
    use tvroom_ui::RoomEvent;

    fn page() -> HeadlessHost {
        HeadlessHost::new(Size::new(1280.0, 800.0))
            .with_element(DEFAULT_CONTAINER_ID)
            .with_origin("http://localhost:3000")
    }

    #[test]
    fn logging_installs_once() {
        init_logging();
        assert!(!init_logging());
    }

    #[test]
    fn timers_fire_in_due_order() {
        let host = page();
        let log = Rc::new(RefCell::new(Vec::new()));
        for (name, ms) in [("b", 500u64), ("a", 100), ("c", 900)] {
            let log = log.clone();
            let _ = host.set_timeout(
                Duration::from_millis(ms),
                Box::new(move || log.borrow_mut().push(name)),
            );
        }

        host.advance(Duration::from_millis(600));
        assert_eq!(*log.borrow(), vec!["a", "b"]);
        assert_eq!(host.pending_timers(), 1);

        host.advance(Duration::from_millis(300));
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert_eq!(host.elapsed(), Duration::from_millis(900));
    }

    #[test]
    fn disposed_timer_never_fires() {
        let host = page();
        let fired = Rc::new(Cell::new(false));
        let f = fired.clone();
        let d = host.set_timeout(Duration::from_millis(10), Box::new(move || f.set(true)));
        d.run();
        host.advance(Duration::from_secs(1));
        assert!(!fired.get());
        assert_eq!(host.pending_timers(), 0);
    }

    #[test]
    fn resize_notifies_until_disposed() {
        let host = page();
        let seen = Rc::new(Cell::new(Size::ZERO));
        let s = seen.clone();
        let d = host.on_resize(Box::new(move |size| s.set(size)));
        host.resize(Size::new(640.0, 480.0));
        assert_eq!(seen.get(), Size::new(640.0, 480.0));
        assert_eq!(host.viewport(), Size::new(640.0, 480.0));

        d.run();
        assert_eq!(host.resize_subscriber_count(), 0);
        host.resize(Size::new(1.0, 1.0));
        assert_eq!(seen.get(), Size::new(640.0, 480.0));
    }

    #[test]
    fn missing_container_is_an_error() {
        let host = HeadlessHost::new(Size::new(800.0, 600.0));
        let provider = ScriptedProvider::new();
        let err = mount(Rc::new(host), "root", &provider).err();
        assert_eq!(err, Some(Error::MissingMountTarget("root".into())));
        assert!(provider.created().is_empty());
    }

    #[test]
    fn mount_passes_page_origin_to_the_player() {
        let host = page();
        let provider = ScriptedProvider::new();
        let mounted = mount(Rc::new(host), DEFAULT_CONTAINER_ID, &provider).unwrap();
        assert_eq!(mounted.container_id(), "root");
        let created = provider.created();
        assert_eq!(created[0].1.player_vars.origin, "http://localhost:3000");
        assert_eq!(created[0].1.player_vars.host, "http://localhost");
    }

    #[test]
    fn debug_measurement_runs_on_host_time() {
        let host = page();
        let provider = ScriptedProvider::new();
        let mounted = mount(Rc::new(host.clone()), DEFAULT_CONTAINER_ID, &provider).unwrap();
        let room = mounted.room().clone();

        room.dispatch(RoomEvent::ToggleDebug);
        assert_eq!(room.measurer().count(), 1);
        assert_eq!(host.resize_subscriber_count(), 1);
        assert_eq!(host.pending_timers(), 1);

        host.advance(Duration::from_millis(499));
        assert_eq!(room.measurer().count(), 1);
        host.advance(Duration::from_millis(1));
        assert_eq!(room.measurer().count(), 2);

        host.resize(Size::new(1024.0, 768.0));
        assert_eq!(room.measurer().count(), 3);
        assert_eq!(
            room.debug_panel().snapshot.tv_container,
            Size::new(1024.0, 768.0)
        );
    }

    #[test]
    fn unmount_disposes_resize_subscription() {
        let host = page();
        let provider = ScriptedProvider::new();
        let mounted = mount(Rc::new(host.clone()), DEFAULT_CONTAINER_ID, &provider).unwrap();
        mounted.room().dispatch(RoomEvent::ToggleDebug);
        assert_eq!(host.resize_subscriber_count(), 1);

        mounted.unmount();
        assert_eq!(host.resize_subscriber_count(), 0);
        assert_eq!(host.pending_timers(), 0);
    }

    #[test]
    fn screen_fade_follows_host_clock() {
        let host = page();
        host.install_clock();
        let provider = ScriptedProvider::new();
        let mounted = mount(Rc::new(host.clone()), DEFAULT_CONTAINER_ID, &provider).unwrap();
        let room = mounted.room();

        room.view();
        room.click_light_switch();
        room.view();
        host.advance(Duration::from_millis(150));
        let mid = room.tv().screen_opacity();
        assert!(mid > 0.0 && mid < 1.0);
        host.advance(Duration::from_millis(150));
        assert_eq!(room.tv().screen_opacity(), 0.0);
        reset_clock();
    }
}
