//! Debug-time measurement of the room's nested elements.
//!
//! While enabled, the measurer publishes a fresh [`Measured`] immediately,
//! once more after the page has had time to settle, and on every viewport
//! resize. Disabling (or dropping) it disposes the resize subscription and any
//! pending timer.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tvroom_core::{Dispose, Host, Signal, Size, signal};
use tvroom_devtools::DebugSnapshot;
use web_time::Duration;

pub const SETTLE_DELAY: Duration = Duration::from_millis(500);

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Measured {
    pub snapshot: DebugSnapshot,
    pub stand: Size,
}

/// Lays the room out at the given viewport. `None` skips the publish.
pub type MeasureFn = Rc<dyn Fn(Size) -> Option<Measured>>;

pub struct DebugMeasurer {
    host: Rc<dyn Host>,
    measure: MeasureFn,
    latest: Signal<Measured>,
    count: Rc<Cell<u64>>,
    guards: RefCell<Vec<Dispose>>,
}

impl DebugMeasurer {
    pub fn new(host: Rc<dyn Host>, measure: MeasureFn) -> Self {
        Self {
            host,
            measure,
            latest: signal(Measured::default()),
            count: Rc::new(Cell::new(0)),
            guards: RefCell::new(Vec::new()),
        }
    }

    pub fn latest(&self) -> &Signal<Measured> {
        &self.latest
    }

    /// Number of measurements published so far.
    pub fn count(&self) -> u64 {
        self.count.get()
    }

    pub fn is_active(&self) -> bool {
        !self.guards.borrow().is_empty()
    }

    /// Starts measuring. No-op when already active.
    pub fn enable(&self) {
        if self.is_active() {
            return;
        }
        log::debug!("[Room] debug measurement on");

        let publish = {
            let measure = self.measure.clone();
            let latest = self.latest.clone();
            let count = self.count.clone();
            Rc::new(move |viewport: Size| {
                if let Some(m) = measure(viewport) {
                    count.set(count.get() + 1);
                    latest.set(m);
                }
            })
        };

        publish(self.host.viewport());

        let host = Rc::downgrade(&self.host);
        let settle = publish.clone();
        let timer = self.host.set_timeout(
            SETTLE_DELAY,
            Box::new(move || {
                if let Some(host) = host.upgrade() {
                    settle(host.viewport());
                }
            }),
        );
        let resize = self.host.on_resize(Box::new(move |size| publish(size)));

        self.guards.borrow_mut().extend([timer, resize]);
    }

    /// Stops measuring and disposes the subscriptions. The last measurement
    /// stays readable.
    pub fn disable(&self) {
        let guards = std::mem::take(&mut *self.guards.borrow_mut());
        if guards.is_empty() {
            return;
        }
        log::debug!("[Room] debug measurement off");
        for g in guards {
            g.run();
        }
    }
}

impl Drop for DebugMeasurer {
    fn drop(&mut self) {
        self.disable();
    }
}
