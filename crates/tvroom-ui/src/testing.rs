//! A hand-driven `Host` for unit tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tvroom_core::{Dispose, Host, ResizeCallback, Size};
use web_time::Duration;

type Timer = (Rc<Cell<bool>>, Option<Box<dyn FnOnce()>>);

#[derive(Default)]
pub struct FakeHost {
    viewport: Cell<Size>,
    resize: RefCell<Vec<(Rc<Cell<bool>>, ResizeCallback)>>,
    timers: RefCell<Vec<Timer>>,
}

impl FakeHost {
    pub fn with_viewport(size: Size) -> Rc<Self> {
        let host = Rc::new(Self::default());
        host.viewport.set(size);
        host
    }

    pub fn resize_to(&self, size: Size) {
        self.viewport.set(size);
        for (alive, cb) in self.resize.borrow().iter() {
            if alive.get() {
                cb(size);
            }
        }
    }

    /// Runs every live timer regardless of its delay.
    pub fn fire_timers(&self) {
        let due: Vec<_> = self
            .timers
            .borrow_mut()
            .iter_mut()
            .filter(|(alive, _)| alive.get())
            .filter_map(|(_, f)| f.take())
            .collect();
        for f in due {
            f();
        }
    }

    pub fn live_resize(&self) -> usize {
        self.resize.borrow().iter().filter(|(a, _)| a.get()).count()
    }

    pub fn live_timers(&self) -> usize {
        self.timers
            .borrow()
            .iter()
            .filter(|(a, f)| a.get() && f.is_some())
            .count()
    }
}

impl Host for FakeHost {
    fn viewport(&self) -> Size {
        self.viewport.get()
    }

    fn on_resize(&self, f: ResizeCallback) -> Dispose {
        let alive = Rc::new(Cell::new(true));
        self.resize.borrow_mut().push((alive.clone(), f));
        Dispose::new(move || alive.set(false))
    }

    fn set_timeout(&self, _delay: Duration, f: Box<dyn FnOnce()>) -> Dispose {
        let alive = Rc::new(Cell::new(true));
        self.timers.borrow_mut().push((alive.clone(), Some(f)));
        Dispose::new(move || alive.set(false))
    }

    fn has_element(&self, _id: &str) -> bool {
        true
    }

    fn origin(&self) -> String {
        "http://localhost:3000".into()
    }
}
