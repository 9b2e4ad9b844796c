//! The slice of the embedding environment the widgets depend on.
//!
//! A browser runner backs this with `window` resize events, `setTimeout` and
//! `document.getElementById`; tests and demos use the headless host from
//! `tvroom-platform`.

use web_time::Duration;

use crate::{Dispose, Size};

pub type ResizeCallback = Box<dyn Fn(Size)>;

pub trait Host {
    /// Current viewport size in dp.
    fn viewport(&self) -> Size;

    /// Calls `f` with the new viewport size on every resize until the
    /// returned guard runs.
    fn on_resize(&self, f: ResizeCallback) -> Dispose;

    /// Runs `f` once after `delay`, unless the returned guard runs first.
    fn set_timeout(&self, delay: Duration, f: Box<dyn FnOnce()>) -> Dispose;

    /// Whether the page has an element with this id.
    fn has_element(&self, id: &str) -> bool;

    /// Page origin, e.g. `https://example.com`. Passed to the video embed.
    fn origin(&self) -> String {
        String::new()
    }
}
