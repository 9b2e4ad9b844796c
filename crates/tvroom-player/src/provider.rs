use std::rc::Rc;

use crate::{PlayerError, PlayerOptions, PlayerState};

/// Live player instance handed out by the provider once it is ready.
///
/// Only `play` is a command; the rest is read for diagnostics.
pub trait PlayerHandle {
    fn play(&self) -> Result<(), PlayerError>;

    fn state(&self) -> Option<PlayerState> {
        None
    }
    fn current_time(&self) -> f64 {
        0.0
    }
    fn duration(&self) -> f64 {
        0.0
    }
    fn is_muted(&self) -> bool {
        true
    }
    fn volume(&self) -> u8 {
        0
    }
    fn video_url(&self) -> Option<String> {
        None
    }
}

pub type ReadyCallback = Rc<dyn Fn(Box<dyn PlayerHandle>)>;
pub type CodeCallback = Rc<dyn Fn(i32)>;

/// The three callbacks an embed invokes over its lifetime.
#[derive(Clone)]
pub struct PlayerCallbacks {
    pub on_ready: ReadyCallback,
    /// Raw state code (`-1, 0, 1, 2, 3, 5`).
    pub on_state_change: CodeCallback,
    /// Raw error code (`2, 5, 100, 101, 150`).
    pub on_error: CodeCallback,
}

/// Something that can embed a video player: the YouTube iframe API in a
/// browser, a scripted fake in tests.
pub trait VideoProvider {
    fn create(
        &self,
        video_id: &str,
        options: &PlayerOptions,
        callbacks: PlayerCallbacks,
    ) -> Result<(), PlayerError>;
}
