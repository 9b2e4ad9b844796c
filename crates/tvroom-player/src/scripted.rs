//! In-memory provider driven by hand. Used by tests and the headless demo in
//! place of the iframe API.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::{PlayerCallbacks, PlayerError, PlayerHandle, PlayerOptions, PlayerState, VideoProvider};

#[derive(Default)]
struct Shared {
    callbacks: RefCell<Option<PlayerCallbacks>>,
    created: RefCell<Vec<(String, PlayerOptions)>>,
    plays: Cell<u64>,
    fail_plays: Cell<bool>,
    state: Cell<Option<PlayerState>>,
    position: Cell<f64>,
}

#[derive(Clone, Default)]
pub struct ScriptedProvider {
    shared: Rc<Shared>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total `play()` calls received by handles from this provider.
    pub fn play_count(&self) -> u64 {
        self.shared.plays.get()
    }

    /// `(video_id, options)` for each `create` call.
    pub fn created(&self) -> Vec<(String, PlayerOptions)> {
        self.shared.created.borrow().clone()
    }

    pub fn fail_plays(&self, fail: bool) {
        self.shared.fail_plays.set(fail);
    }

    pub fn fire_ready(&self) {
        if let Some(cb) = self.callbacks() {
            (cb.on_ready)(Box::new(ScriptedHandle {
                shared: self.shared.clone(),
            }));
        }
    }

    pub fn fire_state(&self, code: i32) {
        if let Some(s) = PlayerState::from_code(code) {
            self.shared.state.set(Some(s));
        }
        if let Some(cb) = self.callbacks() {
            (cb.on_state_change)(code);
        }
    }

    pub fn fire_error(&self, code: i32) {
        if let Some(cb) = self.callbacks() {
            (cb.on_error)(code);
        }
    }

    /// Moves the fake playhead; reported through `current_time`.
    pub fn seek(&self, seconds: f64) {
        self.shared.position.set(seconds);
    }

    fn callbacks(&self) -> Option<PlayerCallbacks> {
        self.shared.callbacks.borrow().clone()
    }
}

impl VideoProvider for ScriptedProvider {
    fn create(
        &self,
        video_id: &str,
        options: &PlayerOptions,
        callbacks: PlayerCallbacks,
    ) -> Result<(), PlayerError> {
        self.shared
            .created
            .borrow_mut()
            .push((video_id.to_string(), options.clone()));
        *self.shared.callbacks.borrow_mut() = Some(callbacks);
        Ok(())
    }
}

struct ScriptedHandle {
    shared: Rc<Shared>,
}

impl PlayerHandle for ScriptedHandle {
    fn play(&self) -> Result<(), PlayerError> {
        if self.shared.fail_plays.get() {
            return Err(PlayerError::Command("scripted failure".into()));
        }
        self.shared.plays.set(self.shared.plays.get() + 1);
        Ok(())
    }

    fn state(&self) -> Option<PlayerState> {
        self.shared.state.get()
    }

    fn current_time(&self) -> f64 {
        self.shared.position.get()
    }

    fn duration(&self) -> f64 {
        3600.0
    }

    fn is_muted(&self) -> bool {
        true
    }

    fn video_url(&self) -> Option<String> {
        self.shared
            .created
            .borrow()
            .last()
            .map(|(id, _)| format!("https://www.youtube.com/watch?v={id}"))
    }
}
