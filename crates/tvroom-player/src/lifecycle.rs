//! Loop-enforcing player lifecycle.
//!
//! The embed is asked to autoplay, mute and loop, but none of that is trusted:
//! platforms block autoplay, `loop=1` is ignored for some videos, and a cued
//! video waits for a click. [`PlayerLifecycle`] decides which corrective
//! `play()` to issue for each signal; [`LoopController`] owns the handle and
//! issues it.
//!
//! ```text
//! Unready --ready--> Ready --play--> Playing <-> Paused / Buffering
//!                                       |
//!                   Ended / Cued --play-+   (never left standing)
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use web_time::Instant;

use crate::{PlayerCallbacks, PlayerError, PlayerHandle, PlayerState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Unready,
    Ready,
    Unstarted,
    Playing,
    Paused,
    Buffering,
    Cued,
    Ended,
}

impl From<PlayerState> for Phase {
    fn from(s: PlayerState) -> Self {
        match s {
            PlayerState::Unstarted => Phase::Unstarted,
            PlayerState::Ended => Phase::Ended,
            PlayerState::Playing => Phase::Playing,
            PlayerState::Paused => Phase::Paused,
            PlayerState::Buffering => Phase::Buffering,
            PlayerState::Cued => Phase::Cued,
        }
    }
}

/// Why a `play()` was issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayReason {
    /// Player just became ready; covers blocked autoplay.
    Autoplay,
    /// End of stream; restart to keep the loop going.
    LoopRestart,
    /// Video cued but not started.
    StartCued,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub plays_issued: u64,
    pub restarts: u64,
    pub failed_commands: u64,
    pub last_restart: Option<Instant>,
}

/// Pure transition logic. Holds no handle; every method returns the command
/// (if any) the caller must issue.
#[derive(Debug)]
pub struct PlayerLifecycle {
    phase: Phase,
    last_state: Option<PlayerState>,
    last_error: Option<PlayerError>,
    stats: LoopStats,
}

impl Default for PlayerLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerLifecycle {
    pub fn new() -> Self {
        Self {
            phase: Phase::Unready,
            last_state: None,
            last_error: None,
            stats: LoopStats::default(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn last_state(&self) -> Option<PlayerState> {
        self.last_state
    }
    pub fn last_error(&self) -> Option<&PlayerError> {
        self.last_error.as_ref()
    }
    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    pub fn on_ready(&mut self) -> PlayReason {
        self.phase = Phase::Ready;
        PlayReason::Autoplay
    }

    /// Records the reported state. Returns the corrective play, if one is due.
    pub fn on_state_change(&mut self, code: i32) -> Option<PlayReason> {
        let Some(state) = PlayerState::from_code(code) else {
            log::warn!("[TV] ignoring unknown player state code {code}");
            return None;
        };
        self.last_state = Some(state);
        self.phase = state.into();
        match state {
            PlayerState::Ended => Some(PlayReason::LoopRestart),
            PlayerState::Cued => Some(PlayReason::StartCued),
            PlayerState::Unstarted
            | PlayerState::Playing
            | PlayerState::Paused
            | PlayerState::Buffering => None,
        }
    }

    pub fn on_error(&mut self, code: i32) -> PlayerError {
        let err = PlayerError::from_code(code);
        self.last_error = Some(err.clone());
        err
    }

    /// Bookkeeping after a play command went out.
    pub fn played(&mut self, reason: PlayReason) {
        self.stats.plays_issued += 1;
        if reason == PlayReason::LoopRestart {
            self.stats.restarts += 1;
            self.stats.last_restart = Some(Instant::now());
        }
        if matches!(self.phase, Phase::Ended | Phase::Cued) {
            self.phase = Phase::Playing;
        }
    }

    pub fn play_failed(&mut self, err: PlayerError) {
        self.stats.failed_commands += 1;
        self.last_error = Some(err);
    }
}

/// Owns the player handle for one mounted TV and issues the commands the
/// lifecycle asks for.
///
/// Commands are issued with no `RefCell` borrow held, so a provider that
/// reports a state change synchronously from inside `play()` is fine.
pub struct LoopController {
    lifecycle: RefCell<PlayerLifecycle>,
    handle: RefCell<Option<Rc<dyn PlayerHandle>>>,
}

impl Default for LoopController {
    fn default() -> Self {
        Self {
            lifecycle: RefCell::new(PlayerLifecycle::new()),
            handle: RefCell::new(None),
        }
    }
}

impl LoopController {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn phase(&self) -> Phase {
        self.lifecycle.borrow().phase()
    }
    pub fn stats(&self) -> LoopStats {
        self.lifecycle.borrow().stats()
    }
    pub fn last_error(&self) -> Option<PlayerError> {
        self.lifecycle.borrow().last_error().cloned()
    }
    pub fn has_handle(&self) -> bool {
        self.handle.borrow().is_some()
    }

    pub fn ready(&self, handle: Box<dyn PlayerHandle>) {
        let handle: Rc<dyn PlayerHandle> = Rc::from(handle);
        log::info!(
            "[TV] player ready (url: {})",
            handle.video_url().as_deref().unwrap_or("?")
        );
        *self.handle.borrow_mut() = Some(handle);
        let reason = self.lifecycle.borrow_mut().on_ready();
        self.issue(reason);
    }

    pub fn state_changed(&self, code: i32) {
        if let Some(h) = self.current_handle() {
            log::debug!(
                "[TV] player state changed: state={code} ({}) t={:.1}/{:.1}s muted={} volume={}",
                PlayerState::from_code(code).map_or("?", |s| s.name()),
                h.current_time(),
                h.duration(),
                h.is_muted(),
                h.volume()
            );
        }
        let reason = self.lifecycle.borrow_mut().on_state_change(code);
        if let Some(reason) = reason {
            self.issue(reason);
        }
    }

    pub fn errored(&self, code: i32) {
        let err = self.lifecycle.borrow_mut().on_error(code);
        log::error!("[TV] player error: code={code} description={err}");
    }

    /// Drops the handle (unmount). Later signals are recorded but issue
    /// nothing.
    pub fn release(&self) {
        self.handle.borrow_mut().take();
    }

    /// Callbacks for [`crate::VideoProvider::create`]. They hold the
    /// controller weakly, so a provider outliving the TV is harmless.
    pub fn callbacks(self: &Rc<Self>) -> PlayerCallbacks {
        let on_ready = {
            let this: Weak<Self> = Rc::downgrade(self);
            Rc::new(move |h: Box<dyn PlayerHandle>| {
                if let Some(this) = this.upgrade() {
                    this.ready(h);
                }
            })
        };
        let on_state_change = {
            let this = Rc::downgrade(self);
            Rc::new(move |code: i32| {
                if let Some(this) = this.upgrade() {
                    this.state_changed(code);
                }
            })
        };
        let on_error = {
            let this = Rc::downgrade(self);
            Rc::new(move |code: i32| {
                if let Some(this) = this.upgrade() {
                    this.errored(code);
                }
            })
        };
        PlayerCallbacks {
            on_ready,
            on_state_change,
            on_error,
        }
    }

    fn current_handle(&self) -> Option<Rc<dyn PlayerHandle>> {
        self.handle.borrow().clone()
    }

    fn issue(&self, reason: PlayReason) {
        let Some(handle) = self.current_handle() else {
            log::warn!("[TV] {reason:?} requested before the player was ready");
            return;
        };
        match handle.play() {
            Ok(()) => {
                if reason == PlayReason::LoopRestart {
                    log::info!("[TV] video ended, restart initiated");
                } else {
                    log::debug!("[TV] play issued ({reason:?})");
                }
                self.lifecycle.borrow_mut().played(reason);
            }
            Err(e) => {
                log::error!("[TV] play ({reason:?}) failed: {e}");
                self.lifecycle.borrow_mut().play_failed(e);
            }
        }
    }
}
