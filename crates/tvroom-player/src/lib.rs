//! Embedded video provider boundary.
//!
//! The TV never constructs a player itself. It hands a [`VideoProvider`] the
//! video id, [`PlayerOptions`] and a set of [`PlayerCallbacks`], and reacts to
//! whatever the provider reports through [`LoopController`].

pub mod api;
pub mod error;
pub mod lifecycle;
pub mod options;
pub mod provider;
pub mod scripted;
pub mod state;

pub use api::{api_info, init_api, is_api_ready};
pub use error::PlayerError;
pub use lifecycle::{LoopController, LoopStats, Phase, PlayReason, PlayerLifecycle};
pub use options::{DEFAULT_VIDEO_ID, PlayerOptions, PlayerVars};
pub use provider::{PlayerCallbacks, PlayerHandle, VideoProvider};
pub use state::PlayerState;
