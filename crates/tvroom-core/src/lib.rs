//! # State, scopes and effects for tvroom
//!
//! The room widgets are small and mostly presentational, but the pieces that
//! do carry behavior (light/power toggles, the player loop, debug
//! measurement) all sit on the same few primitives:
//!
//! - `Signal<T>`: observable value with explicit subscribe/unsubscribe.
//! - `StateHolder` + `Store`: a pure reducer plus the signal holding its state.
//! - `Dispose` / `Scope`: cleanup guards and the owner that runs them on
//!   unmount.
//! - `Host`: viewport size, resize events and timers from the embedding page.
//!
//! ## Signals
//!
//! ```rust
//! use tvroom_core::*;
//!
//! let count = signal(0);
//! count.set(1);
//! count.update(|v| *v += 1);
//! assert_eq!(count.get(), 2);
//! ```
//!
//! ## Reducers
//!
//! ```rust
//! use tvroom_core::*;
//!
//! struct Counter;
//! impl StateHolder for Counter {
//!     type State = i32;
//!     type Event = i32;
//!     fn initial_state() -> i32 { 0 }
//!     fn reduce(s: &i32, by: i32) -> i32 { s + by }
//! }
//!
//! let store: Store<Counter> = Store::new();
//! store.dispatch(3);
//! assert_eq!(store.get(), 3);
//! ```
//!
//! ## Effects and cleanup
//!
//! Every subscription hands back a `Dispose`. Inside `Scope::run`, `effect`
//! also registers the guard on the scope, so disposing the scope (unmount)
//! tears everything down exactly once:
//!
//! ```rust
//! use tvroom_core::*;
//!
//! let scope = Scope::new();
//! let d = scope.run(|| effect(|| on_unmount(|| log::info!("unmounted"))));
//! scope.dispose();
//! assert!(d.is_disposed());
//! ```

pub mod animation;
pub mod color;
pub mod effects;
pub mod error;
pub mod geometry;
pub mod host;
pub mod modifier;
pub mod prelude;
pub mod scope;
pub mod signal;
pub mod state;
pub mod tests;
pub mod view;

pub use color::*;
pub use effects::*;
pub use error::Error;
pub use geometry::*;
pub use host::*;
pub use modifier::*;
pub use scope::*;
pub use signal::*;
pub use state::*;
pub use view::*;
