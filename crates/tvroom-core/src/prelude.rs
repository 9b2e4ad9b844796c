pub use crate::animation::{AnimatedValue, AnimationSpec, TestClock, set_clock};
pub use crate::color::{Brush, Color, ColorStop, adjust_color};
pub use crate::effects::{Dispose, effect, on_unmount};
pub use crate::error::Error;
pub use crate::geometry::{Rect, Size};
pub use crate::host::Host;
pub use crate::modifier::Modifier;
pub use crate::scope::{Scope, current_scope};
pub use crate::signal::{Signal, signal};
pub use crate::state::{StateHolder, Store};
pub use crate::view::{View, ViewId, ViewKind};
pub use taffy::{AlignItems, JustifyContent};
