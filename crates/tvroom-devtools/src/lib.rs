//! Debug snapshots for the room: measured element sizes plus the props the
//! TV was composed with, rendered as the text of the debug panel.

use serde::{Deserialize, Serialize};
use tvroom_core::Size;

/// Measured sizes of the three nested room elements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugSnapshot {
    pub tv_container: Size,
    pub tv_scene: Size,
    pub tv: Size,
}

impl DebugSnapshot {
    pub fn is_empty(&self) -> bool {
        *self == DebugSnapshot::default()
    }
}

/// Contents of the debug panel.
#[derive(Clone, Debug, Default)]
pub struct DebugPanel {
    pub snapshot: DebugSnapshot,
    pub props: serde_json::Value,
    /// Number of measurements published so far.
    pub measurements: u64,
}

impl DebugPanel {
    pub fn new(snapshot: DebugSnapshot, props: serde_json::Value) -> Self {
        Self {
            snapshot,
            props,
            measurements: 0,
        }
    }

    pub fn lines(&self) -> Vec<String> {
        let pretty = |v: &serde_json::Value| {
            serde_json::to_string_pretty(v).unwrap_or_else(|e| {
                log::warn!("debug panel: cannot render value: {e}");
                String::from("{}")
            })
        };
        let dims = serde_json::to_value(self.snapshot).unwrap_or_default();
        vec![
            "Debug Information".to_string(),
            "Dimensions:".to_string(),
            pretty(&dims),
            "TV Props:".to_string(),
            pretty(&self.props),
        ]
    }

    pub fn text(&self) -> String {
        self.lines().join("\n")
    }
}
