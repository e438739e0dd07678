//! Editor tunables.
//!
//! Every field has a default, so a partial JSON object (or `{}`) is a
//! valid configuration.

use serde::{Deserialize, Serialize};
use wd_core::CanvasResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Undo depth. The oldest snapshot is evicted beyond this.
    pub history_limit: usize,
    /// Smallest width/height a resize can produce (canvas units).
    pub min_size: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    /// Per wheel step.
    pub zoom_in_factor: f64,
    pub zoom_out_factor: f64,
    /// Canvas-space distance a marquee must travel to count as a drag
    /// rather than a click. Smaller marquees are also not drawn.
    pub marquee_threshold: f64,
    pub nudge_step: f64,
    /// With shift held.
    pub nudge_step_large: f64,
    pub paste_offset: f64,
    /// Resize handle side, in screen pixels.
    pub handle_size: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: 50,
            min_size: wd_core::MIN_SIZE,
            min_scale: 0.1,
            max_scale: 10.0,
            zoom_in_factor: 1.05,
            zoom_out_factor: 0.95,
            marquee_threshold: 5.0,
            nudge_step: 1.0,
            nudge_step_large: 10.0,
            paste_offset: 20.0,
            handle_size: 8.0,
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> CanvasResult<Self> {
        let config = serde_json::from_str(json)?;
        Ok(config)
    }
}
