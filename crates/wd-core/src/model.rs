//! Core data model: placed elements, layers and canvas-level settings.
//!
//! Widget renderers are opaque to this crate. An element is a bounding box,
//! a type tag, a handful of interaction flags and an uninterpreted bag of
//! widget properties (`props`) that renderers and the inspector own.

use crate::id::{ElementId, LayerId};
use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// Smallest width/height the manipulation engine will produce.
pub const MIN_SIZE: f64 = 20.0;

// ─── Elements ────────────────────────────────────────────────────────────

/// A placed widget instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    /// Widget type tag (`"knob"`, `"slider"`, `"meter"`, ...).
    pub kind: String,
    /// Display name, shown by the layers and history panels.
    #[serde(default)]
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees.
    #[serde(default)]
    pub rotation: f64,
    /// Rank in effective paint order. Rewritten by the store; never an input.
    #[serde(default)]
    pub z_index: u32,
    /// Suppresses drag/resize/nudge but not selection.
    #[serde(default)]
    pub locked: bool,
    #[serde(default = "default_true")]
    pub visible: bool,
    /// `None` or an unknown id both mean the default layer.
    #[serde(default)]
    pub layer_id: Option<LayerId>,
    /// Container element. Children are skipped by top-level iteration.
    #[serde(default)]
    pub parent_id: Option<ElementId>,
    /// Widget-specific properties, opaque to the engine.
    #[serde(default)]
    pub props: serde_json::Value,
}

fn default_true() -> bool {
    true
}

impl Element {
    /// A new element with a fresh id derived from `kind`.
    pub fn new(kind: &str, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::with_id(ElementId::with_prefix(kind), kind, x, y, width, height)
    }

    pub fn with_id(id: ElementId, kind: &str, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id,
            kind: kind.to_string(),
            name: id.as_str().to_string(),
            x,
            y,
            width,
            height,
            rotation: 0.0,
            z_index: 0,
            locked: false,
            visible: true,
            layer_id: None,
            parent_id: None,
            props: serde_json::Value::Null,
        }
    }

    pub fn on_layer(mut self, layer: LayerId) -> Self {
        self.layer_id = Some(layer);
        self
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub fn child_of(mut self, parent: ElementId) -> Self {
        self.parent_id = Some(parent);
        self
    }

    /// Canvas-space axis-aligned bounds (rotation ignored).
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Apply a partial update. Returns `true` if any field changed.
    pub fn apply(&mut self, patch: &ElementPatch) -> bool {
        let before = self.clone();
        if let Some(kind) = &patch.kind {
            self.kind.clone_from(kind);
        }
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(w) = patch.width {
            self.width = w;
        }
        if let Some(h) = patch.height {
            self.height = h;
        }
        if let Some(r) = patch.rotation {
            self.rotation = r;
        }
        if let Some(locked) = patch.locked {
            self.locked = locked;
        }
        if let Some(visible) = patch.visible {
            self.visible = visible;
        }
        if let Some(layer) = patch.layer_id {
            self.layer_id = layer;
        }
        if let Some(parent) = patch.parent_id {
            self.parent_id = parent;
        }
        if let Some(props) = &patch.props {
            self.props.clone_from(props);
        }
        *self != before
    }
}

/// Partial element update. `id` and `z_index` are deliberately absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementPatch {
    pub kind: Option<String>,
    pub name: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
    pub locked: Option<bool>,
    pub visible: Option<bool>,
    pub layer_id: Option<Option<LayerId>>,
    pub parent_id: Option<Option<ElementId>>,
    pub props: Option<serde_json::Value>,
}

impl ElementPatch {
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn bounds(rect: Rect) -> Self {
        Self {
            x: Some(rect.x0),
            y: Some(rect.y0),
            width: Some(rect.width()),
            height: Some(rect.height()),
            ..Self::default()
        }
    }
}

// ─── Layers ──────────────────────────────────────────────────────────────

/// Color tag shown next to a layer in the layers panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Gray,
}

impl LayerColor {
    pub const ALL: [LayerColor; 7] = [
        LayerColor::Red,
        LayerColor::Orange,
        LayerColor::Yellow,
        LayerColor::Green,
        LayerColor::Blue,
        LayerColor::Purple,
        LayerColor::Gray,
    ];

    pub fn to_hex(self) -> &'static str {
        match self {
            LayerColor::Red => "#ef4444",
            LayerColor::Orange => "#f97316",
            LayerColor::Yellow => "#eab308",
            LayerColor::Green => "#22c55e",
            LayerColor::Blue => "#3b82f6",
            LayerColor::Purple => "#a855f7",
            LayerColor::Gray => "#6b7280",
        }
    }
}

/// A named, ordered grouping of elements. `order` 0 is the bottom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    pub color: LayerColor,
    pub order: usize,
    pub visible: bool,
    pub locked: bool,
}

impl Layer {
    pub fn default_layer() -> Self {
        Self {
            id: LayerId::default_layer(),
            name: "Default".to_string(),
            color: LayerColor::Gray,
            order: 0,
            visible: true,
            locked: false,
        }
    }
}

/// Partial layer update. Id and order are managed by the stack.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerPatch {
    pub name: Option<String>,
    pub color: Option<LayerColor>,
    pub visible: Option<bool>,
    pub locked: Option<bool>,
}

// ─── Canvas settings ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    Linear,
    Radial,
}

/// Canvas background fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Background {
    Color {
        color: String,
    },
    Gradient {
        kind: GradientKind,
        colors: Vec<String>,
        angle: Option<f64>,
    },
    Image {
        url: String,
    },
}

impl Default for Background {
    fn default() -> Self {
        Background::Color {
            color: "#1a1a1a".to_string(),
        }
    }
}

/// Canvas-level settings. Part of the document, therefore undoable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasSettings {
    pub width: f64,
    pub height: f64,
    pub background: Background,
    pub snap_to_grid: bool,
    pub grid_size: f64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            background: Background::default(),
            snap_to_grid: false,
            grid_size: 10.0,
        }
    }
}
