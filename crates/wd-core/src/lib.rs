pub mod document;
pub mod error;
pub mod geometry;
pub mod id;
pub mod layers;
pub mod model;
pub mod order;
pub mod store;

pub use document::{DocMutation, Document, LayerRemoval, Snapshot};
pub use error::{CanvasError, CanvasResult};
pub use geometry::{ViewTransform, intersects, rect_from_drag, snap};
pub use id::{ElementId, LayerId};
pub use layers::LayerStack;
pub use model::*;
pub use order::{PaintKey, ZOrder};
pub use store::ElementStore;

// Re-export kurbo types so downstream crates share one geometry vocabulary
pub use kurbo::{Point, Rect, Vec2};
