//! Errors at the serialization boundaries. Interaction operations are
//! total (stale ids are no-ops, bad geometry is clamped) and never fail.

use thiserror::Error;

pub type CanvasResult<T> = Result<T, CanvasError>;

#[derive(Debug, Error)]
pub enum CanvasError {
    /// A history snapshot could not be encoded.
    #[error("snapshot encode failed: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    /// A history snapshot could not be decoded.
    #[error("snapshot decode failed: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    /// Document JSON import/export failed.
    #[error("document JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A bulk-loaded layer set cannot be normalized.
    #[error("invalid layer set: {0}")]
    InvalidLayers(String),
}
