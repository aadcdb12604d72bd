/// Bounding boxes
pub mod bbox;

/// NaN-aware averaging helpers
pub mod stats;
