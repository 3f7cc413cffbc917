//! Where cuts land: bounds arithmetic and the sampling heatmap
//!
//! This module contains:
//! - Center-to-bounds conversion with per-side clamping
//! - Uniform centerpoint draws
//! - The weighted heatmap with suppression and decay

/// Cut window bounds and uniform centerpoint draws
pub mod bounds;
/// Weighted centerpoint sampling with suppression and decay
pub mod heatmap;

pub use bounds::{CutBounds, center_to_bounds, random_sample};
pub use heatmap::{HeatmapConfig, SpatialHeatmap};
