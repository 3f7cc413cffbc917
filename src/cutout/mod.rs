//! Cut generation: guided overview/inner cuts, scatter cuts, and the per-run session

/// Pluggable per-cut augmentation strategies
pub mod augment;
/// Overview and inner cut orchestration
pub mod sampler;
/// Unguided random cuts over a padded canvas
pub mod scatter;
/// Heatmap-owning driver for repeated sampling steps
pub mod session;

pub use augment::{Augmentation, FlipJitter, Identity};
pub use sampler::{CutoutBatch, CutoutParams, CutoutSampler, OverviewVariant};
pub use scatter::ScatterSampler;
pub use session::{CutSession, SessionConfig, StepRequest};
