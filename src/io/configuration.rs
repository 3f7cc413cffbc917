//! Sampling constants and runtime configuration defaults

// Resampling filter shape
/// Radius of the Lanczos window used for anti-aliasing
pub const LANCZOS_RADIUS: f64 = 2.0;
/// Cubic convolution coefficient (matches common bicubic implementations)
pub const BICUBIC_COEFFICIENT: f64 = -0.75;

// Heatmap dynamics
/// Weight of the uniform floor when relaxing the heatmap
pub const DEFAULT_DECAY_SCALE: f64 = 0.3;
/// Standard deviation of the heatmap decay blur, in pixels
pub const DEFAULT_DECAY_SIGMA: f64 = 7.0;
/// Multiplier applied to every weight covered by a new cut
pub const DEFAULT_OVERLAP_PENALTY: f64 = 0.3;
/// Gaussian kernels are cut off this many sigmas from the center
pub const GAUSSIAN_TRUNCATE: f64 = 4.0;

// Cutout batch defaults
/// Side length of every emitted cut
pub const DEFAULT_CUT_SIZE: usize = 224;
/// Number of whole-image cuts per call
pub const DEFAULT_OVERVIEW_COUNT: usize = 4;
/// Number of sub-region cuts per call
pub const DEFAULT_INNER_COUNT: usize = 0;
/// Exponent shaping the inner cut size distribution
pub const DEFAULT_INNER_SIZE_EXPONENT: f64 = 0.5;
/// Leading share of inner cuts converted to grayscale
pub const DEFAULT_INNER_GRAY_FRACTION: f64 = 0.2;
/// Deterministic overview variants available before falling back to augmentation
pub const MAX_DETERMINISTIC_OVERVIEWS: usize = 4;

// A call with no cuts at all would hand the scorer an empty batch
/// Inner cut count substituted when a step asks for no cuts
pub const MIN_INNER_WHEN_EMPTY: usize = 2;

/// ITU-R 601 luma weights for red, green and blue
pub const LUMA_WEIGHTS: [f32; 3] = [0.2989, 0.587, 0.114];

// Scatter sampler size distribution
/// Mean of the relative cut size
pub const SCATTER_SIZE_MEAN: f64 = 0.8;
/// Standard deviation of the relative cut size
pub const SCATTER_SIZE_STD: f64 = 0.3;

// Reference augmentation strength
/// Probability of mirroring a cut horizontally
pub const AUGMENT_FLIP_PROBABILITY: f64 = 0.5;
/// Amplitude of the uniform noise added to each pixel
pub const AUGMENT_NOISE_AMPLITUDE: f32 = 0.01;

// Command line defaults
/// Fixed seed for reproducible sampling
pub const DEFAULT_SEED: u64 = 42;
/// Default number of sampling steps per file
pub const DEFAULT_STEPS: usize = 10;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Diagnostic output names
/// File name of the rendered heatmap
pub const HEATMAP_IMAGE_NAME: &str = "heatmap.png";
/// File name of the bounds overlay
pub const BOUNDS_IMAGE_NAME: &str = "inner_cut_bounds.png";
/// Prefix of the per-cut images
pub const CUT_IMAGE_PREFIX: &str = "cutout";
