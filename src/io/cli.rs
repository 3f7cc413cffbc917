//! Command-line interface for running cut sampling over PNG files

use crate::cutout::{CutSession, CutoutBatch, FlipJitter, SessionConfig, StepRequest};
use crate::io::configuration::{
    DEFAULT_CUT_SIZE, DEFAULT_DECAY_SCALE, DEFAULT_DECAY_SIGMA, DEFAULT_INNER_COUNT,
    DEFAULT_INNER_GRAY_FRACTION, DEFAULT_INNER_SIZE_EXPONENT, DEFAULT_OVERLAP_PENALTY,
    DEFAULT_OVERVIEW_COUNT, DEFAULT_SEED, DEFAULT_STEPS,
};
use crate::io::debug::save_debug_images;
use crate::io::error::Result;
use crate::io::image::load_image;
use crate::io::progress::ProgressManager;
use crate::spatial::HeatmapConfig;
use clap::Parser;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "cutwise")]
#[command(
    author,
    version,
    about = "Sample heatmap-guided cutouts from images and dump diagnostics"
)]
/// Command-line arguments for the cut sampler
// Sampling exposes several independent on/off switches
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Random seed for reproducible sampling
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Sampling steps per file
    #[arg(short = 'n', long, default_value_t = DEFAULT_STEPS)]
    pub steps: usize,

    /// Side length of every cut
    #[arg(short = 'c', long, default_value_t = DEFAULT_CUT_SIZE)]
    pub cut_size: usize,

    /// Whole-image cuts per step
    #[arg(short, long, default_value_t = DEFAULT_OVERVIEW_COUNT)]
    pub overview: usize,

    /// Sub-region cuts per step
    #[arg(short, long, default_value_t = DEFAULT_INNER_COUNT)]
    pub inner: usize,

    /// Multiplier applied to both cut counts
    #[arg(short = 'm', long, default_value_t = 1.0)]
    pub multiplier: f64,

    /// Inner cut size exponent (above 1 favors small cuts)
    #[arg(long, default_value_t = DEFAULT_INNER_SIZE_EXPONENT)]
    pub size_exponent: f64,

    /// Leading share of inner cuts converted to grayscale
    #[arg(long, default_value_t = DEFAULT_INNER_GRAY_FRACTION)]
    pub gray_fraction: f64,

    /// Guide inner cuts with a decaying heatmap
    #[arg(short = 'H', long)]
    pub heatmap: bool,

    /// Heatmap blend weight toward uniform on each decay
    #[arg(long, default_value_t = DEFAULT_DECAY_SCALE)]
    pub decay_scale: f64,

    /// Heatmap blur sigma on each decay
    #[arg(long, default_value_t = DEFAULT_DECAY_SIGMA)]
    pub decay_sigma: f64,

    /// Heatmap multiplier under each cut
    #[arg(long, default_value_t = DEFAULT_OVERLAP_PENALTY)]
    pub overlap_penalty: f64,

    /// Let inner cuts extend past the image edges
    #[arg(short, long)]
    pub pad_inner: bool,

    /// Use the smallest size for every inner cut
    #[arg(short, long)]
    pub fix_size: bool,

    /// Disable per-cut augmentation
    #[arg(long)]
    pub skip_augment: bool,

    /// Write heatmap, bounds overlay and cuts of the last step here
    #[arg(short, long, value_name = "DIR")]
    pub debug_dir: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Session settings derived from the flags
    pub const fn session_config(&self) -> SessionConfig {
        SessionConfig {
            cut_size: self.cut_size,
            cut_count_multiplier: self.multiplier,
            use_heatmap: self.heatmap,
            pad_inner: self.pad_inner,
            fix_inner_size: self.fix_size,
            skip_augment: self.skip_augment,
            heatmap: HeatmapConfig {
                decay_scale: self.decay_scale,
                decay_sigma: self.decay_sigma,
                overlap_penalty_coef: self.overlap_penalty,
            },
        }
    }

    /// Per-step request derived from the flags
    pub const fn step_request(&self) -> StepRequest {
        StepRequest {
            overview: self.overview,
            inner: self.inner,
            inner_size_exponent: self.size_exponent,
            inner_gray_fraction: self.gray_fraction,
        }
    }
}

/// Runs sampling sessions over every target file with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, loading, sampling or
    /// diagnostic export fails
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            info!("sampled {} of {} files", pm.tracked_files(), files.len());
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if is_png(&self.cli.target) {
                Ok(vec![self.cli.target.clone()])
            } else {
                Err(crate::io::error::io_error("Target file must be a PNG image"))
            }
        } else if self.cli.target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&self.cli.target)? {
                let path = entry?.path();
                if is_png(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(crate::io::error::io_error(
                "Target must be a PNG file or directory",
            ))
        }
    }

    /// Sample one file for the configured number of steps
    ///
    /// Returns the batch of the final step, or `None` when `steps` is zero.
    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<Option<CutoutBatch>> {
        let steps = self.cli.steps;
        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, steps);
        }

        let image = load_image(input_path)?;
        let mut session = CutSession::new(self.cli.session_config())?;
        let request = self.cli.step_request();
        let mut rng = StdRng::seed_from_u64(self.cli.seed);

        let mut last = None;
        for step in 1..=steps {
            last = Some(session.step(&image, &request, FlipJitter::default(), &mut rng)?);
            if let Some(ref mut pm) = self.progress_manager {
                pm.update_step(index, step);
            }
        }

        if let (Some(dir), Some(batch)) = (&self.cli.debug_dir, &last) {
            let file_dir = dir.join(input_path.file_stem().unwrap_or_default());
            save_debug_images(&file_dir, &image, batch, session.heatmap())?;
            info!("wrote diagnostics for {} to {}", input_path.display(), file_dir.display());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index);
        }

        Ok(last)
    }
}

fn is_png(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("png")
}
