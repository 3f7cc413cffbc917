//! Outer layer: errors, defaults, file I/O, diagnostics and the command line

/// Command-line parsing and the per-file sampling runner
pub mod cli;
/// Named constants and defaults
pub mod configuration;
/// Diagnostic image writers
pub mod debug;
/// Error types shared by the whole crate
pub mod error;
/// Conversion between image files and float buffers
pub mod image;
/// Progress bars for multi-file runs
pub mod progress;
