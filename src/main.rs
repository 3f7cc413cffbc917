//! CLI entry point for the cutout sampler

use clap::Parser;
use cutwise::io::cli::{Cli, FileProcessor};

fn main() -> cutwise::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
