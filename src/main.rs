//! CLI entry point for photomosaic generation

use clap::Parser;
use photomosaic::io::cli::{Cli, MosaicJob};

// Allow print for the closing summary line
#[allow(clippy::print_stderr)]
fn main() -> photomosaic::Result<()> {
    let cli = Cli::parse();
    let mut job = MosaicJob::new(cli);
    let summary = job.run()?;
    eprintln!("{summary}");
    Ok(())
}
