//! Command-line interface for building a photomosaic from one input image

use crate::algorithm::assembler::MosaicAssembler;
use crate::algorithm::pool::SourcePool;
use crate::io::configuration::DEFAULT_SOURCE_DIR;
use crate::io::error::{MosaicError, Result};
use crate::io::image::{load_pixels, save_pixels};
use crate::io::progress::ProgressManager;
use crate::io::sources::collect_source_paths;
use crate::spatial::MosaicGrid;
use clap::Parser;
use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "photomosaic")]
#[command(
    author,
    version,
    about = "Turn an image into a photomosaic where each cell is a source photo"
)]
/// Command-line arguments for the mosaic tool
pub struct Cli {
    /// Cell side length in pixels; larger values use fewer, bigger source photos
    #[arg(value_name = "SQUARE_PIXEL")]
    pub square_pixel: usize,

    /// Image to turn into a photomosaic
    #[arg(value_name = "INPUT_IMAGE")]
    pub input_image: PathBuf,

    /// Where to write the photomosaic; the extension selects the format
    #[arg(value_name = "OUTPUT_IMAGE")]
    pub output_image: PathBuf,
}

/// Figures reported after a successful run
#[derive(Debug, Clone)]
pub struct MosaicSummary {
    /// Output `(height, width)` in pixels
    pub dimensions: (usize, usize),
    /// Number of cells in the grid
    pub cell_count: usize,
    /// Number of photos in the source pool
    pub source_count: usize,
    /// Number of different photos placed in the output
    pub distinct_tiles: usize,
    /// Wall time from start to finished write
    pub elapsed: Duration,
}

impl fmt::Display for MosaicSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Photomosaic {}x{} created from {} cells using {} of {} source images in {:.2?}",
            self.dimensions.0,
            self.dimensions.1,
            self.cell_count,
            self.distinct_tiles,
            self.source_count,
            self.elapsed
        )
    }
}

/// Runs the full pipeline for one set of CLI arguments
pub struct MosaicJob {
    cli: Cli,
    source_dir: PathBuf,
    progress_manager: ProgressManager,
}

impl MosaicJob {
    /// Create a job reading source photos from [`DEFAULT_SOURCE_DIR`]
    pub fn new(cli: Cli) -> Self {
        Self::with_source_dir(cli, DEFAULT_SOURCE_DIR)
    }

    /// Create a job reading source photos from `source_dir`
    pub fn with_source_dir(cli: Cli, source_dir: impl Into<PathBuf>) -> Self {
        Self {
            cli,
            source_dir: source_dir.into(),
            progress_manager: ProgressManager::new(),
        }
    }

    /// Replace the progress display
    #[must_use]
    pub fn with_progress(mut self, progress_manager: ProgressManager) -> Self {
        self.progress_manager = progress_manager;
        self
    }

    /// Load, match, render and write the mosaic
    ///
    /// The tile size is checked against the input before any source photo is
    /// read. Nothing is written unless every step succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input or any source photo cannot be decoded
    /// - The tile size is zero or larger than the input
    /// - The source folder cannot be read or holds no photos
    /// - The output cannot be written
    pub fn run(&mut self) -> Result<MosaicSummary> {
        let start_time = Instant::now();

        let input = load_pixels(&self.cli.input_image)?;
        let grid = MosaicGrid::for_image(&input, self.cli.square_pixel)?;

        let paths = collect_source_paths(&self.source_dir)?;
        if paths.is_empty() {
            return Err(MosaicError::EmptyPool);
        }

        let load_bar = self.progress_manager.start_stage("Loading", paths.len());
        let pool = SourcePool::build_with(&paths, load_pixels, |_| load_bar.inc(1))?;
        ProgressManager::finish_stage(
            &load_bar,
            format!("{} source tiles ({} bytes)", pool.len(), pool.byte_size()),
        );

        let (height, width) = grid.trimmed_dimensions();
        let match_bar = self
            .progress_manager
            .start_stage("Matching", grid.cell_count());
        match_bar.set_message(format!("{height}x{width} image"));

        let assembler = MosaicAssembler::new(&pool, grid.tile_size());
        let plan = assembler.plan_with(&input, |_, _| match_bar.inc(1))?;
        let distinct_tiles = plan.distinct_tiles().len();
        ProgressManager::finish_stage(
            &match_bar,
            format!("{distinct_tiles} distinct tiles placed"),
        );

        let mosaic = assembler.render(&plan)?;
        save_pixels(&mosaic, &self.cli.output_image)?;
        self.progress_manager.finish();

        Ok(MosaicSummary {
            dimensions: (height, width),
            cell_count: grid.cell_count(),
            source_count: pool.len(),
            distinct_tiles,
            elapsed: start_time.elapsed(),
        })
    }
}
