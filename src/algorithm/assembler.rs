//! Mosaic planning and rendering
//!
//! Assembly runs in two passes over the grid. Planning averages every cell of
//! the trimmed input and matches it against the pool, producing a grid of pool
//! indices. Rendering resizes each distinct matched tile once and writes it
//! into every cell that chose it, inside a single preallocated output buffer.
//! Both passes run cells in parallel; results are identical to a row-major
//! sequential walk.

use ndarray::{Array2, ArrayBase, Axis, Data, Ix3, aview1, s};
use rayon::prelude::*;

use crate::algorithm::cache::ResizedTileCache;
use crate::algorithm::matcher::best_match;
use crate::algorithm::pool::SourcePool;
use crate::analysis::colour::{Colour, average_colour, colour_to_pixel};
use crate::io::configuration::CHANNELS;
use crate::io::error::{MosaicError, Result, computation_error, invalid_parameter};
use crate::spatial::{MosaicGrid, PixelImage};

/// Outcome of matching one cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMatch {
    /// Pool index of the chosen tile
    pub tile: usize,
    /// Average colour of the cell in the input
    pub colour: Colour,
}

/// Per-cell matches for a whole image, ready to render
#[derive(Debug, Clone)]
pub struct MosaicPlan {
    grid: MosaicGrid,
    cells: Array2<CellMatch>,
}

impl MosaicPlan {
    /// Grid the plan was computed on
    pub const fn grid(&self) -> &MosaicGrid {
        &self.grid
    }

    /// Matches indexed by `(row, col)`
    pub const fn cells(&self) -> &Array2<CellMatch> {
        &self.cells
    }

    /// Pool index chosen for a cell
    pub fn tile_at(&self, row: usize, col: usize) -> Option<usize> {
        self.cells.get((row, col)).map(|cell| cell.tile)
    }

    /// Sorted pool indices used at least once
    pub fn distinct_tiles(&self) -> Vec<usize> {
        let mut tiles: Vec<usize> = self.cells.iter().map(|cell| cell.tile).collect();
        tiles.sort_unstable();
        tiles.dedup();
        tiles
    }
}

/// Builds mosaics from one source pool at a fixed cell size
pub struct MosaicAssembler<'a> {
    pool: &'a SourcePool,
    tile_size: usize,
}

impl<'a> MosaicAssembler<'a> {
    /// Create an assembler for cells of side `tile_size`
    pub const fn new(pool: &'a SourcePool, tile_size: usize) -> Self {
        Self { pool, tile_size }
    }

    /// Side length of one cell
    pub const fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// Match every cell of `input` against the pool
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The tile size is zero or larger than the input (`InvalidTileSize`)
    /// - The pool is empty (`EmptyPool`)
    /// - The input isn't 3-channel RGB (`InvalidImage`)
    pub fn plan<S: Data<Elem = u8>>(&self, input: &ArrayBase<S, Ix3>) -> Result<MosaicPlan> {
        self.plan_with(input, |_, _| {})
    }

    /// Match every cell, calling `on_cell(row, col)` as each one completes
    ///
    /// `on_cell` runs on worker threads in no particular order.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`MosaicAssembler::plan`]
    pub fn plan_with<S, F>(&self, input: &ArrayBase<S, Ix3>, on_cell: F) -> Result<MosaicPlan>
    where
        S: Data<Elem = u8>,
        F: Fn(usize, usize) + Sync,
    {
        let grid = MosaicGrid::for_image(input, self.tile_size)?;
        if self.pool.is_empty() {
            return Err(MosaicError::EmptyPool);
        }

        let trimmed = grid.trim(input);
        let positions: Vec<(usize, usize)> = grid.cells().collect();

        let matches = positions
            .par_iter()
            .map(|&(row, col)| {
                let colour = average_colour(&grid.cell_view(&trimmed, row, col))?;
                let tile = best_match(&colour, self.pool)?;
                on_cell(row, col);
                Ok(CellMatch { tile, colour })
            })
            .collect::<Result<Vec<_>>>()?;

        let cells = Array2::from_shape_vec((grid.rows(), grid.cols()), matches)?;
        Ok(MosaicPlan { grid, cells })
    }

    /// Paint the matched tiles into an image of the trimmed input size
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The plan was made for a different tile size
    /// - The plan refers to tiles outside this assembler's pool
    pub fn render(&self, plan: &MosaicPlan) -> Result<PixelImage> {
        let side = plan.grid.tile_size();
        if side != self.tile_size {
            return Err(invalid_parameter(
                "plan",
                &side,
                &format!("plan tile size differs from assembler tile size {}", self.tile_size),
            ));
        }

        let mut cache = ResizedTileCache::new(side);
        cache.warm(self.pool, &plan.distinct_tiles())?;

        let (height, width) = plan.grid.trimmed_dimensions();
        let mut output = PixelImage::zeros((height, width, CHANNELS));

        output
            .axis_chunks_iter_mut(Axis(0), side)
            .into_par_iter()
            .zip(plan.cells.axis_iter(Axis(0)).into_par_iter())
            .try_for_each(|(mut band, row)| -> Result<()> {
                for (col, cell) in row.iter().enumerate() {
                    let tile = cache.get(cell.tile).ok_or_else(|| {
                        computation_error("render", &format!("tile {} was not resized", cell.tile))
                    })?;
                    let x = col * side;
                    band.slice_mut(s![.., x..x + side, ..]).assign(tile);
                }
                Ok(())
            })?;

        Ok(output)
    }

    /// Plan and render in one step
    ///
    /// # Errors
    ///
    /// Returns the errors of [`MosaicAssembler::plan`] and [`MosaicAssembler::render`]
    pub fn assemble<S: Data<Elem = u8>>(&self, input: &ArrayBase<S, Ix3>) -> Result<PixelImage> {
        let plan = self.plan(input)?;
        self.render(&plan)
    }
}

/// Replace each `square_pixel` cell of `input` with the best-matching pool tile
///
/// The output has the input's dimensions minus the trailing rows and columns
/// that don't fill a whole cell.
///
/// # Errors
///
/// Returns the errors of [`MosaicAssembler::assemble`]
pub fn assemble<S: Data<Elem = u8>>(
    input: &ArrayBase<S, Ix3>,
    square_pixel: usize,
    pool: &SourcePool,
) -> Result<PixelImage> {
    MosaicAssembler::new(pool, square_pixel).assemble(input)
}

/// Fill each `tile_size` cell of `input` with its own average colour
///
/// # Errors
///
/// Returns `InvalidTileSize` or `InvalidImage` under the same conditions as
/// [`MosaicAssembler::plan`]
pub fn pixelate<S: Data<Elem = u8>>(input: &ArrayBase<S, Ix3>, tile_size: usize) -> Result<PixelImage> {
    let grid = MosaicGrid::for_image(input, tile_size)?;
    let trimmed = grid.trim(input);
    let mut output = trimmed.to_owned();

    for (row, col) in grid.cells() {
        let pixel = colour_to_pixel(&average_colour(&grid.cell_view(&trimmed, row, col))?);
        let (y, x) = grid.cell_origin(row, col);
        output
            .slice_mut(s![y..y + tile_size, x..x + tile_size, ..])
            .assign(&aview1(&pixel));
    }

    Ok(output)
}
