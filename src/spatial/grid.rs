//! Mosaic grid geometry over a trimmed input image
//!
//! Partitions an image into non-overlapping square cells of a fixed side
//! length. Rows and columns that do not fill a whole cell are trimmed from the
//! trailing edges, so the grid always covers the trimmed image exactly.

use ndarray::{Array3, ArrayBase, ArrayView3, Data, Ix3, s};

use crate::io::error::{MosaicError, Result};

/// Pixel data with shape `(height, width, channels)` and 8-bit samples
pub type PixelImage = Array3<u8>;

/// Row-major cell partition of an image
///
/// Cells are addressed by `(row, col)`; cell `(r, c)` covers pixel rows
/// `r * tile_size..(r + 1) * tile_size` and the matching column range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MosaicGrid {
    tile_size: usize,
    rows: usize,
    cols: usize,
}

impl MosaicGrid {
    /// Build the grid for an image of the given dimensions
    ///
    /// # Errors
    ///
    /// Returns `InvalidTileSize` if `tile_size` is zero or exceeds either
    /// dimension, since the trimmed image would then be empty.
    pub fn new(height: usize, width: usize, tile_size: usize) -> Result<Self> {
        let reject = |reason: &str| MosaicError::InvalidTileSize {
            tile_size,
            height,
            width,
            reason: reason.to_string(),
        };

        if tile_size == 0 {
            return Err(reject("tile size must be at least 1"));
        }
        if tile_size > height {
            return Err(reject("tile size exceeds image height"));
        }
        if tile_size > width {
            return Err(reject("tile size exceeds image width"));
        }

        Ok(Self {
            tile_size,
            rows: height / tile_size,
            cols: width / tile_size,
        })
    }

    /// Build the grid for an image array
    ///
    /// # Errors
    ///
    /// Returns `InvalidTileSize` under the same conditions as [`MosaicGrid::new`]
    pub fn for_image<S: Data>(image: &ArrayBase<S, Ix3>, tile_size: usize) -> Result<Self> {
        let (height, width, _) = image.dim();
        Self::new(height, width, tile_size)
    }

    /// Side length of one cell in pixels
    pub const fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// Number of cell rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of cell columns
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Pixel dimensions `(height, width)` after trimming
    pub const fn trimmed_dimensions(&self) -> (usize, usize) {
        (self.rows * self.tile_size, self.cols * self.tile_size)
    }

    /// Origin-anchored view of `image` cut down to the trimmed dimensions
    pub fn trim<'a, S: Data>(&self, image: &'a ArrayBase<S, Ix3>) -> ArrayView3<'a, S::Elem> {
        let (height, width) = self.trimmed_dimensions();
        image.slice(s![..height, ..width, ..])
    }

    /// Top-left pixel `(y, x)` of a cell
    pub const fn cell_origin(&self, row: usize, col: usize) -> (usize, usize) {
        (row * self.tile_size, col * self.tile_size)
    }

    /// View of a single cell within an image at least as large as the trimmed grid
    pub fn cell_view<'a, S: Data>(
        &self,
        image: &'a ArrayBase<S, Ix3>,
        row: usize,
        col: usize,
    ) -> ArrayView3<'a, S::Elem> {
        let (y, x) = self.cell_origin(row, col);
        image.slice(s![y..y + self.tile_size, x..x + self.tile_size, ..])
    }

    /// Iterate cell positions in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }
}
