//! Source tile pool with cached average colours
//!
//! Every source photo is loaded once, cropped to a square and averaged. The
//! pool keeps the cropped pixels of all sources in memory for the whole run,
//! a one-time cost proportional to the size of the source folder.

use ndarray::{ArrayBase, Data, Ix3};
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::analysis::colour::{Colour, average_colour};
use crate::analysis::crop::to_square;
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::io::image::load_pixels;
use crate::spatial::PixelImage;

/// One square-cropped source photo and its average colour
#[derive(Debug, Clone)]
pub struct SourceTile {
    key: PathBuf,
    pixels: PixelImage,
    colour: Colour,
}

impl SourceTile {
    /// Crop raw pixel data to a square and cache its average colour
    ///
    /// # Errors
    ///
    /// Returns `InvalidImage` if the image is empty or not 3-channel RGB
    pub fn from_pixels<S: Data<Elem = u8>>(
        key: PathBuf,
        raw: &ArrayBase<S, Ix3>,
    ) -> Result<Self> {
        let square = to_square(raw);
        let colour = average_colour(&square).map_err(|e| match e {
            MosaicError::InvalidImage { reason } => MosaicError::InvalidImage {
                reason: format!("{}: {reason}", key.display()),
            },
            other => other,
        })?;

        Ok(Self {
            key,
            pixels: square.to_owned(),
            colour,
        })
    }

    /// Identifier of the tile (its source path)
    pub fn key(&self) -> &Path {
        &self.key
    }

    /// Square-cropped pixel data
    pub const fn pixels(&self) -> &PixelImage {
        &self.pixels
    }

    /// Average colour of the cropped pixels
    pub const fn colour(&self) -> &Colour {
        &self.colour
    }

    /// Side length of the square tile
    pub fn side(&self) -> usize {
        self.pixels.dim().0
    }
}

/// Read-only collection of source tiles in a fixed enumeration order
///
/// The order is the order in which paths were supplied to [`SourcePool::build`];
/// matching resolves ties in favour of the earliest tile.
#[derive(Debug, Clone)]
pub struct SourcePool {
    tiles: Vec<SourceTile>,
}

impl SourcePool {
    /// Build a pool by loading each path with `loader`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `paths` is empty (`EmptyPool`)
    /// - A path appears more than once
    /// - Any source fails to load or is not a usable image; no partial pool
    ///   is returned
    pub fn build<P, F>(paths: &[P], loader: F) -> Result<Self>
    where
        P: AsRef<Path> + Sync,
        F: Fn(&Path) -> Result<PixelImage> + Sync,
    {
        Self::build_with(paths, loader, |_| {})
    }

    /// Build a pool, calling `on_loaded` once per finished source
    ///
    /// Sources are processed in parallel; `on_loaded` may run on any worker
    /// thread and in any order, while the pool itself keeps the input order.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`SourcePool::build`]
    pub fn build_with<P, F, O>(paths: &[P], loader: F, on_loaded: O) -> Result<Self>
    where
        P: AsRef<Path> + Sync,
        F: Fn(&Path) -> Result<PixelImage> + Sync,
        O: Fn(&Path) + Sync,
    {
        if paths.is_empty() {
            return Err(MosaicError::EmptyPool);
        }

        let mut seen = HashSet::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            if !seen.insert(path) {
                return Err(invalid_parameter(
                    "paths",
                    &path.display(),
                    &"source paths must be unique",
                ));
            }
        }

        let tiles = paths
            .par_iter()
            .map(|path| {
                let path = path.as_ref();
                let raw = loader(path)?;
                let tile = SourceTile::from_pixels(path.to_path_buf(), &raw)?;
                on_loaded(path);
                Ok(tile)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { tiles })
    }

    /// Build a pool from image files on disk
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`SourcePool::build`], with `ImageLoad`
    /// naming the first file that couldn't be decoded
    pub fn from_paths<P: AsRef<Path> + Sync>(paths: &[P]) -> Result<Self> {
        Self::build(paths, load_pixels)
    }

    /// All tiles in enumeration order
    pub fn tiles(&self) -> &[SourceTile] {
        &self.tiles
    }

    /// Tile at an enumeration index
    pub fn tile(&self, index: usize) -> Option<&SourceTile> {
        self.tiles.get(index)
    }

    /// Index of the tile with the given key
    pub fn position(&self, key: &Path) -> Option<usize> {
        self.tiles.iter().position(|tile| tile.key.as_path() == key)
    }

    /// Number of tiles
    pub const fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the pool holds no tiles
    pub const fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Bytes of cropped pixel data held by the pool
    pub fn byte_size(&self) -> usize {
        self.tiles.iter().map(|tile| tile.pixels.len()).sum()
    }
}
