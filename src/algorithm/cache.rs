use crate::algorithm::pool::SourcePool;
use crate::io::configuration::RESIZE_FILTER;
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{array_to_rgb, rgb_to_array};
use crate::spatial::PixelImage;
use image::imageops;
use ndarray::{ArrayBase, Data, Ix3};
use rayon::prelude::*;
use std::collections::{BTreeSet, HashMap};

/// Resample a tile to `side x side` pixels
///
/// Uses [`RESIZE_FILTER`], which averages over the source footprint when
/// shrinking. Samples are rounded and clamped back to 8 bits.
///
/// # Errors
///
/// Returns an error if the tile isn't 3-channel RGB or `side` doesn't fit in `u32`
pub fn resize_tile<S: Data<Elem = u8>>(tile: &ArrayBase<S, Ix3>, side: usize) -> Result<PixelImage> {
    let side_px = u32::try_from(side).map_err(|e| invalid_parameter("tile_size", &side, &e))?;
    let rgb = array_to_rgb(tile)?;
    let resized = imageops::resize(&rgb, side_px, side_px, RESIZE_FILTER);
    rgb_to_array(&resized)
}

/// Memoization cache for tiles resized to the cell size
///
/// Every cell in a run has the same size, so each source tile only needs
/// resampling once no matter how many cells it fills.
pub struct ResizedTileCache {
    tile_size: usize,

    /// Pool index to resized pixels
    resized: HashMap<usize, PixelImage>,

    /// Cache performance statistics
    pub stats: CacheStats,
}

/// Performance metrics for cache effectiveness
#[derive(Default, Debug)]
pub struct CacheStats {
    /// Number of requests served from the cache
    pub hits: usize,
    /// Number of tiles that had to be resized
    pub misses: usize,
}

impl ResizedTileCache {
    /// Create an empty cache for cells of side `tile_size`
    pub fn new(tile_size: usize) -> Self {
        Self {
            tile_size,
            resized: HashMap::new(),
            stats: CacheStats::default(),
        }
    }

    /// Side length tiles are resized to
    pub const fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// Resize every requested pool tile not already cached
    ///
    /// Missing tiles are resampled in parallel. Repeated indices count as hits.
    ///
    /// # Errors
    ///
    /// Returns an error if an index is outside the pool or resizing fails;
    /// no tiles are added in that case
    pub fn warm(&mut self, pool: &SourcePool, indices: &[usize]) -> Result<()> {
        let mut pending = BTreeSet::new();
        for &index in indices {
            if self.resized.contains_key(&index) || !pending.insert(index) {
                self.stats.hits += 1;
            } else {
                self.stats.misses += 1;
            }
        }

        let tile_size = self.tile_size;
        let resized = pending
            .into_par_iter()
            .map(|index| {
                let tile = pool.tile(index).ok_or_else(|| {
                    invalid_parameter(
                        "tile_index",
                        &index,
                        &format!("pool holds {} tiles", pool.len()),
                    )
                })?;
                Ok((index, resize_tile(tile.pixels(), tile_size)?))
            })
            .collect::<Result<Vec<_>>>()?;

        self.resized.extend(resized);
        Ok(())
    }

    /// Resized pixels for a pool index, if cached
    pub fn get(&self, index: usize) -> Option<&PixelImage> {
        self.resized.get(&index)
    }

    /// Number of cached tiles
    pub fn len(&self) -> usize {
        self.resized.len()
    }

    /// Whether nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.resized.is_empty()
    }
}
