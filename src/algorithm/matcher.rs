//! Nearest-colour search over the source pool

use crate::algorithm::pool::SourcePool;
use crate::analysis::colour::Colour;
use crate::io::error::{MosaicError, Result};

/// Squared Euclidean distance between two colours
pub fn squared_distance(a: &Colour, b: &Colour) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}

/// Find the pool index of the tile whose colour is nearest to `target`
///
/// Scans the whole pool in enumeration order. A tile replaces the current
/// best only when strictly closer, so among equidistant tiles the first one
/// wins.
///
/// # Errors
///
/// Returns `EmptyPool` if the pool has no tiles
pub fn best_match(target: &Colour, pool: &SourcePool) -> Result<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (index, tile) in pool.tiles().iter().enumerate() {
        let distance = squared_distance(target, tile.colour());
        if best.is_none_or(|(_, smallest)| distance < smallest) {
            best = Some((index, distance));
        }
    }

    best.map(|(index, _)| index).ok_or(MosaicError::EmptyPool)
}
