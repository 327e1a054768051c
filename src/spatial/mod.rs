//! Spatial data structures for the mosaic grid
//!
//! This module contains spatial-related functionality including:
//! - The pixel array type shared by the pipeline
//! - Grid partitioning and trailing-edge trimming

/// Cell partitioning of the trimmed input image
pub mod grid;

pub use grid::{MosaicGrid, PixelImage};
