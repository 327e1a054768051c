//! Photomosaic construction from a folder of source photos
//!
//! The input image is cut into square cells, each cell's average colour is
//! matched against the average colours of square-cropped source photos, and
//! the closest photo, resized to the cell, takes the cell's place.

#![deny(unsafe_code)]

/// Source pool, colour matching, tile resizing and mosaic assembly
pub mod algorithm;
/// Average colour and square cropping of pixel regions
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Grid geometry over the trimmed input image
pub mod spatial;

pub use io::error::{MosaicError, Result};
