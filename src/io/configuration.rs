//! Pipeline constants and runtime configuration defaults

use image::imageops::FilterType;

// Source folder settings
/// Folder of source photos, relative to the working directory
pub const DEFAULT_SOURCE_DIR: &str = "small_photoset";

/// File extensions accepted as source photos (compared case-insensitively)
pub const SOURCE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

// Pixel layout shared by every image in a run
/// Number of colour channels (RGB)
pub const CHANNELS: usize = 3;

/// Largest value a channel sample can take
pub const MAX_CHANNEL_VALUE: f64 = 255.0;

// Triangle widens its support when downsampling, so shrunk tiles are anti-aliased
/// Resampling filter applied when fitting a tile to a cell
pub const RESIZE_FILTER: FilterType = FilterType::Triangle;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 30;

// Output settings
/// Prefix of the temporary file written next to the output before renaming
pub const TEMP_FILE_PREFIX: &str = ".photomosaic-";
