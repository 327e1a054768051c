//! Image file decoding, array conversion and atomic export

use image::{ImageFormat, RgbImage};
use ndarray::{Array3, ArrayBase, Data, Ix3};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::io::configuration::{CHANNELS, TEMP_FILE_PREFIX};
use crate::io::error::{MosaicError, Result, WithPath, computation_error, invalid_parameter};
use crate::spatial::PixelImage;

/// Decode an image file into an RGB pixel array
///
/// Greyscale, alpha and 16-bit inputs are converted to 8-bit RGB.
///
/// # Errors
///
/// Returns `ImageLoad` if the file cannot be opened or decoded
pub fn load_pixels(path: &Path) -> Result<PixelImage> {
    let img = image::open(path).with_path(path)?;
    rgb_to_array(&img.to_rgb8())
}

/// Copy an RGB image buffer into a `(height, width, 3)` array
///
/// # Errors
///
/// Returns a computation error if the buffer length doesn't match its dimensions
pub fn rgb_to_array(image: &RgbImage) -> Result<PixelImage> {
    let (width, height) = (image.width() as usize, image.height() as usize);
    Ok(Array3::from_shape_vec(
        (height, width, CHANNELS),
        image.as_raw().clone(),
    )?)
}

/// Copy a `(height, width, 3)` array into an RGB image buffer
///
/// # Errors
///
/// Returns an error if:
/// - The array doesn't have exactly 3 channels
/// - A dimension doesn't fit in `u32`
pub fn array_to_rgb<S: Data<Elem = u8>>(pixels: &ArrayBase<S, Ix3>) -> Result<RgbImage> {
    let (height, width, channels) = pixels.dim();
    if channels != CHANNELS {
        return Err(MosaicError::InvalidImage {
            reason: format!("expected {CHANNELS} channels, found {channels}"),
        });
    }

    let width_px = u32::try_from(width).map_err(|e| invalid_parameter("width", &width, &e))?;
    let height_px = u32::try_from(height).map_err(|e| invalid_parameter("height", &height, &e))?;

    // Logical iteration order matches the interleaved row-major buffer layout
    let raw: Vec<u8> = pixels.iter().copied().collect();
    RgbImage::from_raw(width_px, height_px, raw).ok_or_else(|| {
        computation_error("array_to_rgb", &format!("buffer too small for {width}x{height}"))
    })
}

/// Save a pixel array atomically, choosing the format from the path extension
///
/// The image is encoded into a temporary file beside `output_path` and then
/// renamed over it, so a failed write never leaves a partial file behind.
///
/// # Errors
///
/// Returns an error if:
/// - The extension doesn't name a supported format
/// - The array isn't 3-channel RGB
/// - The parent directory cannot be created
/// - Encoding, writing or the final rename fails
pub fn save_pixels<S: Data<Elem = u8>>(
    pixels: &ArrayBase<S, Ix3>,
    output_path: &Path,
) -> Result<()> {
    let format = ImageFormat::from_path(output_path).map_err(|e| MosaicError::ImageExport {
        path: output_path.to_path_buf(),
        source: e,
    })?;
    let rgb = array_to_rgb(pixels)?;

    let parent = match output_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| MosaicError::FileSystem {
        path: parent.to_path_buf(),
        operation: "create directory",
        source: e,
    })?;

    let mut temp = tempfile::Builder::new()
        .prefix(TEMP_FILE_PREFIX)
        .tempfile_in(parent)
        .map_err(|e| MosaicError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create temporary file",
            source: e,
        })?;

    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        rgb.write_to(&mut writer, format)
            .map_err(|e| MosaicError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;
        writer.flush().map_err(|e| MosaicError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "write",
            source: e,
        })?;
    }

    temp.persist(output_path)
        .map_err(|e| MosaicError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "rename",
            source: e.error,
        })?;

    Ok(())
}
