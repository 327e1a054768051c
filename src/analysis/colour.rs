//! Average colour of pixel regions

use ndarray::{ArrayBase, Axis, Data, Ix3};
use num_traits::AsPrimitive;

use crate::io::configuration::{CHANNELS, MAX_CHANNEL_VALUE};
use crate::io::error::{MosaicError, Result};

/// Mean channel intensity over a region, in channel order (R, G, B)
pub type Colour = [f64; CHANNELS];

/// Compute the per-channel arithmetic mean over the spatial axes of a region
///
/// Sums are accumulated in `f64`, so a region of one constant 8-bit colour
/// averages to exactly that colour.
///
/// # Errors
///
/// Returns `InvalidImage` if the region has zero area or does not have
/// exactly [`CHANNELS`] channels.
pub fn average_colour<S, A>(region: &ArrayBase<S, Ix3>) -> Result<Colour>
where
    S: Data<Elem = A>,
    A: AsPrimitive<f64>,
{
    let (height, width, channels) = region.dim();
    if height == 0 || width == 0 {
        return Err(MosaicError::InvalidImage {
            reason: format!("cannot average a {height}x{width} region"),
        });
    }
    if channels != CHANNELS {
        return Err(MosaicError::InvalidImage {
            reason: format!("expected {CHANNELS} channels, found {channels}"),
        });
    }

    let mut sums = [0.0; CHANNELS];
    for pixel in region.lanes(Axis(2)) {
        for (sum, &value) in sums.iter_mut().zip(pixel.iter()) {
            *sum += value.as_();
        }
    }

    let count = (height * width) as f64;
    Ok(sums.map(|sum| sum / count))
}

/// Round a channel value to the nearest 8-bit sample, clamping out-of-range input
pub fn quantize_channel(value: f64) -> u8 {
    num_traits::clamp(value.round(), 0.0, MAX_CHANNEL_VALUE) as u8
}

/// Quantize a colour to one 8-bit RGB pixel
pub fn colour_to_pixel(colour: &Colour) -> [u8; CHANNELS] {
    colour.map(quantize_channel)
}
