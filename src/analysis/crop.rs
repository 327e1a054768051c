//! Square cropping of rectangular photos

use ndarray::{ArrayBase, ArrayView3, Data, Ix3, s};

/// Crop an image to a square of side `min(height, width)`
///
/// The excess is removed from the trailing end of the longer axis, so the
/// result is the sub-image anchored at the origin. Square input comes back
/// unchanged, which makes the operation idempotent.
pub fn to_square<S: Data>(image: &ArrayBase<S, Ix3>) -> ArrayView3<'_, S::Elem> {
    let (height, width, _) = image.dim();
    let side = height.min(width);
    image.slice(s![..side, ..side, ..])
}
