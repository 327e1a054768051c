//! Per-region measurements used for colour matching

/// Average colour computation and channel quantization
pub mod colour;
/// Origin-anchored square cropping of source photos
pub mod crop;
