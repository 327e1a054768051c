/// Mosaic planning, rendering and average-colour pixelation
pub mod assembler;
/// Cache of tiles resized to the cell size
pub mod cache;
/// Nearest-colour search over the source pool
pub mod matcher;
/// Source tiles with precomputed average colours
pub mod pool;
