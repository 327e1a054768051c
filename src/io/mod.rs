/// Command-line parsing and the end-to-end mosaic job
pub mod cli;
/// Constants shared across the pipeline
pub mod configuration;
/// Error types and path context
pub mod error;
/// Image decoding, array conversion and atomic export
pub mod image;
/// Stage progress bars
pub mod progress;
/// Source folder enumeration
pub mod sources;
