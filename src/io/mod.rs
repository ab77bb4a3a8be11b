/// Command-line parsing and the top-level runner
pub mod cli;
/// Thresholds, tool names and per-run configuration
pub mod configuration;
/// Error types for every stage
pub mod error;
/// Image load, crop, resize and save primitives
pub mod image;
/// Tracing subscriber setup
pub mod logging;
/// Stage progress display
pub mod progress;
