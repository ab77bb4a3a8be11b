//! Evaluation pipeline comparing contour-stencil and bilinear demosaicking
//!
//! The demosaicking tools, mosaic sampler and metric tool are external
//! programs. This crate sequences them over a directory of artifacts, trims
//! and zooms the results, and assembles a comparison report.

#![forbid(unsafe_code)]

/// Command line, configuration, errors, logging and image primitives
pub mod io;
/// Artifact store, preprocessing, tool contracts and the stage driver
pub mod pipeline;
/// Metric parsing and the comparison table
pub mod report;

pub use io::error::{PipelineError, Result};
pub use pipeline::driver::{Pipeline, PipelineOutcome};
