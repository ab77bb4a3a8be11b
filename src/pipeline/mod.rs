/// Artifact names and the working directory
pub mod artifacts;
/// Stage sequencing and the run outcome
pub mod driver;
/// Crop, padding and zoom arithmetic
pub mod geometry;
/// Input cropping and contour feasibility
pub mod preprocess;
/// External tool command lines and the runner capability
pub mod tools;
