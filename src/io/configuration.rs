//! Pipeline thresholds, tool names and the per-run configuration

use crate::io::error::{Result, invalid_parameter};
use image::imageops::FilterType;
use std::path::{Path, PathBuf};

// Bounds the working image so the reconstructors stay interactive
/// Maximum working resolution per axis after center cropping
pub const MAX_CROP_DIMENSION: u32 = 800;

/// Border added by the mosaic sampler and trimmed after reconstruction
pub const PADDING: u32 = 16;

// The contour plot is rendered as vector graphics, so it must stay small
/// Largest cropped pixel count for which the contour plot is produced
pub const CONTOUR_PIXEL_BUDGET: u64 = 25_000;

/// Smallest dimension a zoomed preview is scaled up to
pub const ZOOM_MIN_DIMENSION: u32 = 200;

/// Suffix appended to the file stem of zoomed previews
pub const ZOOM_SUFFIX: &str = "_zoom";

/// Default program name of the mosaic sampler
pub const DEFAULT_MOSAIC_PROGRAM: &str = "mosaic";
/// Default program name of the contour-stencil reconstructor
pub const DEFAULT_CONTOUR_STENCIL_PROGRAM: &str = "dmcswl1";
/// Default program name of the bilinear reconstructor
pub const DEFAULT_BILINEAR_PROGRAM: &str = "dmbilinear";
/// Default program name of the metric and difference tool
pub const DEFAULT_METRIC_PROGRAM: &str = "imdiff";
/// Default program name of the vector-to-raster converter
pub const DEFAULT_RASTERIZER_PROGRAM: &str = "gs";

/// Program locations for every external tool the pipeline invokes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolPaths {
    /// Mosaic sampler
    pub mosaic: PathBuf,
    /// Contour-stencil reconstructor, also used for contour plots
    pub contour_stencil: PathBuf,
    /// Bilinear reconstructor
    pub bilinear: PathBuf,
    /// Metric and difference image tool
    pub metric: PathBuf,
    /// Vector-to-raster converter
    pub rasterizer: PathBuf,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            mosaic: PathBuf::from(DEFAULT_MOSAIC_PROGRAM),
            contour_stencil: PathBuf::from(DEFAULT_CONTOUR_STENCIL_PROGRAM),
            bilinear: PathBuf::from(DEFAULT_BILINEAR_PROGRAM),
            metric: PathBuf::from(DEFAULT_METRIC_PROGRAM),
            rasterizer: PathBuf::from(DEFAULT_RASTERIZER_PROGRAM),
        }
    }
}

impl ToolPaths {
    /// Resolve the four demosaicking tools inside `bin_dir`
    ///
    /// The rasterizer is a system dependency and keeps its current location.
    #[must_use]
    pub fn in_directory(mut self, bin_dir: &Path) -> Self {
        self.mosaic = bin_dir.join(DEFAULT_MOSAIC_PROGRAM);
        self.contour_stencil = bin_dir.join(DEFAULT_CONTOUR_STENCIL_PROGRAM);
        self.bilinear = bin_dir.join(DEFAULT_BILINEAR_PROGRAM);
        self.metric = bin_dir.join(DEFAULT_METRIC_PROGRAM);
        self
    }
}

/// Immutable parameters for a single pipeline run
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Color filter array pattern identifier passed to the tools
    pub mosaic_pattern: String,
    /// Contour-stencil tuning parameter
    pub alpha: f64,
    /// Border added before reconstruction
    pub padding: u32,
    /// Maximum working resolution per axis
    pub max_crop_dimension: u32,
    /// Pixel count gating the contour plot
    pub contour_pixel_budget: u64,
    /// Smallest dimension of zoomed previews
    pub zoom_min_dimension: u32,
    /// Resampling filter used for zoomed previews
    pub zoom_filter: FilterType,
    /// External tool programs
    pub tools: ToolPaths,
}

impl PipelineConfig {
    /// Create a configuration with the default thresholds and tool names
    pub fn new(mosaic_pattern: impl Into<String>, alpha: f64) -> Self {
        Self {
            mosaic_pattern: mosaic_pattern.into(),
            alpha,
            padding: PADDING,
            max_crop_dimension: MAX_CROP_DIMENSION,
            contour_pixel_budget: CONTOUR_PIXEL_BUDGET,
            zoom_min_dimension: ZOOM_MIN_DIMENSION,
            // Bicubic, as the reference previews were produced
            zoom_filter: FilterType::CatmullRom,
            tools: ToolPaths::default(),
        }
    }

    /// Replace the external tool programs
    #[must_use]
    pub fn with_tools(mut self, tools: ToolPaths) -> Self {
        self.tools = tools;
        self
    }

    /// Check that the parameters can drive a run
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The mosaic pattern is empty or contains whitespace
    /// - Alpha is not a finite number
    /// - The padding, crop cap, contour budget or zoom minimum is zero
    /// - The padded crop would not fit in `u32`
    pub fn validate(&self) -> Result<()> {
        if self.mosaic_pattern.is_empty() {
            return Err(invalid_parameter(
                "pattern",
                &self.mosaic_pattern,
                &"must not be empty",
            ));
        }
        if self.mosaic_pattern.chars().any(char::is_whitespace) {
            return Err(invalid_parameter(
                "pattern",
                &self.mosaic_pattern,
                &"must be a single identifier",
            ));
        }
        if !self.alpha.is_finite() {
            return Err(invalid_parameter(
                "alpha",
                &self.alpha,
                &"must be a finite number",
            ));
        }
        if self.max_crop_dimension == 0 {
            return Err(invalid_parameter(
                "max_crop_dimension",
                &self.max_crop_dimension,
                &"must be positive",
            ));
        }
        if self.padding == 0 {
            return Err(invalid_parameter(
                "padding",
                &self.padding,
                &"must be positive",
            ));
        }
        if self
            .padding
            .checked_mul(2)
            .and_then(|border| border.checked_add(self.max_crop_dimension))
            .is_none()
        {
            return Err(invalid_parameter(
                "padding",
                &self.padding,
                &"padded crop exceeds the image size limit",
            ));
        }
        if self.contour_pixel_budget == 0 {
            return Err(invalid_parameter(
                "contour_pixel_budget",
                &self.contour_pixel_budget,
                &"must be positive",
            ));
        }
        if self.zoom_min_dimension == 0 {
            return Err(invalid_parameter(
                "zoom_min_dimension",
                &self.zoom_min_dimension,
                &"must be positive",
            ));
        }
        Ok(())
    }
}
