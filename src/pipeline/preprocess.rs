//! Input cropping and contour feasibility decision

use crate::io::configuration::PipelineConfig;
use crate::io::error::{PipelineError, Result};
use crate::io::image::{crop_region, load_image, save_image};
use crate::pipeline::artifacts::{Artifact, ArtifactStore};
use crate::pipeline::geometry::{CropPlan, Size, contours_feasible};

/// Working-image geometry decided before any tool runs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Preprocessed {
    /// How the input was cropped
    pub plan: CropPlan,
    /// Whether the contour plot and its conversion should run
    pub show_contours: bool,
}

impl Preprocessed {
    /// Dimensions every trimmed artifact must have
    pub const fn crop_size(&self) -> Size {
        self.plan.crop
    }
}

/// Center-crop the stored input to the working resolution
///
/// The cropped image replaces the input artifact; the original pixels are
/// not kept.
///
/// # Errors
///
/// Returns an error if:
/// - The input image is missing or cannot be decoded
/// - The input has a zero dimension
/// - The cropped image cannot be saved
pub fn preprocess(store: &ArtifactStore, config: &PipelineConfig) -> Result<Preprocessed> {
    let input_path = store.path(Artifact::Input);
    let input = load_image(&input_path)?;
    let source = Size::new(input.width(), input.height());

    if source.width == 0 || source.height == 0 {
        return Err(PipelineError::InvalidSourceData {
            reason: format!("input image is {}x{}", source.width, source.height),
        });
    }

    let plan = CropPlan::centered(source, config.max_crop_dimension);

    if plan.is_noop() {
        tracing::debug!(
            width = source.width,
            height = source.height,
            "input within working resolution"
        );
    } else {
        let cropped = crop_region(&input, plan.origin, plan.crop.as_tuple())?;
        save_image(&cropped, &input_path)?;
        tracing::info!(
            from_width = source.width,
            from_height = source.height,
            to_width = plan.crop.width,
            to_height = plan.crop.height,
            x0 = plan.origin.0,
            y0 = plan.origin.1,
            "cropped input"
        );
    }

    let show_contours = contours_feasible(plan.crop, config.contour_pixel_budget);
    tracing::debug!(
        show_contours,
        pixels = plan.crop.pixel_count(),
        "contour plot feasibility"
    );

    Ok(Preprocessed {
        plan,
        show_contours,
    })
}
