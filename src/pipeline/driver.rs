//! Fixed stage sequence from mosaicking to the comparison report

use crate::io::configuration::PipelineConfig;
use crate::io::error::{PipelineError, Result};
use crate::io::image::{crop_region, load_image, read_dimensions, resize_exact, save_image};
use crate::io::progress::StageProgress;
use crate::pipeline::artifacts::{Artifact, ArtifactStore, Method};
use crate::pipeline::geometry::{Size, zoom_factor};
use crate::pipeline::preprocess::preprocess;
use crate::pipeline::tools::{ToolCommands, ToolInvocation, ToolOutput, ToolRunner};
use crate::report::metrics::{format_mse, parse_mse};
use crate::report::table::Report;

/// Note left in the artifact store when the contour plot cannot be converted
pub const CONVERSION_FAILURE_NOTE: &str =
    "eps->pdf conversion failed, gs is probably missing on this system";

/// Pipeline stages in execution order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Crop the input and decide contour feasibility
    Preprocess,
    /// Sample the input with the mosaic pattern
    Mosaic,
    /// Contour-stencil reconstruction
    ReconstructContourStencil,
    /// Bilinear reconstruction
    ReconstructBilinear,
    /// Contour plot of the unpadded input
    ContourPlot,
    /// Remove the padding border
    Trim,
    /// Mean squared errors
    Metrics,
    /// Difference images
    Diffs,
    /// Contour plot to PDF conversion
    Conversion,
    /// Enlarged previews
    Zoom,
    /// Comparison table
    Report,
}

impl Stage {
    /// Every stage, in execution order
    pub const ALL: [Self; 11] = [
        Self::Preprocess,
        Self::Mosaic,
        Self::ReconstructContourStencil,
        Self::ReconstructBilinear,
        Self::ContourPlot,
        Self::Trim,
        Self::Metrics,
        Self::Diffs,
        Self::Conversion,
        Self::Zoom,
        Self::Report,
    ];

    /// Short label shown in progress output
    pub const fn label(self) -> &'static str {
        match self {
            Self::Preprocess => "preprocess",
            Self::Mosaic => "mosaic",
            Self::ReconstructContourStencil => "contour stencils",
            Self::ReconstructBilinear => "bilinear",
            Self::ContourPlot => "contour plot",
            Self::Trim => "trim padding",
            Self::Metrics => "mean squared error",
            Self::Diffs => "difference images",
            Self::Conversion => "eps to pdf",
            Self::Zoom => "zoom",
            Self::Report => "report",
        }
    }

    const fn reconstruction(method: Method) -> Self {
        match method {
            Method::ContourStencil => Self::ReconstructContourStencil,
            Method::Bilinear => Self::ReconstructBilinear,
        }
    }
}

/// What a finished run produced
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    /// Dimensions of every trimmed artifact
    pub crop_size: Size,
    /// Whether the contour plot and its PDF were produced
    pub show_contours: bool,
    /// Scale of the zoomed previews, `None` when the zoom stage was skipped
    pub zoom_factor: Option<u32>,
    /// Comparison of both methods
    pub report: Report,
}

/// Successful ways a run can end
#[derive(Clone, Debug, PartialEq)]
pub enum PipelineOutcome {
    /// Every stage ran
    Completed(RunSummary),
    /// The contour plot could not be converted; zoomed previews were skipped
    CompletedWithoutContours(RunSummary),
}

impl PipelineOutcome {
    /// Summary regardless of how the run ended
    pub const fn summary(&self) -> &RunSummary {
        match self {
            Self::Completed(summary) | Self::CompletedWithoutContours(summary) => summary,
        }
    }
}

/// Runs the evaluation stages against one artifact store
pub struct Pipeline<R: ToolRunner> {
    config: PipelineConfig,
    store: ArtifactStore,
    runner: R,
    progress: StageProgress,
}

impl<R: ToolRunner> Pipeline<R> {
    /// Create a pipeline, validating the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn new(config: PipelineConfig, store: ArtifactStore, runner: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            store,
            runner,
            progress: StageProgress::hidden(),
        })
    }

    /// Report stage progress through `progress`
    #[must_use]
    pub fn with_progress(mut self, progress: StageProgress) -> Self {
        self.progress = progress;
        self
    }

    /// Artifact store the pipeline writes to
    pub const fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Tool runner, for inspection after a run
    pub const fn runner(&self) -> &R {
        &self.runner
    }

    /// Consume the pipeline, returning its tool runner
    pub fn into_runner(self) -> R {
        self.runner
    }

    /// Execute every stage in order
    ///
    /// A failed contour conversion is not an error: the run ends with
    /// [`PipelineOutcome::CompletedWithoutContours`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input image is missing, empty or unreadable
    /// - Any tool other than the converter cannot be launched or exits non-zero
    /// - A stage produces an image of unexpected size
    /// - The metric tool or a reconstructor prints unparsable output
    /// - An artifact cannot be read or written
    pub fn run(&mut self) -> Result<PipelineOutcome> {
        let result = self.run_stages();
        self.progress.finish();
        result
    }

    fn run_stages(&mut self) -> Result<PipelineOutcome> {
        tracing::info!(
            pattern = %self.config.mosaic_pattern,
            alpha = self.config.alpha,
            workdir = %self.store.root().display(),
            "starting evaluation"
        );

        self.begin(Stage::Preprocess);
        let preprocessed = preprocess(&self.store, &self.config)?;
        self.progress.complete();
        let crop = preprocessed.crop_size();
        let mut show_contours = preprocessed.show_contours;

        self.begin(Stage::Mosaic);
        let mosaic = self.commands().mosaic();
        self.execute(&mosaic)?;
        self.progress.complete();

        for method in [Method::ContourStencil, Method::Bilinear] {
            self.begin(Stage::reconstruction(method));
            let invocation = self.commands().reconstruct(method);
            let output = self.execute(&invocation)?;
            self.store.write(method.stdout_log(), &output.stdout)?;
            self.progress.complete();
        }

        if show_contours {
            self.begin(Stage::ContourPlot);
            let plot = self.commands().contour_plot();
            self.execute(&plot)?;
            self.progress.complete();
        } else {
            self.progress.skip(Stage::ContourPlot.label());
        }

        self.begin(Stage::Trim);
        self.trim_padding(crop)?;
        self.progress.complete();

        self.begin(Stage::Metrics);
        self.compute_metrics()?;
        self.progress.complete();

        self.begin(Stage::Diffs);
        self.compute_diffs(crop)?;
        self.progress.complete();

        // Created even when the conversion is skipped
        self.store.write(Artifact::ProcessLog, "")?;
        let mut degraded = false;
        if show_contours {
            self.begin(Stage::Conversion);
            if !self.convert_contours()? {
                self.store
                    .write(Artifact::FailureNote, CONVERSION_FAILURE_NOTE)?;
                show_contours = false;
                degraded = true;
            }
            self.progress.complete();
        } else {
            self.progress.skip(Stage::Conversion.label());
        }

        let zoom = if degraded {
            self.progress.skip(Stage::Zoom.label());
            None
        } else {
            self.begin(Stage::Zoom);
            let factor = self.zoom_previews(crop)?;
            self.progress.complete();
            Some(factor)
        };

        self.begin(Stage::Report);
        let report = Report::from_store(&self.store)?;
        report.persist(&self.store)?;
        self.progress.complete();

        let summary = RunSummary {
            crop_size: crop,
            show_contours,
            zoom_factor: zoom,
            report,
        };
        tracing::info!(
            width = crop.width,
            height = crop.height,
            show_contours,
            degraded,
            "evaluation finished"
        );

        Ok(if degraded {
            PipelineOutcome::CompletedWithoutContours(summary)
        } else {
            PipelineOutcome::Completed(summary)
        })
    }

    fn begin(&self, stage: Stage) {
        tracing::debug!(stage = stage.label(), "stage started");
        self.progress.begin(stage.label());
    }

    fn commands(&self) -> ToolCommands<'_> {
        ToolCommands::new(&self.config, self.store.root())
    }

    fn execute(&mut self, invocation: &ToolInvocation) -> Result<ToolOutput> {
        tracing::debug!(
            tool = invocation.tool,
            command = %invocation.command_line(),
            "invoking tool"
        );
        self.runner.run(invocation)?.into_checked(invocation.tool)
    }

    fn trim_padding(&self, crop: Size) -> Result<()> {
        let padding = self.config.padding;
        let padded = crop.padded(padding);
        for artifact in Artifact::PADDED {
            let path = self.store.path(artifact);
            let image = load_image(&path)?;
            let actual = (image.width(), image.height());
            if actual != padded.as_tuple() {
                return Err(PipelineError::DimensionMismatch {
                    artifact: artifact.file_name(),
                    expected: padded.as_tuple(),
                    actual,
                });
            }
            let trimmed = crop_region(&image, (padding, padding), crop.as_tuple())?;
            save_image(&trimmed, &path)?;
        }
        tracing::debug!(padding, "trimmed padded artifacts");
        Ok(())
    }

    fn compute_metrics(&mut self) -> Result<()> {
        for method in Method::ALL {
            let invocation = self.commands().mse(method);
            let output = self.execute(&invocation)?;
            let mse = parse_mse(&output.stdout)?;
            let rounded = format_mse(mse);
            tracing::info!(method = method.key(), mse = %rounded, "mean squared error");
            self.store.write(method.mse(), format!("{rounded}\n"))?;
        }
        Ok(())
    }

    fn compute_diffs(&mut self, crop: Size) -> Result<()> {
        for method in [Method::ContourStencil, Method::Bilinear] {
            let invocation = self.commands().diff(method);
            self.execute(&invocation)?;
            let diff = method.diff();
            let actual = read_dimensions(&self.store.path(diff))?;
            if actual != crop.as_tuple() {
                return Err(PipelineError::DimensionMismatch {
                    artifact: diff.file_name(),
                    expected: crop.as_tuple(),
                    actual,
                });
            }
        }
        Ok(())
    }

    /// Returns whether the contour document was produced
    fn convert_contours(&mut self) -> Result<bool> {
        let invocation = self.commands().rasterize();
        let (log, succeeded) = match self.runner.run(&invocation) {
            Ok(output) => (output.combined(), output.succeeded()),
            Err(PipelineError::ToolLaunch { program, source }) => (
                format!("failed to launch {}: {source}\n", program.display()),
                false,
            ),
            Err(other) => return Err(other),
        };
        self.store.write(Artifact::ProcessLog, log)?;

        if !succeeded {
            tracing::warn!(
                tool = invocation.tool,
                "contour conversion failed, continuing without contours"
            );
        }
        Ok(succeeded)
    }

    fn zoom_previews(&self, crop: Size) -> Result<u32> {
        let factor = zoom_factor(crop, self.config.zoom_min_dimension);
        let zoomed = crop.scaled(factor);
        for artifact in Artifact::ZOOMED {
            let Some(target) = self.store.zoom_path(artifact) else {
                continue;
            };
            let image = load_image(&self.store.path(artifact))?;
            let resized = resize_exact(&image, zoomed.as_tuple(), self.config.zoom_filter);
            save_image(&resized, &target)?;
        }
        tracing::debug!(factor, "wrote zoomed previews");
        Ok(factor)
    }
}
