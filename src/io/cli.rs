//! Command-line interface for evaluating both demosaicking methods on one image

use crate::io::configuration::{PipelineConfig, ToolPaths};
use crate::io::error::Result;
use crate::io::progress::StageProgress;
use crate::pipeline::artifacts::ArtifactStore;
use crate::pipeline::driver::{Pipeline, PipelineOutcome, Stage};
use crate::pipeline::tools::SystemToolRunner;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dmcompare")]
#[command(
    author,
    version,
    about = "Compare contour-stencil and bilinear demosaicking against ground truth"
)]
/// Command-line arguments for the evaluation pipeline
pub struct Cli {
    /// Mosaic pattern identifier passed to the sampler and reconstructors
    #[arg(value_name = "PATTERN")]
    pub pattern: String,

    /// Contour-stencil tuning parameter
    #[arg(value_name = "ALPHA", allow_negative_numbers = true)]
    pub alpha: f64,

    /// Directory holding input_0.png and receiving every artifact
    #[arg(short = 'd', long, default_value = ".")]
    pub workdir: PathBuf,

    /// Directory containing the mosaic, dmcswl1, dmbilinear and imdiff programs
    #[arg(short, long)]
    pub bin_dir: Option<PathBuf>,

    /// Program used to convert the contour plot to PDF
    #[arg(long, value_name = "PROGRAM")]
    pub ghostscript: Option<PathBuf>,

    /// Suppress progress output and the final table
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if the stage progress bar should be displayed
    ///
    /// Debug logging and the bar share stderr, so verbose mode hides the bar.
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet && !self.verbose
    }

    /// Build the run configuration from the arguments
    pub fn pipeline_config(&self) -> PipelineConfig {
        let mut tools = ToolPaths::default();
        if let Some(ref bin_dir) = self.bin_dir {
            tools = tools.in_directory(bin_dir);
        }
        if let Some(ref ghostscript) = self.ghostscript {
            tools.rasterizer.clone_from(ghostscript);
        }
        PipelineConfig::new(self.pattern.clone(), self.alpha).with_tools(tools)
    }
}

/// Runs the pipeline for parsed CLI arguments and reports the result
pub struct EvaluationRunner {
    cli: Cli,
}

impl EvaluationRunner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run every stage in the working directory
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory is missing, the
    /// configuration is invalid, or any stage fails
    pub fn process(&self) -> Result<PipelineOutcome> {
        let store = ArtifactStore::open(&self.cli.workdir)?;
        let progress = if self.cli.should_show_progress() {
            StageProgress::new(Stage::ALL.len())
        } else {
            StageProgress::hidden()
        };

        let mut pipeline = Pipeline::new(self.cli.pipeline_config(), store, SystemToolRunner)?
            .with_progress(progress);
        let outcome = pipeline.run()?;

        self.announce(&outcome);
        Ok(outcome)
    }

    // Allow print for the comparison table, the tool's primary output
    #[allow(clippy::print_stdout, clippy::print_stderr)]
    fn announce(&self, outcome: &PipelineOutcome) {
        if self.cli.quiet {
            return;
        }
        if matches!(outcome, PipelineOutcome::CompletedWithoutContours(_)) {
            eprintln!("Contour plot conversion failed; see demo_failure.txt");
        }
        println!("{}", outcome.summary().report.render());
    }
}
