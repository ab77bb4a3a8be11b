//! Command lines of the external tools and the capability that runs them

use crate::io::configuration::PipelineConfig;
use crate::io::error::{PipelineError, Result};
use crate::pipeline::artifacts::{Artifact, Method};
use std::path::{Path, PathBuf};
use std::process::Command;

/// A fully specified external process call
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolInvocation {
    /// Logical tool name for diagnostics
    pub tool: &'static str,
    /// Program to execute
    pub program: PathBuf,
    /// Arguments, with artifacts given relative to `working_dir`
    pub args: Vec<String>,
    /// Directory the process runs in
    pub working_dir: PathBuf,
}

impl ToolInvocation {
    /// Render the command line for logs
    pub fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Exit status and captured streams of a finished process
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code, `None` when terminated by a signal
    pub status: Option<i32>,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl ToolOutput {
    /// Whether the process exited with code 0
    pub fn succeeded(&self) -> bool {
        self.status == Some(0)
    }

    /// Standard output followed by standard error
    pub fn combined(&self) -> String {
        let mut text = self.stdout.clone();
        text.push_str(&self.stderr);
        text
    }

    /// Turn a non-zero exit into an error
    ///
    /// # Errors
    ///
    /// Returns `ToolFailed` if the process did not exit with code 0
    pub fn into_checked(self, tool: &'static str) -> Result<Self> {
        if self.succeeded() {
            Ok(self)
        } else {
            Err(PipelineError::ToolFailed {
                tool,
                status: self.status,
                stderr: self.stderr,
            })
        }
    }
}

/// Capability to run an external tool to completion
pub trait ToolRunner {
    /// Run the invocation, blocking until the process exits
    ///
    /// # Errors
    ///
    /// Returns `ToolLaunch` if the process cannot be started. A process that
    /// starts and exits non-zero is reported through `ToolOutput::status`.
    fn run(&mut self, invocation: &ToolInvocation) -> Result<ToolOutput>;
}

/// Runs tools as operating system processes
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemToolRunner;

impl ToolRunner for SystemToolRunner {
    fn run(&mut self, invocation: &ToolInvocation) -> Result<ToolOutput> {
        tracing::debug!(command = %invocation.command_line(), "running tool");
        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.working_dir)
            .output()
            .map_err(|source| PipelineError::ToolLaunch {
                program: invocation.program.clone(),
                source,
            })?;

        Ok(ToolOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Builds the fixed command lines for one run
pub struct ToolCommands<'a> {
    config: &'a PipelineConfig,
    working_dir: &'a Path,
}

impl<'a> ToolCommands<'a> {
    /// Bind the command builders to a configuration and artifact directory
    pub const fn new(config: &'a PipelineConfig, working_dir: &'a Path) -> Self {
        Self {
            config,
            working_dir,
        }
    }

    fn invocation(&self, tool: &'static str, program: &Path, args: Vec<String>) -> ToolInvocation {
        ToolInvocation {
            tool,
            program: program.to_path_buf(),
            args,
            working_dir: self.working_dir.to_path_buf(),
        }
    }

    /// Sample the input with the mosaic pattern, adding padding
    pub fn mosaic(&self) -> ToolInvocation {
        self.invocation(
            "mosaic",
            &self.config.tools.mosaic,
            vec![
                "-p".to_string(),
                self.config.mosaic_pattern.clone(),
                "-e".to_string(),
                self.config.padding.to_string(),
                Artifact::Input.file_name().to_string(),
                Artifact::Mosaicked.file_name().to_string(),
            ],
        )
    }

    /// Reconstruct the mosaicked image with the given method
    pub fn reconstruct(&self, method: Method) -> ToolInvocation {
        let mut args = vec!["-p".to_string(), self.config.mosaic_pattern.clone()];
        let (tool, program) = match method {
            Method::ContourStencil => {
                args.push("-a".to_string());
                args.push(self.config.alpha.to_string());
                ("dmcswl1", &self.config.tools.contour_stencil)
            }
            Method::Bilinear => ("dmbilinear", &self.config.tools.bilinear),
        };
        args.push(Artifact::Mosaicked.file_name().to_string());
        args.push(method.reconstruction().file_name().to_string());
        self.invocation(tool, program, args)
    }

    /// Plot the estimated contours of the unpadded input
    pub fn contour_plot(&self) -> ToolInvocation {
        self.invocation(
            "dmcswl1 contours",
            &self.config.tools.contour_stencil,
            vec![
                "-p".to_string(),
                self.config.mosaic_pattern.clone(),
                "-s".to_string(),
                Artifact::Input.file_name().to_string(),
                Artifact::ContourPlot.file_name().to_string(),
            ],
        )
    }

    /// Mean squared error between ground truth and a reconstruction
    pub fn mse(&self, method: Method) -> ToolInvocation {
        self.invocation(
            "imdiff mse",
            &self.config.tools.metric,
            vec![
                "-mmse".to_string(),
                Artifact::Input.file_name().to_string(),
                method.reconstruction().file_name().to_string(),
            ],
        )
    }

    /// Visual difference between ground truth and a reconstruction
    pub fn diff(&self, method: Method) -> ToolInvocation {
        self.invocation(
            "imdiff diff",
            &self.config.tools.metric,
            vec![
                Artifact::Input.file_name().to_string(),
                method.reconstruction().file_name().to_string(),
                method.diff().file_name().to_string(),
            ],
        )
    }

    /// Convert the contour plot to a PDF document
    pub fn rasterize(&self) -> ToolInvocation {
        let output_file = format!("-sOutputFile={}", Artifact::ContourDocument.file_name());
        let args = [
            "-dSAFER",
            "-q",
            "-P-",
            "-dCompatibilityLevel=1.4",
            "-dNOPAUSE",
            "-dBATCH",
            "-sDEVICE=pdfwrite",
            output_file.as_str(),
            "-c",
            ".setpdfwrite",
            "-f",
            Artifact::ContourPlot.file_name(),
        ]
        .iter()
        .map(ToString::to_string)
        .collect();
        self.invocation("gs", &self.config.tools.rasterizer, args)
    }
}
