//! Logical artifact names and the directory that holds them

use crate::io::configuration::ZOOM_SUFFIX;
use crate::io::error::{PipelineError, Result};
use std::path::{Path, PathBuf};

/// Demosaicking method under evaluation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    /// Bilinear interpolation
    Bilinear,
    /// Contour-stencil reconstruction
    ContourStencil,
}

impl Method {
    /// Report order: bilinear first
    pub const ALL: [Self; 2] = [Self::Bilinear, Self::ContourStencil];

    /// Short identifier used in artifact file names
    pub const fn key(self) -> &'static str {
        match self {
            Self::Bilinear => "bilinear",
            Self::ContourStencil => "dmcswl1",
        }
    }

    /// Human-readable name shown in the report
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Bilinear => "Bilinear demosaicking",
            Self::ContourStencil => "Contour stencils demosaicking",
        }
    }

    /// Reconstructed image produced by this method
    pub const fn reconstruction(self) -> Artifact {
        match self {
            Self::Bilinear => Artifact::Bilinear,
            Self::ContourStencil => Artifact::ContourStencil,
        }
    }

    /// Difference image against ground truth
    pub const fn diff(self) -> Artifact {
        match self {
            Self::Bilinear => Artifact::DiffBilinear,
            Self::ContourStencil => Artifact::DiffContourStencil,
        }
    }

    /// Captured standard output of the reconstructor
    pub const fn stdout_log(self) -> Artifact {
        match self {
            Self::Bilinear => Artifact::StdoutBilinear,
            Self::ContourStencil => Artifact::StdoutContourStencil,
        }
    }

    /// Persisted mean squared error
    pub const fn mse(self) -> Artifact {
        match self {
            Self::Bilinear => Artifact::MseBilinear,
            Self::ContourStencil => Artifact::MseContourStencil,
        }
    }
}

/// Every file the pipeline reads or writes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Artifact {
    /// Ground truth, cropped in place by preprocessing
    Input,
    /// Mosaicked image, padded until the trim stage
    Mosaicked,
    /// Contour-stencil reconstruction
    ContourStencil,
    /// Bilinear reconstruction
    Bilinear,
    /// Contour-stencil difference image
    DiffContourStencil,
    /// Bilinear difference image
    DiffBilinear,
    /// Vector plot of the estimated contours
    ContourPlot,
    /// Paginated document converted from the contour plot
    ContourDocument,
    /// Captured contour-stencil reconstructor output
    StdoutContourStencil,
    /// Captured bilinear reconstructor output
    StdoutBilinear,
    /// Rounded contour-stencil MSE
    MseContourStencil,
    /// Rounded bilinear MSE
    MseBilinear,
    /// Combined output of the vector-to-raster converter
    ProcessLog,
    /// Explanation written when the conversion fails
    FailureNote,
    /// Rendered comparison table
    Report,
}

impl Artifact {
    /// Images scaled up by the zoom stage, in processing order
    pub const ZOOMED: [Self; 6] = [
        Self::Input,
        Self::Mosaicked,
        Self::ContourStencil,
        Self::Bilinear,
        Self::DiffContourStencil,
        Self::DiffBilinear,
    ];

    /// Padded images trimmed after reconstruction, in processing order
    pub const PADDED: [Self; 3] = [Self::Mosaicked, Self::Bilinear, Self::ContourStencil];

    /// File name inside the artifact store
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Input => "input_0.png",
            Self::Mosaicked => "mosaicked.png",
            Self::ContourStencil => "dmcswl1.png",
            Self::Bilinear => "bilinear.png",
            Self::DiffContourStencil => "diffdmcswl1.png",
            Self::DiffBilinear => "diffbilinear.png",
            Self::ContourPlot => "contours.eps",
            Self::ContourDocument => "contours.pdf",
            Self::StdoutContourStencil => "stdout_dmcswl1.txt",
            Self::StdoutBilinear => "stdout_bilinear.txt",
            Self::MseContourStencil => "mse_dmcswl1.txt",
            Self::MseBilinear => "mse_bilinear.txt",
            Self::ProcessLog => "stdout",
            Self::FailureNote => "demo_failure.txt",
            Self::Report => "table.txt",
        }
    }

    /// File name of the zoomed preview, `None` for non-image artifacts
    pub fn zoom_file_name(self) -> Option<String> {
        Self::ZOOMED.contains(&self).then(|| {
            let name = self.file_name();
            let stem = name.strip_suffix(".png").unwrap_or(name);
            format!("{stem}{ZOOM_SUFFIX}.png")
        })
    }
}

/// Flat working directory shared by all stages of one run
#[derive(Clone, Debug)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    /// Open an existing directory as the store
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is not an existing directory
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if root.is_dir() {
            Ok(Self { root })
        } else {
            Err(PipelineError::FileSystem {
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "artifact directory does not exist",
                ),
                path: root,
                operation: "open artifact store",
            })
        }
    }

    /// Directory all artifacts live in
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of an artifact
    pub fn path(&self, artifact: Artifact) -> PathBuf {
        self.root.join(artifact.file_name())
    }

    /// Location of an artifact's zoomed preview
    pub fn zoom_path(&self, artifact: Artifact) -> Option<PathBuf> {
        artifact.zoom_file_name().map(|name| self.root.join(name))
    }

    /// Read a text artifact
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or not valid UTF-8
    pub fn read_text(&self, artifact: Artifact) -> Result<String> {
        let path = self.path(artifact);
        std::fs::read_to_string(&path).map_err(|source| PipelineError::FileSystem {
            path,
            operation: "read",
            source,
        })
    }

    /// Write a text or binary artifact, replacing previous contents
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn write(&self, artifact: Artifact, contents: impl AsRef<[u8]>) -> Result<()> {
        let path = self.path(artifact);
        std::fs::write(&path, contents).map_err(|source| PipelineError::FileSystem {
            path,
            operation: "write",
            source,
        })
    }
}
