//! PNG load, crop, resize and save primitives backed by the `image` crate

use crate::io::error::{PipelineError, Result};
use image::DynamicImage;
use image::imageops::FilterType;
use std::path::Path;

/// Load an image, recording the path on failure
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|source| PipelineError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })
}

/// Save an image, replacing any existing file at `path`
///
/// # Errors
///
/// Returns an error if the image cannot be encoded or written
pub fn save_image(image: &DynamicImage, path: &Path) -> Result<()> {
    image.save(path).map_err(|source| PipelineError::ImageExport {
        path: path.to_path_buf(),
        source,
    })
}

/// Copy the rectangle at `origin` with the given `size` out of `image`
///
/// # Errors
///
/// Returns an error if the rectangle extends past the image bounds
pub fn crop_region(
    image: &DynamicImage,
    origin: (u32, u32),
    size: (u32, u32),
) -> Result<DynamicImage> {
    let (width, height) = (image.width(), image.height());
    let fits_x = origin.0.checked_add(size.0).is_some_and(|end| end <= width);
    let fits_y = origin.1.checked_add(size.1).is_some_and(|end| end <= height);
    if !(fits_x && fits_y) {
        return Err(PipelineError::InvalidSourceData {
            reason: format!(
                "crop {}x{} at ({}, {}) exceeds {width}x{height} image",
                size.0, size.1, origin.0, origin.1
            ),
        });
    }

    Ok(image.crop_imm(origin.0, origin.1, size.0, size.1))
}

/// Resize to exactly `size`, ignoring aspect ratio
pub fn resize_exact(image: &DynamicImage, size: (u32, u32), filter: FilterType) -> DynamicImage {
    image.resize_exact(size.0, size.1, filter)
}

/// Read only the dimensions of an image file
///
/// # Errors
///
/// Returns an error if the file cannot be opened or its header decoded
pub fn read_dimensions(path: &Path) -> Result<(u32, u32)> {
    image::image_dimensions(path).map_err(|source| PipelineError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })
}
