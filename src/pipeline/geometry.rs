//! Crop, padding and zoom arithmetic shared by the stages

/// Width and height of an image in pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Size {
    /// Horizontal extent
    pub width: u32,
    /// Vertical extent
    pub height: u32,
}

impl Size {
    /// Create a size from its two extents
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total number of pixels
    pub const fn pixel_count(self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Size after adding `padding` pixels to every side
    pub const fn padded(self, padding: u32) -> Self {
        Self {
            width: self.width + 2 * padding,
            height: self.height + 2 * padding,
        }
    }

    /// Scale both extents by an integer factor
    pub const fn scaled(self, factor: u32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }

    /// Tuple form used by the image primitives
    pub const fn as_tuple(self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Centered crop of an image to the working resolution
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropPlan {
    /// Size of the source image
    pub source: Size,
    /// Size after cropping
    pub crop: Size,
    /// Top-left corner of the crop in source coordinates
    pub origin: (u32, u32),
}

impl CropPlan {
    /// Plan a centered crop that caps both axes at `max_dimension`
    pub fn centered(source: Size, max_dimension: u32) -> Self {
        let crop = Size::new(
            source.width.min(max_dimension),
            source.height.min(max_dimension),
        );
        // Integer division floors, matching an offset rounded toward the top-left
        let origin = (
            (source.width - crop.width) / 2,
            (source.height - crop.height) / 2,
        );
        Self {
            source,
            crop,
            origin,
        }
    }

    /// Whether the crop changes the image at all
    pub fn is_noop(&self) -> bool {
        self.crop == self.source
    }
}

/// Integer zoom making the smaller side at least `min_dimension`
///
/// Returns at least 1, so images already large enough are left unscaled.
pub const fn zoom_factor(crop: Size, min_dimension: u32) -> u32 {
    let smaller = if crop.width < crop.height {
        crop.width
    } else {
        crop.height
    };
    if smaller == 0 {
        return 1;
    }
    let factor = min_dimension.div_ceil(smaller);
    if factor < 1 { 1 } else { factor }
}

/// Whether the contour plot fits the pixel budget
pub const fn contours_feasible(crop: Size, pixel_budget: u64) -> bool {
    crop.pixel_count() <= pixel_budget
}
