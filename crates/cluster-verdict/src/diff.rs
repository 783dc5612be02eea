//! Model-free pixel difference between two captures.

use image::{Rgba, RgbaImage};

use crate::capture::Raster;
use crate::types::{Rect, Verdict, VerdictResult, PIXELS_DIFFER, PIXELS_IDENTICAL};

/// Per-channel absolute difference of two captures.
///
/// Captures of different sizes are compared over their common top-left
/// region, so extra rows or columns on either side are not seen.
pub fn difference_image(a: &dyn Raster, b: &dyn Raster) -> RgbaImage {
    let rgba_a = a.to_rgba8();
    let rgba_b = b.to_rgba8();

    let w = rgba_a.width().min(rgba_b.width());
    let h = rgba_a.height().min(rgba_b.height());

    RgbaImage::from_fn(w, h, |x, y| {
        let pa = rgba_a.get_pixel(x, y).0;
        let pb = rgba_b.get_pixel(x, y).0;
        Rgba([
            pa[0].abs_diff(pb[0]),
            pa[1].abs_diff(pb[1]),
            pa[2].abs_diff(pb[2]),
            pa[3].abs_diff(pb[3]),
        ])
    })
}

/// Bounding box of the non-zero pixels of a difference image.
pub fn bounding_box(diff: &RgbaImage) -> Option<Rect> {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    let mut found = false;

    for (x, y, pixel) in diff.enumerate_pixels() {
        if pixel.0 != [0, 0, 0, 0] {
            found = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    found.then(|| Rect {
        x: min_x,
        y: min_y,
        w: max_x - min_x + 1,
        h: max_y - min_y + 1,
    })
}

/// Region where two captures differ, if any.
pub fn difference_bbox(a: &dyn Raster, b: &dyn Raster) -> Option<Rect> {
    bounding_box(&difference_image(a, b))
}

/// Binary pixel comparison: identical or not, nothing in between.
///
/// No threshold is applied; a single channel off by one is a difference.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalComparator;

impl LocalComparator {
    pub fn new() -> Self {
        Self
    }

    /// Compare `actual` against `reference`.
    pub fn compare(&self, actual: &dyn Raster, reference: &dyn Raster) -> VerdictResult<Verdict> {
        let text = match difference_bbox(actual, reference) {
            Some(region) => {
                tracing::debug!(
                    "Pixel differences within {}x{} at ({}, {})",
                    region.w,
                    region.h,
                    region.x,
                    region.y
                );
                PIXELS_DIFFER
            }
            None => PIXELS_IDENTICAL,
        };
        Ok(Verdict::Judged(text.to_string()))
    }
}
