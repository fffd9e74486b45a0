//! Canny edge detection.
//!
//! Luma → 3x3 Gaussian → 3x3 Sobel → non-maximum suppression → double
//! threshold. The gradient stage skips the blur's zero frame, so a uniform
//! frame has no gradient anywhere rather than a bright ring one pixel in
//! from the border.
//!
//! The final stage is the two-level classification of
//! [`super::hysteresis`]; weak pixels are not traced along edges.
//!
//! Thresholds are inclusive. With `low <= 0` every pixel that is not strong
//! is at least weak, so a uniform frame renders entirely as weak edges.

use ndarray::{Array3, ArrayView3};
use tracing::trace;

use super::blur::{gaussian_blur_3x3_into, BLUR_BORDER};
use super::gradient::{sobel_gradient_into, GradientField};
use super::grayscale::luma_plane_into;
use super::hysteresis::classify_edges;
use super::kernel::SobelKernel;
use super::suppression::non_maximum_suppression_into;
use super::validate_image;
use crate::error::PipelineResult;
use crate::pool::PlanePool;

/// Run Canny edge detection.
///
/// # Arguments
/// * `input` - Image with 1-4 channels (height, width, channels)
/// * `low` - weak-edge threshold on suppressed magnitude
/// * `high` - strong-edge threshold on suppressed magnitude
///
/// # Returns
/// Opaque RGBA edge map: 255 strong, 75 weak, 0 background
pub fn canny_rgba(input: ArrayView3<u8>, low: f32, high: f32) -> PipelineResult<Array3<u8>> {
    validate_image(&input)?;
    Ok(canny_rgba_pooled(input, low, high, &mut PlanePool::new()))
}

pub(crate) fn canny_rgba_pooled(
    input: ArrayView3<u8>,
    low: f32,
    high: f32,
    pool: &mut PlanePool,
) -> Array3<u8> {
    let (height, width, _) = input.dim();
    if low >= high {
        trace!(low, high, "degenerate canny thresholds, no weak band");
    }

    let mut luma = pool.take(height, width);
    luma_plane_into(input, &mut luma);

    let mut blurred = pool.take(height, width);
    gaussian_blur_3x3_into(luma.view(), &mut blurred);
    pool.give(luma);

    let mut field = GradientField::from_parts(pool.take(height, width), pool.take(height, width))
        .unwrap_or_else(|| GradientField::zeros(height, width));
    sobel_gradient_into(blurred.view(), &SobelKernel::sobel_3x3(), BLUR_BORDER, &mut field);
    pool.give(blurred);

    let mut suppressed = pool.take(height, width);
    non_maximum_suppression_into(&field, &mut suppressed);
    let (magnitude, direction) = field.into_parts();
    pool.give(magnitude);
    pool.give(direction);

    let output = classify_edges(suppressed.view(), low, high);
    pool.give(suppressed);

    output
}
