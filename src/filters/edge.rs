//! Sobel edge filter: gradient magnitude as a grayscale image.
//!
//! Luma goes straight into the gradient estimator (no blur, no suppression,
//! no thresholds). The magnitude is clamped to 0-255 and written to R, G
//! and B; alpha is 255 for every pixel, including the zero border.

use ndarray::{Array3, ArrayView2, ArrayView3};

use super::gradient::{sobel_gradient_into, GradientField};
use super::grayscale::{luma_plane_into, to_display_u8};
use super::kernel::SobelKernel;
use super::{render_rgba, validate_image};
use crate::error::PipelineResult;
use crate::pool::PlanePool;

/// Apply Sobel edge detection.
///
/// # Arguments
/// * `input` - Image with 1-4 channels (height, width, channels)
/// * `kernel` - Sobel aperture; 3x3 is the reference operator
///
/// # Returns
/// Opaque RGBA image with the clamped gradient magnitude in R, G, B
pub fn sobel_rgba(input: ArrayView3<u8>, kernel: &SobelKernel) -> PipelineResult<Array3<u8>> {
    validate_image(&input)?;
    Ok(sobel_rgba_pooled(input, kernel, &mut PlanePool::new()))
}

pub(crate) fn sobel_rgba_pooled(
    input: ArrayView3<u8>,
    kernel: &SobelKernel,
    pool: &mut PlanePool,
) -> Array3<u8> {
    let (height, width, _) = input.dim();

    let mut luma = pool.take(height, width);
    luma_plane_into(input, &mut luma);

    let mut field = GradientField::from_parts(pool.take(height, width), pool.take(height, width))
        .unwrap_or_else(|| GradientField::zeros(height, width));
    sobel_gradient_into(luma.view(), kernel, 0, &mut field);
    pool.give(luma);

    let output = render_magnitude(field.magnitude().view());

    let (magnitude, direction) = field.into_parts();
    pool.give(magnitude);
    pool.give(direction);

    output
}

/// Render a magnitude plane as opaque grayscale RGBA.
pub fn render_magnitude(magnitude: ArrayView2<f32>) -> Array3<u8> {
    let (height, width) = magnitude.dim();
    render_rgba(height, width, |(y, x)| {
        let v = to_display_u8(magnitude[[y, x]]);
        [v, v, v, 255]
    })
}
