//! Luma conversion and grayscale rendering.
//!
//! Uses ITU-R BT.601 luma weights, the weighting camera frames are usually
//! encoded with.
//!
//! ## Supported Formats
//!
//! - **RGBA / RGB**: (height, width, 4|3) - luma from R, G, B; alpha ignored
//! - **Grayscale**: (height, width, 1|2) - channel 0 is taken as luma
//!
//! The luma plane is `f32` in the 0-255 range and is never clamped, so
//! later stages see full precision.

use ndarray::{Array2, Array3, ArrayView3};

use super::{fill_plane, render_rgba, reshape_plane, validate_image};
use crate::error::PipelineResult;

/// ITU-R BT.601 luma coefficients
pub const LUMA_R: f32 = 0.299;
pub const LUMA_G: f32 = 0.587;
pub const LUMA_B: f32 = 0.114;

/// Weighted luma of one RGB triple.
#[inline]
pub fn luma_of(r: f32, g: f32, b: f32) -> f32 {
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}

#[inline]
fn luma_at(input: &ArrayView3<u8>, y: usize, x: usize, channels: usize) -> f32 {
    if channels < 3 {
        input[[y, x, 0]] as f32
    } else {
        luma_of(
            input[[y, x, 0]] as f32,
            input[[y, x, 1]] as f32,
            input[[y, x, 2]] as f32,
        )
    }
}

/// Convert an `f32` display value to a byte: clamp to 0-255, round half to even.
#[inline]
pub fn to_display_u8(v: f32) -> u8 {
    v.clamp(0.0, 255.0).round_ties_even() as u8
}

/// Single-channel luma plane of an image.
///
/// # Arguments
/// * `input` - Image with 1-4 channels (height, width, channels), u8 values
///
/// # Returns
/// `(height, width)` plane of luma values in 0.0-255.0
pub fn luma_plane(input: ArrayView3<u8>) -> PipelineResult<Array2<f32>> {
    validate_image(&input)?;
    let (height, width, _) = input.dim();
    let mut out = Array2::<f32>::zeros((height, width));
    luma_plane_into(input, &mut out);
    Ok(out)
}

/// [`luma_plane`] writing into a caller-supplied plane (reshaped if needed).
pub(crate) fn luma_plane_into(input: ArrayView3<u8>, out: &mut Array2<f32>) {
    let (height, width, channels) = input.dim();
    reshape_plane(out, height, width);
    fill_plane(out, |(y, x)| luma_at(&input, y, x, channels));
}

/// Render an image as grayscale RGBA.
///
/// Output is RGBA with R=G=B=luma. Alpha is copied from a 4-channel input
/// and set to 255 otherwise.
pub fn grayscale_rgba(input: ArrayView3<u8>) -> PipelineResult<Array3<u8>> {
    validate_image(&input)?;
    Ok(render_grayscale(input))
}

pub(crate) fn render_grayscale(input: ArrayView3<u8>) -> Array3<u8> {
    let (height, width, channels) = input.dim();

    render_rgba(height, width, |(y, x)| {
        let gray = if channels < 3 {
            input[[y, x, 0]]
        } else {
            to_display_u8(luma_at(&input, y, x, channels))
        };
        let alpha = if channels == 4 { input[[y, x, 3]] } else { 255 };
        [gray, gray, gray, alpha]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use approx::assert_abs_diff_eq;

    fn pixel(r: u8, g: u8, b: u8, a: u8) -> Array3<u8> {
        let mut img = Array3::<u8>::zeros((1, 1, 4));
        img[[0, 0, 0]] = r;
        img[[0, 0, 1]] = g;
        img[[0, 0, 2]] = b;
        img[[0, 0, 3]] = a;
        img
    }

    #[test]
    fn test_luma_bt601_weights() {
        let plane = luma_plane(pixel(255, 0, 0, 255).view()).unwrap();
        assert_abs_diff_eq!(plane[[0, 0]], 76.245, epsilon = 1e-3);

        let plane = luma_plane(pixel(0, 255, 0, 255).view()).unwrap();
        assert_abs_diff_eq!(plane[[0, 0]], 149.685, epsilon = 1e-3);

        let plane = luma_plane(pixel(0, 0, 255, 0).view()).unwrap();
        assert_abs_diff_eq!(plane[[0, 0]], 29.07, epsilon = 1e-3);
    }

    #[test]
    fn test_luma_ignores_alpha() {
        let opaque = luma_plane(pixel(10, 120, 230, 255).view()).unwrap();
        let clear = luma_plane(pixel(10, 120, 230, 0).view()).unwrap();
        assert_eq!(opaque, clear);
    }

    #[test]
    fn test_luma_is_idempotent_on_gray() {
        for g in [0.0f32, 1.0, 37.5, 128.0, 254.9, 255.0] {
            let once = luma_of(g, g, g);
            assert_abs_diff_eq!(luma_of(once, once, once), g, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_grayscale_rgba_red() {
        let result = grayscale_rgba(pixel(255, 0, 0, 200).view()).unwrap();
        // 0.299 * 255 = 76.245
        assert_eq!(result[[0, 0, 0]], 76);
        assert_eq!(result[[0, 0, 1]], 76);
        assert_eq!(result[[0, 0, 2]], 76);
        assert_eq!(result[[0, 0, 3]], 200);
    }

    #[test]
    fn test_grayscale_rgba_is_idempotent() {
        let mut img = Array3::<u8>::zeros((4, 5, 4));
        for ((y, x, c), v) in img.indexed_iter_mut() {
            *v = ((y * 53 + x * 31 + c * 17) % 256) as u8;
        }
        let once = grayscale_rgba(img.view()).unwrap();
        let twice = grayscale_rgba(once.view()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_single_channel_input_is_luma() {
        let mut img = Array3::<u8>::zeros((2, 2, 1));
        img[[1, 0, 0]] = 99;

        let plane = luma_plane(img.view()).unwrap();
        assert_eq!(plane[[1, 0]], 99.0);

        let rgba = grayscale_rgba(img.view()).unwrap();
        assert_eq!(rgba[[1, 0, 0]], 99);
        assert_eq!(rgba[[1, 0, 3]], 255);
    }

    #[test]
    fn test_rejects_unreadable_channel_counts() {
        let empty = Array3::<u8>::zeros((4, 4, 0));
        assert_eq!(luma_plane(empty.view()), Err(PipelineError::ChannelCount(0)));
        assert_eq!(grayscale_rgba(empty.view()), Err(PipelineError::ChannelCount(0)));

        let wide = Array3::<u8>::zeros((2, 2, 6));
        assert_eq!(grayscale_rgba(wide.view()), Err(PipelineError::ChannelCount(6)));

        let flat = Array3::<u8>::zeros((0, 3, 4));
        assert!(matches!(
            luma_plane(flat.view()),
            Err(PipelineError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_to_display_u8_clamps_and_rounds() {
        assert_eq!(to_display_u8(-3.0), 0);
        assert_eq!(to_display_u8(300.0), 255);
        assert_eq!(to_display_u8(76.245), 76);
        assert_eq!(to_display_u8(2.5), 2);
        assert_eq!(to_display_u8(3.5), 4);
        assert_eq!(to_display_u8(f32::NAN), 0);
    }
}
