//! Frame filters: grayscale, Sobel gradient magnitude and Canny edges.
//!
//! ## Planes
//!
//! Intermediate results are single-channel `f32` planes of shape
//! `(height, width)` holding values on the 0-255 scale of the source bytes.
//! Display-facing results are RGBA `u8` arrays of shape `(height, width, 4)`.
//!
//! ## Stages
//!
//! | Stage | Module | Input | Output |
//! |-------|--------|-------|--------|
//! | Luma | [`grayscale`] | RGBA u8 | plane |
//! | Gaussian 3x3 | [`blur`] | plane | plane |
//! | Sobel gradient | [`gradient`] | plane | [`gradient::GradientField`] |
//! | Non-maximum suppression | [`suppression`] | gradient field | plane |
//! | Double threshold | [`hysteresis`] | plane | RGBA u8 |
//!
//! [`edge`] and [`canny`] chain these into the two edge filter modes.
//!
//! ## Borders
//!
//! Convolution stages only evaluate pixels whose whole neighborhood lies
//! inside the defined part of the input. Everything else is written as zero,
//! so the outermost ring of every blur, gradient and suppression plane is 0.
//!
//! ## Input Images
//!
//! The public filters accept `(height, width, channels)` arrays with 1-4
//! channels and reject anything else with a [`PipelineError`] before any
//! stage runs. [`crate::RgbaRaster`] inputs are always accepted.
//!
//! With the `parallel` feature the per-pixel loops run on rayon. Each
//! output pixel is computed independently, so results do not depend on it.

pub mod blur;
pub mod canny;
pub mod edge;
pub mod gradient;
pub mod grayscale;
pub mod hysteresis;
pub mod kernel;
pub mod suppression;

use ndarray::{Array2, Array3, ArrayView3, Zip};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{PipelineError, PipelineResult};

/// Channel counts the filters can read luma from.
pub const MAX_INPUT_CHANNELS: usize = 4;

/// Check that `input` is a non-empty image with 1-4 channels.
pub(crate) fn validate_image(input: &ArrayView3<u8>) -> PipelineResult<()> {
    let (height, width, channels) = input.dim();
    if width == 0 || height == 0 {
        return Err(PipelineError::InvalidDimensions { width, height });
    }
    if channels == 0 || channels > MAX_INPUT_CHANNELS {
        return Err(PipelineError::ChannelCount(channels));
    }
    Ok(())
}

/// Build a `(height, width, 4)` RGBA image with pixel `(y, x)` set to `f((y, x))`.
pub(crate) fn render_rgba<F>(height: usize, width: usize, f: F) -> Array3<u8>
where
    F: Fn((usize, usize)) -> [u8; 4] + Sync + Send,
{
    let mut output = Array3::<u8>::zeros((height, width, 4));

    // Freshly allocated, so always contiguous.
    if let Some(data) = output.as_slice_mut() {
        let render = |(i, px): (usize, &mut [u8])| px.copy_from_slice(&f((i / width, i % width)));

        #[cfg(feature = "parallel")]
        data.par_chunks_mut(4).enumerate().for_each(render);
        #[cfg(not(feature = "parallel"))]
        data.chunks_mut(4).enumerate().for_each(render);
    }

    output
}

/// Give `plane` the `(height, width)` shape, reallocating only on mismatch.
pub(crate) fn reshape_plane(plane: &mut Array2<f32>, height: usize, width: usize) {
    if plane.dim() != (height, width) {
        *plane = Array2::zeros((height, width));
    }
}

/// Overwrite every element of `plane` with `f((y, x))`.
pub(crate) fn fill_plane<F>(plane: &mut Array2<f32>, f: F)
where
    F: Fn((usize, usize)) -> f32 + Sync + Send,
{
    let zip = Zip::indexed(plane);

    #[cfg(feature = "parallel")]
    zip.par_for_each(|idx, v| *v = f(idx));
    #[cfg(not(feature = "parallel"))]
    zip.for_each(|idx, v| *v = f(idx));
}

/// True when `(y, x)` lies at least `inset` pixels away from every edge.
#[inline]
pub(crate) fn is_inside(y: usize, x: usize, height: usize, width: usize, inset: usize) -> bool {
    y >= inset && x >= inset && y + inset < height && x + inset < width
}
