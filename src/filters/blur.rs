//! Fixed 3x3 Gaussian blur for luma planes.
//!
//! Noise suppression ahead of the Canny gradient. The kernel is the binomial
//! approximation of a Gaussian and does not follow the configured Sobel
//! kernel size.
//!
//! Only interior pixels are blurred. The outermost one-pixel frame of the
//! output is left at zero instead of being replicated or reflected, and
//! downstream stages treat that frame as undefined.

use ndarray::{Array2, ArrayView2};

use super::{fill_plane, is_inside, reshape_plane};

/// Binomial 3x3 kernel, applied with [`GAUSSIAN_3X3_SUM`] as divisor.
pub const GAUSSIAN_3X3: [[f32; 3]; 3] = [[1.0, 2.0, 1.0], [2.0, 4.0, 2.0], [1.0, 2.0, 1.0]];
pub const GAUSSIAN_3X3_SUM: f32 = 16.0;

/// Width of the zero frame [`gaussian_blur_3x3`] leaves around its output.
pub const BLUR_BORDER: usize = 1;

/// Apply the 3x3 Gaussian to a plane.
///
/// # Arguments
/// * `input` - `(height, width)` plane
///
/// # Returns
/// Blurred plane of the same shape with a zero one-pixel frame
pub fn gaussian_blur_3x3(input: ArrayView2<f32>) -> Array2<f32> {
    let mut out = Array2::<f32>::zeros(input.dim());
    gaussian_blur_3x3_into(input, &mut out);
    out
}

pub(crate) fn gaussian_blur_3x3_into(input: ArrayView2<f32>, out: &mut Array2<f32>) {
    let (height, width) = input.dim();
    reshape_plane(out, height, width);

    fill_plane(out, |(y, x)| {
        if !is_inside(y, x, height, width, BLUR_BORDER) {
            return 0.0;
        }

        let mut sum = 0.0f32;
        for (ky, row) in GAUSSIAN_3X3.iter().enumerate() {
            for (kx, &k) in row.iter().enumerate() {
                sum += input[[y + ky - 1, x + kx - 1]] * k;
            }
        }
        sum / GAUSSIAN_3X3_SUM
    });
}
