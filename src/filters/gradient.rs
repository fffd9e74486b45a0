//! Sobel gradient estimation.
//!
//! Produces a [`GradientField`]: per-pixel magnitude `sqrt(gx² + gy²)` and
//! direction `atan2(gy, gx)` in radians. `x` grows to the right and `y`
//! grows downward, so a dark-to-bright step from left to right has
//! direction 0 and a bright-to-dark one has direction π.
//!
//! The kernel is applied in its separable form. Antisymmetric derivative
//! taps are evaluated as differences of mirrored samples, so perfectly flat
//! regions give an exact zero gradient rather than rounding residue.

use std::f32::consts::PI;

use ndarray::{Array2, ArrayView2, Zip};

use super::is_inside;
use super::kernel::SobelKernel;

/// Gradient magnitude and direction planes of one source plane.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientField {
    magnitude: Array2<f32>,
    direction: Array2<f32>,
}

impl GradientField {
    /// Zeroed field of `(height, width)`.
    pub fn zeros(height: usize, width: usize) -> Self {
        Self {
            magnitude: Array2::zeros((height, width)),
            direction: Array2::zeros((height, width)),
        }
    }

    /// Assemble a field from two planes of the same shape.
    ///
    /// Returns `None` when the shapes differ.
    pub fn from_parts(magnitude: Array2<f32>, direction: Array2<f32>) -> Option<Self> {
        if magnitude.dim() != direction.dim() {
            return None;
        }
        Some(Self { magnitude, direction })
    }

    /// Edge strength, always >= 0.
    pub fn magnitude(&self) -> &Array2<f32> {
        &self.magnitude
    }

    /// Gradient angle in radians, in (-π, π].
    pub fn direction(&self) -> &Array2<f32> {
        &self.direction
    }

    /// `(height, width)`
    pub fn dim(&self) -> (usize, usize) {
        self.magnitude.dim()
    }

    pub fn into_parts(self) -> (Array2<f32>, Array2<f32>) {
        (self.magnitude, self.direction)
    }
}

/// Sobel gradient of a plane whose every pixel is defined.
///
/// Pixels within `kernel.radius()` of an edge are left at zero.
pub fn sobel_gradient(input: ArrayView2<f32>, kernel: &SobelKernel) -> GradientField {
    sobel_gradient_inset(input, kernel, 0)
}

/// Sobel gradient of a plane whose outer `undefined_border` pixels hold no data.
///
/// Used after [`super::blur::gaussian_blur_3x3`], whose zero frame must not
/// be read as a dark edge. Pixels within `kernel.radius() + undefined_border`
/// of an edge are left at zero.
pub fn sobel_gradient_inset(
    input: ArrayView2<f32>,
    kernel: &SobelKernel,
    undefined_border: usize,
) -> GradientField {
    let (height, width) = input.dim();
    let mut field = GradientField::zeros(height, width);
    sobel_gradient_into(input, kernel, undefined_border, &mut field);
    field
}

pub(crate) fn sobel_gradient_into(
    input: ArrayView2<f32>,
    kernel: &SobelKernel,
    undefined_border: usize,
    field: &mut GradientField,
) {
    let (height, width) = input.dim();
    super::reshape_plane(&mut field.magnitude, height, width);
    super::reshape_plane(&mut field.direction, height, width);

    let radius = kernel.radius();
    let inset = radius + undefined_border;
    let smooth = kernel.smooth();
    let derivative = kernel.derivative_half();

    // Vertical smoothing of row `row` around column `x`.
    let smoothed_row = |row: usize, x: usize| -> f32 {
        let mut sum = 0.0f32;
        for (j, &s) in smooth.iter().enumerate() {
            sum += s * input[[row, x + j - radius]];
        }
        sum
    };

    let compute = |(y, x): (usize, usize), m: &mut f32, dir: &mut f32| {
        if !is_inside(y, x, height, width, inset) {
            *m = 0.0;
            *dir = 0.0;
            return;
        }

        let mut gx = 0.0f32;
        for (i, &s) in smooth.iter().enumerate() {
            let row = y + i - radius;
            let mut diff = 0.0f32;
            for (k, &d) in derivative.iter().enumerate() {
                let offset = k + 1;
                diff += d * (input[[row, x + offset]] - input[[row, x - offset]]);
            }
            gx += s * diff;
        }

        let mut gy = 0.0f32;
        for (k, &d) in derivative.iter().enumerate() {
            let offset = k + 1;
            gy += d * (smoothed_row(y + offset, x) - smoothed_row(y - offset, x));
        }

        *m = (gx * gx + gy * gy).sqrt();
        *dir = fold_direction(gy.atan2(gx));
    };

    let zip = Zip::indexed(&mut field.magnitude).and(&mut field.direction);

    #[cfg(feature = "parallel")]
    zip.par_for_each(compute);
    #[cfg(not(feature = "parallel"))]
    zip.for_each(compute);
}

/// Map atan2's `-π` (negative-zero `gy`) onto `π` so angles stay in (-π, π].
#[inline]
fn fold_direction(angle: f32) -> f32 {
    if angle <= -PI {
        PI
    } else {
        angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// Deterministic textured plane.
    fn texture(height: usize, width: usize) -> Array2<f32> {
        Array2::from_shape_fn((height, width), |(y, x)| {
            ((y * 37 + x * 91 + y * x * 13) % 251) as f32
        })
    }

    fn dense_convolve(input: &Array2<f32>, k: &Array2<f32>, y: usize, x: usize) -> f32 {
        let r = k.dim().0 / 2;
        let mut sum = 0.0;
        for ky in 0..k.dim().0 {
            for kx in 0..k.dim().1 {
                sum += k[[ky, kx]] * input[[y + ky - r, x + kx - r]];
            }
        }
        sum
    }

    #[test]
    fn test_matches_dense_kernels() {
        let input = texture(9, 11);
        for size in [3, 5, 7] {
            let kernel = SobelKernel::new(size);
            let field = sobel_gradient(input.view(), &kernel);
            let r = kernel.radius();
            let (gxk, gyk) = (kernel.gx(), kernel.gy());

            for y in r..9 - r {
                for x in r..11 - r {
                    let gx = dense_convolve(&input, &gxk, y, x);
                    let gy = dense_convolve(&input, &gyk, y, x);
                    let expected = (gx * gx + gy * gy).sqrt();
                    assert_abs_diff_eq!(field.magnitude()[[y, x]], expected, epsilon = 1e-2);
                    if expected > 1.0 {
                        assert_abs_diff_eq!(
                            field.direction()[[y, x]],
                            gy.atan2(gx),
                            epsilon = 1e-3
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_ranges_and_zero_ring() {
        let input = texture(12, 7);
        let field = sobel_gradient(input.view(), &SobelKernel::sobel_3x3());
        let (height, width) = field.dim();

        for ((y, x), &m) in field.magnitude().indexed_iter() {
            let d = field.direction()[[y, x]];
            assert!(m >= 0.0);
            assert!(d > -PI && d <= PI, "direction {d} out of range");
            if y == 0 || x == 0 || y == height - 1 || x == width - 1 {
                assert_eq!(m, 0.0);
                assert_eq!(d, 0.0);
            }
        }
    }

    #[test]
    fn test_flat_plane_has_exact_zero_gradient() {
        let input = Array2::<f32>::from_elem((9, 9), 0.299 * 128.0 + 0.587 * 128.0 + 0.114 * 128.0);
        for size in [3, 5, 7] {
            let field = sobel_gradient(input.view(), &SobelKernel::new(size));
            assert!(field.magnitude().iter().all(|&m| m == 0.0));
        }
    }

    #[test]
    fn test_vertical_step_points_horizontally() {
        // Left half 0, right half 255, boundary between columns 3 and 4.
        let input = Array2::from_shape_fn((6, 8), |(_, x)| if x < 4 { 0.0 } else { 255.0 });
        let field = sobel_gradient(input.view(), &SobelKernel::sobel_3x3());

        for y in 1..5 {
            assert_eq!(field.magnitude()[[y, 1]], 0.0);
            assert_eq!(field.magnitude()[[y, 6]], 0.0);
            // 255 * (1 + 2 + 1)
            assert_abs_diff_eq!(field.magnitude()[[y, 3]], 1020.0, epsilon = 1e-3);
            assert_abs_diff_eq!(field.magnitude()[[y, 4]], 1020.0, epsilon = 1e-3);
            assert_abs_diff_eq!(field.direction()[[y, 3]], 0.0, epsilon = 1e-6);
        }

        let mirrored = Array2::from_shape_fn((6, 8), |(_, x)| if x < 4 { 255.0 } else { 0.0 });
        let field = sobel_gradient(mirrored.view(), &SobelKernel::sobel_3x3());
        assert_abs_diff_eq!(field.direction()[[2, 3]], PI, epsilon = 1e-6);
    }

    #[test]
    fn test_inset_skips_undefined_border() {
        let input = Array2::<f32>::from_elem((8, 8), 100.0);
        let mut framed = input.clone();
        for ((y, x), v) in framed.indexed_iter_mut() {
            if y == 0 || x == 0 || y == 7 || x == 7 {
                *v = 0.0;
            }
        }

        let naive = sobel_gradient(framed.view(), &SobelKernel::sobel_3x3());
        assert!(naive.magnitude()[[1, 3]] > 0.0);

        let inset = sobel_gradient_inset(framed.view(), &SobelKernel::sobel_3x3(), 1);
        assert!(inset.magnitude().iter().all(|&m| m == 0.0));
    }

    #[test]
    fn test_fold_direction() {
        assert_eq!(fold_direction(-PI), PI);
        assert_eq!(fold_direction(PI), PI);
        assert_eq!(fold_direction(-1.0), -1.0);
        assert_eq!(fold_direction((-0.0f32).atan2(-1.0)), PI);
    }

    #[test]
    fn test_from_parts_requires_matching_shapes() {
        assert!(GradientField::from_parts(Array2::zeros((2, 3)), Array2::zeros((3, 2))).is_none());
        let field = GradientField::from_parts(Array2::zeros((2, 3)), Array2::zeros((2, 3))).unwrap();
        assert_eq!(field.dim(), (2, 3));
    }
}
