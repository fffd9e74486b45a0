//! Non-maximum suppression of gradient magnitude.
//!
//! Thins gradient ridges to one pixel by keeping a magnitude only when it is
//! at least as large as both neighbours along the quantized gradient
//! direction. The direction is folded into `[0, 180)` degrees and split into
//! four bins:
//!
//! | Degrees | Bin | Compared neighbours |
//! |---------|-----|---------------------|
//! | `[0, 22.5)` and `[157.5, 180)` | horizontal | west, east |
//! | `[22.5, 67.5)` | rising diagonal | north-east, south-west |
//! | `[67.5, 112.5)` | vertical | north, south |
//! | `[112.5, 157.5)` | falling diagonal | north-west, south-east |
//!
//! North is `y - 1`.
//!
//! ## Non-square frames
//!
//! x is bounded by `width - 1` and y by `height - 1` independently. A single
//! side length taken from `sqrt(len)` would only be correct for square
//! frames; non-square frames here get the same one-pixel border on every
//! side.

use ndarray::{Array2, ArrayView2};

use super::gradient::GradientField;
use super::{fill_plane, is_inside, reshape_plane};

/// Orientation bin of a gradient direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    RisingDiagonal,
    Vertical,
    FallingDiagonal,
}

impl Orientation {
    /// Bin a direction given in radians.
    pub fn from_radians(direction: f32) -> Self {
        let degrees = direction.to_degrees();
        let normalized = ((degrees % 180.0) + 180.0) % 180.0;

        if normalized < 22.5 || normalized >= 157.5 {
            Orientation::Horizontal
        } else if normalized < 67.5 {
            Orientation::RisingDiagonal
        } else if normalized < 112.5 {
            Orientation::Vertical
        } else {
            Orientation::FallingDiagonal
        }
    }

    /// The two `(dy, dx)` neighbour offsets compared for this bin.
    #[inline]
    pub fn neighbor_offsets(self) -> [(isize, isize); 2] {
        match self {
            Orientation::Horizontal => [(0, -1), (0, 1)],
            Orientation::RisingDiagonal => [(-1, 1), (1, -1)],
            Orientation::Vertical => [(-1, 0), (1, 0)],
            Orientation::FallingDiagonal => [(-1, -1), (1, 1)],
        }
    }
}

#[inline]
fn neighbor(magnitude: &ArrayView2<f32>, y: usize, x: usize, (dy, dx): (isize, isize)) -> f32 {
    magnitude[[y.wrapping_add_signed(dy), x.wrapping_add_signed(dx)]]
}

/// Thin a gradient field to its ridge pixels.
///
/// # Returns
/// Plane of suppressed magnitudes; the outer one-pixel frame is zero.
pub fn non_maximum_suppression(field: &GradientField) -> Array2<f32> {
    let mut out = Array2::<f32>::zeros(field.dim());
    non_maximum_suppression_into(field, &mut out);
    out
}

pub(crate) fn non_maximum_suppression_into(field: &GradientField, out: &mut Array2<f32>) {
    let (height, width) = field.dim();
    reshape_plane(out, height, width);

    let magnitude = field.magnitude().view();
    let direction = field.direction().view();

    fill_plane(out, |(y, x)| {
        if !is_inside(y, x, height, width, 1) {
            return 0.0;
        }

        let m = magnitude[[y, x]];
        let [a, b] = Orientation::from_radians(direction[[y, x]]).neighbor_offsets();
        if m >= neighbor(&magnitude, y, x, a) && m >= neighbor(&magnitude, y, x, b) {
            m
        } else {
            0.0
        }
    });
}
