//! Sobel kernel taps for 3x3, 5x5 and 7x7 apertures.
//!
//! A Sobel kernel is separable: `Gx = smooth ⊗ derivative` and
//! `Gy = derivative ⊗ smooth`, where `smooth` is the binomial row of the
//! aperture size and `derivative` is the binomial row two taps shorter
//! convolved with `[-1, 0, 1]`:
//!
//! | Size | Smooth | Derivative |
//! |------|--------|------------|
//! | 3 | `1 2 1` | `-1 0 1` |
//! | 5 | `1 4 6 4 1` | `-1 -2 0 2 1` |
//! | 7 | `1 6 15 20 15 6 1` | `-1 -4 -5 0 5 4 1` |
//!
//! Canny always uses the 3x3 operator. The larger apertures produce
//! proportionally larger magnitudes.

use ndarray::Array2;
use tracing::warn;

pub const MIN_KERNEL_SIZE: usize = 3;
pub const MAX_KERNEL_SIZE: usize = 7;

/// Separable Sobel kernel of odd size 3, 5 or 7.
#[derive(Debug, Clone, PartialEq)]
pub struct SobelKernel {
    size: usize,
    smooth: Vec<f32>,
    /// Positive half of the antisymmetric derivative row: taps at offsets 1..=radius.
    derivative: Vec<f32>,
}

impl SobelKernel {
    /// Build a kernel for `size`.
    ///
    /// Sizes outside 3..=7 are clamped and even sizes are rounded up to the
    /// next odd size; a warning is logged when that happens.
    pub fn new(size: usize) -> Self {
        let used = normalize_size(size);
        if used != size {
            warn!(requested = size, used, "sobel kernel size normalized");
        }

        let smooth = binomial_row(used);
        let derivative = derivative_row(used)[used / 2 + 1..].to_vec();
        Self { size: used, smooth, derivative }
    }

    /// The 3x3 Sobel operator.
    pub fn sobel_3x3() -> Self {
        Self::new(3)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    /// Binomial smoothing taps (length `size`).
    pub fn smooth(&self) -> &[f32] {
        &self.smooth
    }

    /// Derivative taps at offsets `1..=radius`; the tap at `-k` is the negation.
    pub fn derivative_half(&self) -> &[f32] {
        &self.derivative
    }

    /// Full derivative row, `-radius..=radius`.
    pub fn derivative(&self) -> Vec<f32> {
        let mut row: Vec<f32> = self.derivative.iter().rev().map(|d| -d).collect();
        row.push(0.0);
        row.extend_from_slice(&self.derivative);
        row
    }

    /// Dense horizontal-derivative matrix, `gx[[row, col]]`.
    pub fn gx(&self) -> Array2<f32> {
        let d = self.derivative();
        Array2::from_shape_fn((self.size, self.size), |(r, c)| self.smooth[r] * d[c])
    }

    /// Dense vertical-derivative matrix, `gy[[row, col]]`.
    pub fn gy(&self) -> Array2<f32> {
        let d = self.derivative();
        Array2::from_shape_fn((self.size, self.size), |(r, c)| d[r] * self.smooth[c])
    }
}

impl Default for SobelKernel {
    fn default() -> Self {
        Self::sobel_3x3()
    }
}

fn normalize_size(size: usize) -> usize {
    size.clamp(MIN_KERNEL_SIZE, MAX_KERNEL_SIZE) | 1
}

/// Row `n - 1` of Pascal's triangle (`n` taps).
fn binomial_row(n: usize) -> Vec<f32> {
    let mut row = vec![1.0f32];
    for _ in 1..n {
        let mut next = vec![1.0f32; row.len() + 1];
        for i in 1..row.len() {
            next[i] = row[i - 1] + row[i];
        }
        row = next;
    }
    row
}

/// Binomial row of `size - 2` taps convolved with `[-1, 0, 1]`.
fn derivative_row(size: usize) -> Vec<f32> {
    let base = binomial_row(size - 2);
    (0..size)
        .map(|i| {
            let right = if i >= 2 { base.get(i - 2).copied().unwrap_or(0.0) } else { 0.0 };
            let left = base.get(i).copied().unwrap_or(0.0);
            right - left
        })
        .collect()
}
