//! Double-threshold edge classification.
//!
//! Each suppressed magnitude is classified on its own:
//!
//! - `value >= high` → strong edge, white
//! - `low <= value < high` → weak edge, dark gray
//! - otherwise → background, black
//!
//! Weak pixels are emitted as they are; they are neither promoted by strong
//! neighbours nor discarded when isolated. Thresholds are used only in
//! comparisons, so any value is accepted: with `low >= high` no pixel can be
//! weak, and a NaN threshold never matches.

use ndarray::{Array3, ArrayView2};

use super::render_rgba;

/// Gray level of a strong edge pixel.
pub const STRONG_EDGE: u8 = 255;
/// Gray level of a weak edge pixel.
pub const WEAK_EDGE: u8 = 75;
/// Gray level of a background pixel.
pub const BACKGROUND: u8 = 0;

/// Class of one suppressed-magnitude pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeClass {
    Background,
    Weak,
    Strong,
}

impl EdgeClass {
    #[inline]
    pub fn classify(value: f32, low: f32, high: f32) -> Self {
        if value >= high {
            EdgeClass::Strong
        } else if value >= low {
            EdgeClass::Weak
        } else {
            EdgeClass::Background
        }
    }

    /// Gray level rendered for this class.
    #[inline]
    pub fn level(self) -> u8 {
        match self {
            EdgeClass::Background => BACKGROUND,
            EdgeClass::Weak => WEAK_EDGE,
            EdgeClass::Strong => STRONG_EDGE,
        }
    }
}

/// Render suppressed magnitudes as an opaque RGBA edge map.
///
/// # Arguments
/// * `suppressed` - `(height, width)` plane from non-maximum suppression
/// * `low` - weak-edge threshold
/// * `high` - strong-edge threshold
///
/// # Returns
/// `(height, width, 4)` RGBA image, R=G=B=class level, A=255
pub fn classify_edges(suppressed: ArrayView2<f32>, low: f32, high: f32) -> Array3<u8> {
    let (height, width) = suppressed.dim();
    render_rgba(height, width, |(y, x)| {
        let level = EdgeClass::classify(suppressed[[y, x]], low, high).level();
        [level, level, level, 255]
    })
}
