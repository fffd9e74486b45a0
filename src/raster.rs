//! RGBA frame container.
//!
//! A [`RgbaRaster`] is the only shape that enters or leaves the pipeline:
//! `(height, width, 4)` interleaved `u8`, row-major. Every constructor
//! validates the shape, so the filter stages never have to.

use ndarray::{Array3, ArrayView3};

use crate::error::{PipelineError, PipelineResult};

/// Channels per pixel (R, G, B, A).
pub const RGBA_CHANNELS: usize = 4;

/// Validated RGBA frame with immutable dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaRaster {
    pixels: Array3<u8>,
}

impl RgbaRaster {
    /// Wrap a flat RGBA byte buffer (length = width * height * 4).
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> PipelineResult<Self> {
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(PipelineError::BufferLength {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }

        let pixels = Array3::from_shape_vec((height, width, RGBA_CHANNELS), data).map_err(|_| {
            PipelineError::InvalidDimensions { width, height }
        })?;
        Ok(Self { pixels })
    }

    /// Wrap an existing `(height, width, 4)` array.
    ///
    /// Arrays in a non-standard memory order are copied into row-major order.
    pub fn from_array(pixels: Array3<u8>) -> PipelineResult<Self> {
        let (height, width, channels) = pixels.dim();
        if channels != RGBA_CHANNELS {
            return Err(PipelineError::ChannelCount(channels));
        }
        byte_len(width, height)?;

        let pixels = if pixels.is_standard_layout() {
            pixels
        } else {
            pixels.as_standard_layout().into_owned()
        };
        Ok(Self { pixels })
    }

    /// Wrap the `(height, width, 4)` output of a filter stage.
    ///
    /// Filter outputs always mirror the shape of a validated input raster.
    pub(crate) fn from_filter_output(pixels: Array3<u8>) -> Self {
        debug_assert_eq!(pixels.dim().2, RGBA_CHANNELS);
        debug_assert!(pixels.is_standard_layout());
        Self { pixels }
    }

    /// Fill a new raster with a single RGBA color.
    pub fn filled(width: usize, height: usize, rgba: [u8; 4]) -> PipelineResult<Self> {
        byte_len(width, height)?;
        let pixels = Array3::from_shape_fn((height, width, RGBA_CHANNELS), |(_, _, c)| rgba[c]);
        Ok(Self { pixels })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    /// `(width, height)`
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.pixels.view()
    }

    pub fn pixels(&self) -> &Array3<u8> {
        &self.pixels
    }

    /// RGBA value at `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        [
            self.pixels[[y, x, 0]],
            self.pixels[[y, x, 1]],
            self.pixels[[y, x, 2]],
            self.pixels[[y, x, 3]],
        ]
    }

    /// Reallocate to new dimensions; the new buffer is zeroed.
    pub fn resize(&mut self, width: usize, height: usize) -> PipelineResult<()> {
        byte_len(width, height)?;
        self.pixels = Array3::zeros((height, width, RGBA_CHANNELS));
        Ok(())
    }

    pub fn into_array(self) -> Array3<u8> {
        self.pixels
    }

    /// Flat row-major RGBA bytes, ready for texture upload.
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels.into_raw_vec_and_offset().0
    }
}

/// Byte length of a `width x height` RGBA buffer, rejecting empty or overflowing shapes.
fn byte_len(width: usize, height: usize) -> PipelineResult<usize> {
    if width == 0 || height == 0 {
        return Err(PipelineError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(RGBA_CHANNELS))
        .ok_or(PipelineError::InvalidDimensions { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::ShapeBuilder;

    #[test]
    fn test_from_raw_roundtrips_bytes() {
        let data: Vec<u8> = (0..2 * 3 * 4).map(|v| v as u8).collect();
        let raster = RgbaRaster::from_raw(2, 3, data.clone()).unwrap();

        assert_eq!(raster.dimensions(), (2, 3));
        assert_eq!(raster.pixel(1, 0), [4, 5, 6, 7]);
        assert_eq!(raster.pixel(0, 2), [16, 17, 18, 19]);
        assert_eq!(raster.into_raw(), data);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            RgbaRaster::from_raw(0, 4, Vec::new()),
            Err(PipelineError::InvalidDimensions { width: 0, height: 4 })
        );
        assert!(RgbaRaster::filled(3, 0, [0; 4]).is_err());
    }

    #[test]
    fn test_buffer_length_mismatch() {
        let err = RgbaRaster::from_raw(2, 2, vec![0; 15]).unwrap_err();
        assert_eq!(
            err,
            PipelineError::BufferLength { width: 2, height: 2, expected: 16, actual: 15 }
        );
    }

    #[test]
    fn test_overflowing_dimensions_rejected() {
        let err = RgbaRaster::from_raw(usize::MAX, 2, Vec::new()).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidDimensions { .. }));
    }

    #[test]
    fn test_from_array_requires_four_channels() {
        let rgb = Array3::<u8>::zeros((2, 2, 3));
        assert_eq!(RgbaRaster::from_array(rgb), Err(PipelineError::ChannelCount(3)));
    }

    #[test]
    fn test_from_array_normalizes_layout() {
        let mut arr = Array3::<u8>::zeros((2, 3, 4).f());
        arr[[0, 2, 0]] = 9;
        assert!(!arr.is_standard_layout());

        let raster = RgbaRaster::from_array(arr).unwrap();
        assert_eq!(raster.pixel(2, 0), [9, 0, 0, 0]);
        assert_eq!(raster.into_raw().len(), 2 * 3 * 4);
    }

    #[test]
    fn test_resize_reallocates_zeroed() {
        let mut raster = RgbaRaster::filled(4, 4, [10, 20, 30, 255]).unwrap();
        raster.resize(8, 6).unwrap();

        assert_eq!(raster.dimensions(), (8, 6));
        assert!(raster.pixels().iter().all(|&v| v == 0));
        assert!(raster.resize(0, 1).is_err());
        assert_eq!(raster.dimensions(), (8, 6));
    }
}
