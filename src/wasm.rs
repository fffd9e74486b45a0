//! WebAssembly exports for the frame filters.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Frames cross
//! the boundary as flat RGBA bytes (length = width * height * 4), the layout
//! of `ImageData.data`, and come back the same way.
//!
//! Invalid dimensions, short buffers and unknown mode names are reported as
//! JavaScript exceptions.

use wasm_bindgen::prelude::*;

use crate::filters::kernel::SobelKernel;
use crate::filters::{canny, edge, grayscale};
use crate::pipeline::{FilterMode, FrameProcessor, ProcessingOptions};
use crate::raster::RgbaRaster;

// ============================================================================
// Frame Dispatch
// ============================================================================

/// Run one RGBA frame through a filter mode.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `mode` - "raw", "grayscale", "sobel" or "canny"
///
/// # Returns
/// Flat array of RGBA bytes with the same dimensions
#[wasm_bindgen]
pub fn process_frame_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    mode: &str,
    canny_low: f32,
    canny_high: f32,
    sobel_kernel_size: usize,
) -> Result<Vec<u8>, JsError> {
    let mode: FilterMode = mode.parse()?;
    let options = ProcessingOptions::default()
        .with_canny_thresholds(canny_low, canny_high)
        .with_sobel_kernel_size(sobel_kernel_size);

    let frame = RgbaRaster::from_raw(width, height, data.to_vec())?;
    Ok(crate::pipeline::process_frame(frame, mode, &options).into_raw())
}

/// Frame processor that keeps its scratch planes between calls.
///
/// Meant to live as long as the video element it serves; one `process` call
/// per animation frame.
#[wasm_bindgen]
pub struct WasmFrameProcessor {
    inner: FrameProcessor,
}

#[wasm_bindgen]
impl WasmFrameProcessor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { inner: FrameProcessor::new() }
    }

    /// Same contract as `process_frame_wasm`.
    pub fn process(
        &mut self,
        data: Vec<u8>,
        width: usize,
        height: usize,
        mode: &str,
        canny_low: f32,
        canny_high: f32,
        sobel_kernel_size: usize,
    ) -> Result<Vec<u8>, JsError> {
        let mode: FilterMode = mode.parse()?;
        let options = ProcessingOptions::default()
            .with_canny_thresholds(canny_low, canny_high)
            .with_sobel_kernel_size(sobel_kernel_size);

        let result = self.inner.process_raw(data, width, height, mode, &options)?;
        Ok(result.into_raw())
    }

    /// Release retained scratch memory.
    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

impl Default for WasmFrameProcessor {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Individual Filters
// ============================================================================

/// Convert RGBA image to grayscale using BT.601 luma, alpha preserved.
#[wasm_bindgen]
pub fn grayscale_rgba_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    let frame = RgbaRaster::from_raw(width, height, data.to_vec())?;
    let result = grayscale::grayscale_rgba(frame.view())?;
    Ok(result.into_raw_vec_and_offset().0)
}

/// Sobel gradient magnitude as opaque grayscale RGBA.
///
/// # Arguments
/// * `kernel_size` - 3, 5 or 7; other values are normalized
#[wasm_bindgen]
pub fn sobel_rgba_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    kernel_size: usize,
) -> Result<Vec<u8>, JsError> {
    let frame = RgbaRaster::from_raw(width, height, data.to_vec())?;
    let result = edge::sobel_rgba(frame.view(), &SobelKernel::new(kernel_size))?;
    Ok(result.into_raw_vec_and_offset().0)
}

/// Canny edge map: 255 strong, 75 weak, 0 background, alpha 255.
#[wasm_bindgen]
pub fn canny_rgba_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    low: f32,
    high: f32,
) -> Result<Vec<u8>, JsError> {
    let frame = RgbaRaster::from_raw(width, height, data.to_vec())?;
    let result = canny::canny_rgba(frame.view(), low, high)?;
    Ok(result.into_raw_vec_and_offset().0)
}
