//! Per-frame filter dispatch.
//!
//! [`FrameProcessor::process`] is the "process one frame" entry point a
//! display-refresh callback drives: it takes the captured frame, the active
//! [`FilterMode`] and the current [`ProcessingOptions`], and returns the
//! frame to hand to the rasterizer. Nothing about the mode or options is
//! remembered between calls, so a mode switch applies to the very next frame.
//!
//! The processor only keeps scratch planes for reuse; they are keyed by
//! frame dimensions and dropped when the frame size changes.
//! [`process_frame`] is the same dispatch without any retained buffers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{PipelineError, PipelineResult};
use crate::filters::canny::canny_rgba_pooled;
use crate::filters::edge::sobel_rgba_pooled;
use crate::filters::grayscale::render_grayscale;
use crate::filters::kernel::SobelKernel;
use crate::pool::PlanePool;
use crate::raster::RgbaRaster;

/// Which stage sequence a frame runs through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Pass-through; the frame is returned untouched.
    #[default]
    Raw,
    /// BT.601 luma in R, G, B; alpha kept.
    Grayscale,
    /// Sobel gradient magnitude.
    Sobel,
    /// Canny edge map.
    Canny,
}

impl FilterMode {
    pub const ALL: [FilterMode; 4] = [
        FilterMode::Raw,
        FilterMode::Grayscale,
        FilterMode::Sobel,
        FilterMode::Canny,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterMode::Raw => "raw",
            FilterMode::Grayscale => "grayscale",
            FilterMode::Sobel => "sobel",
            FilterMode::Canny => "canny",
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterMode {
    type Err = PipelineError;

    fn from_str(s: &str) -> PipelineResult<Self> {
        FilterMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PipelineError::UnknownFilterMode(s.to_string()))
    }
}

/// Tunables for the edge filters.
///
/// The UI keeps `canny_low_threshold` in 0-200, `canny_high_threshold` in
/// 0-255 and `sobel_kernel_size` odd in 3-7, but any value is accepted:
/// thresholds are only compared against, and kernel sizes are normalized by
/// [`SobelKernel::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessingOptions {
    pub canny_low_threshold: f32,
    pub canny_high_threshold: f32,
    pub sobel_kernel_size: usize,
}

impl ProcessingOptions {
    pub const DEFAULT_CANNY_LOW: f32 = 50.0;
    pub const DEFAULT_CANNY_HIGH: f32 = 150.0;
    pub const DEFAULT_SOBEL_KERNEL_SIZE: usize = 3;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_canny_thresholds(mut self, low: f32, high: f32) -> Self {
        self.canny_low_threshold = low;
        self.canny_high_threshold = high;
        self
    }

    pub fn with_sobel_kernel_size(mut self, size: usize) -> Self {
        self.sobel_kernel_size = size;
        self
    }
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            canny_low_threshold: Self::DEFAULT_CANNY_LOW,
            canny_high_threshold: Self::DEFAULT_CANNY_HIGH,
            sobel_kernel_size: Self::DEFAULT_SOBEL_KERNEL_SIZE,
        }
    }
}

/// Runs frames through the selected filter, reusing scratch planes.
#[derive(Debug, Default)]
pub struct FrameProcessor {
    pool: PlanePool,
}

impl FrameProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one frame.
    ///
    /// `Raw` hands the input back without copying. Every other mode returns
    /// a newly allocated RGBA raster of the same dimensions.
    pub fn process(
        &mut self,
        frame: RgbaRaster,
        mode: FilterMode,
        options: &ProcessingOptions,
    ) -> RgbaRaster {
        let (width, height) = frame.dimensions();
        trace!(width, height, %mode, "process frame");

        let pixels = match mode {
            FilterMode::Raw => return frame,
            FilterMode::Grayscale => render_grayscale(frame.view()),
            FilterMode::Sobel => {
                let kernel = SobelKernel::new(options.sobel_kernel_size);
                sobel_rgba_pooled(frame.view(), &kernel, &mut self.pool)
            }
            FilterMode::Canny => canny_rgba_pooled(
                frame.view(),
                options.canny_low_threshold,
                options.canny_high_threshold,
                &mut self.pool,
            ),
        };

        RgbaRaster::from_filter_output(pixels)
    }

    /// Validate a flat RGBA buffer and process it.
    pub fn process_raw(
        &mut self,
        data: Vec<u8>,
        width: usize,
        height: usize,
        mode: FilterMode,
        options: &ProcessingOptions,
    ) -> PipelineResult<RgbaRaster> {
        let frame = RgbaRaster::from_raw(width, height, data)?;
        Ok(self.process(frame, mode, options))
    }

    /// Drop all retained scratch planes.
    pub fn clear(&mut self) {
        self.pool = PlanePool::new();
    }

    /// Scratch planes currently held for reuse.
    pub fn pooled_planes(&self) -> usize {
        self.pool.len()
    }
}

/// Process one frame without retaining any buffers.
pub fn process_frame(
    frame: RgbaRaster,
    mode: FilterMode,
    options: &ProcessingOptions,
) -> RgbaRaster {
    FrameProcessor::new().process(frame, mode, options)
}
