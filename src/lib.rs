//! edgestag
//!
//! Real-time frame filters for live video: grayscale, Sobel gradient
//! magnitude and Canny edges, with Python bindings via PyO3 and WASM
//! bindings for browsers.
//!
//! ## Frame Format
//! Frames are RGBA `u8`, shape `(height, width, 4)`, row-major. Every
//! filter returns a frame of the same dimensions, ready for texture upload.
//!
//! ## Processing Model
//! One frame is processed to completion per call. The caller's display loop
//! decides when to call; this crate never schedules or queues frames.
//! A [`FrameProcessor`] may be kept across frames to reuse scratch memory,
//! but it never carries image data or settings from one frame to the next.
//!
//! ```
//! use edgestag::{FilterMode, FrameProcessor, ProcessingOptions, RgbaRaster};
//!
//! let frame = RgbaRaster::filled(16, 9, [128, 128, 128, 255])?;
//! let mut processor = FrameProcessor::new();
//! let edges = processor.process(frame, FilterMode::Canny, &ProcessingOptions::default());
//! assert_eq!(edges.dimensions(), (16, 9));
//! # Ok::<(), edgestag::PipelineError>(())
//! ```

pub mod error;
pub mod filters;
pub mod pipeline;
pub mod pool;
pub mod raster;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{PipelineError, PipelineResult};
pub use pipeline::{process_frame, FilterMode, FrameProcessor, ProcessingOptions};
pub use raster::RgbaRaster;

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray2, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::error::PipelineError;
    use crate::filters::{canny, edge, grayscale, kernel::SobelKernel};
    use crate::pipeline::{FilterMode, ProcessingOptions};
    use crate::raster::RgbaRaster;

    impl From<PipelineError> for PyErr {
        fn from(err: PipelineError) -> PyErr {
            PyValueError::new_err(err.to_string())
        }
    }

    // ========================================================================
    // Frame Dispatch
    // ========================================================================

    /// Run one RGBA frame through a filter mode.
    ///
    /// # Arguments
    /// * `image` - RGBA image (height, width, 4) as uint8
    /// * `mode` - "raw", "grayscale", "sobel" or "canny"
    #[pyfunction]
    #[pyo3(signature = (image, mode="raw", canny_low=50.0, canny_high=150.0, sobel_kernel_size=3))]
    pub fn process_frame<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        mode: &str,
        canny_low: f32,
        canny_high: f32,
        sobel_kernel_size: usize,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let mode: FilterMode = mode.parse()?;
        let options = ProcessingOptions::default()
            .with_canny_thresholds(canny_low, canny_high)
            .with_sobel_kernel_size(sobel_kernel_size);

        let frame = RgbaRaster::from_array(image.as_array().to_owned())?;
        let result = crate::pipeline::process_frame(frame, mode, &options);
        Ok(result.into_array().into_pyarray(py))
    }

    // ========================================================================
    // Individual Filters
    // ========================================================================

    /// Grayscale (BT.601) with alpha preserved.
    ///
    /// # Arguments
    /// * `image` - Image (height, width, 1-4 channels) as uint8
    #[pyfunction]
    pub fn grayscale_rgba<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let result = grayscale::grayscale_rgba(image.as_array())?;
        Ok(result.into_pyarray(py))
    }

    /// Luma plane (height, width) as float32 in 0-255.
    #[pyfunction]
    pub fn luma<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray2<f32>>> {
        let result = grayscale::luma_plane(image.as_array())?;
        Ok(result.into_pyarray(py))
    }

    /// Sobel gradient magnitude as opaque grayscale RGBA.
    #[pyfunction]
    #[pyo3(signature = (image, kernel_size=3))]
    pub fn sobel_rgba<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        kernel_size: usize,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let result = edge::sobel_rgba(image.as_array(), &SobelKernel::new(kernel_size))?;
        Ok(result.into_pyarray(py))
    }

    /// Canny edge map: 255 strong, 75 weak, 0 background.
    #[pyfunction]
    #[pyo3(signature = (image, low=50.0, high=150.0))]
    pub fn canny_rgba<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        low: f32,
        high: f32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let result = canny::canny_rgba(image.as_array(), low, high)?;
        Ok(result.into_pyarray(py))
    }

    #[pymodule]
    pub fn edgestag(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(process_frame, m)?)?;
        m.add_function(wrap_pyfunction!(grayscale_rgba, m)?)?;
        m.add_function(wrap_pyfunction!(luma, m)?)?;
        m.add_function(wrap_pyfunction!(sobel_rgba, m)?)?;
        m.add_function(wrap_pyfunction!(canny_rgba, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::edgestag;
