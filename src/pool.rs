//! Scratch planes recycled between frames of the same size.
//!
//! The Canny path needs up to four `f32` planes per frame. A [`PlanePool`]
//! keeps the ones a frame has finished with so the next frame of the same
//! dimensions can reuse them. When the frame size changes every pooled plane
//! is dropped; a plane of the wrong size is never handed out.
//!
//! Stages that write into a pooled plane overwrite every element, so reuse
//! never carries data from one frame into the next.

use ndarray::Array2;
use tracing::debug;

/// Upper bound on retained planes; the Canny path holds at most four at once.
const MAX_POOLED_PLANES: usize = 8;

#[derive(Debug, Default)]
pub struct PlanePool {
    /// `(height, width)` of the pooled planes.
    shape: Option<(usize, usize)>,
    free: Vec<Array2<f32>>,
}

impl PlanePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out a `(height, width)` plane. Contents are unspecified.
    pub fn take(&mut self, height: usize, width: usize) -> Array2<f32> {
        self.set_shape(height, width);
        self.free
            .pop()
            .unwrap_or_else(|| Array2::zeros((height, width)))
    }

    /// Return a plane for reuse. Planes of a stale size are dropped.
    pub fn give(&mut self, plane: Array2<f32>) {
        if Some(plane.dim()) == self.shape && self.free.len() < MAX_POOLED_PLANES {
            self.free.push(plane);
        }
    }

    /// Number of planes ready for reuse.
    pub fn len(&self) -> usize {
        self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    /// Dimensions the pool is currently keyed by, as `(height, width)`.
    pub fn shape(&self) -> Option<(usize, usize)> {
        self.shape
    }

    fn set_shape(&mut self, height: usize, width: usize) {
        if self.shape == Some((height, width)) {
            return;
        }
        if let Some((old_height, old_width)) = self.shape {
            debug!(
                old_width,
                old_height,
                width,
                height,
                dropped = self.free.len(),
                "frame dimensions changed, dropping pooled planes"
            );
        }
        self.free.clear();
        self.shape = Some((height, width));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reuses_same_size_plane() {
        let mut pool = PlanePool::new();
        let mut plane = pool.take(3, 4);
        plane[[1, 1]] = 7.0;
        let ptr = plane.as_ptr();
        pool.give(plane);
        assert_eq!(pool.len(), 1);

        let again = pool.take(3, 4);
        assert_eq!(again.as_ptr(), ptr);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_dimension_change_drops_planes() {
        let mut pool = PlanePool::new();
        let a = pool.take(4, 4);
        let b = pool.take(4, 4);
        pool.give(a);
        pool.give(b);
        assert_eq!(pool.len(), 2);

        let fresh = pool.take(6, 8);
        assert_eq!(fresh.dim(), (6, 8));
        assert!(pool.is_empty());
        assert_eq!(pool.shape(), Some((6, 8)));
    }

    #[test]
    fn test_stale_plane_not_retained() {
        let mut pool = PlanePool::new();
        let _ = pool.take(6, 8);
        pool.give(Array2::zeros((4, 4)));
        assert!(pool.is_empty());
    }

    #[test]
    fn test_pool_is_bounded() {
        let mut pool = PlanePool::new();
        let _ = pool.take(2, 2);
        for _ in 0..MAX_POOLED_PLANES + 3 {
            pool.give(Array2::zeros((2, 2)));
        }
        assert_eq!(pool.len(), MAX_POOLED_PLANES);
    }
}
