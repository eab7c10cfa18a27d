use ndarray::{s, Array2, ArrayView2, ArrayViewMut2};
use thiserror::Error;

use super::pixel::Pixel;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PictureError {
    #[error("picture dimensions must be at least 1x1, got {width}x{height}")]
    EmptyDimensions { width: usize, height: usize },
    #[error("pixel buffer holds {actual} values, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}

/// A mutable RGB picture addressed by `(x, y)`.
///
/// Pixels are stored row-major as an `(height, width)` ndarray so callers
/// can carve the buffer into disjoint mutable views.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Picture {
    pixels: Array2<Pixel>,
}

impl Picture {
    /// Creates a black picture of the given size.
    pub fn new(width: usize, height: usize) -> Result<Self, PictureError> {
        Self::filled(width, height, Pixel::default())
    }

    pub fn filled(width: usize, height: usize, pixel: Pixel) -> Result<Self, PictureError> {
        check_dimensions(width, height)?;
        Ok(Self {
            pixels: Array2::from_elem((height, width), pixel),
        })
    }

    /// Builds a picture from row-major pixels.
    pub fn from_pixels(
        width: usize,
        height: usize,
        pixels: Vec<Pixel>,
    ) -> Result<Self, PictureError> {
        check_dimensions(width, height)?;
        let expected = width * height;
        let actual = pixels.len();
        let pixels = Array2::from_shape_vec((height, width), pixels)
            .map_err(|_| PictureError::BufferSize { expected, actual })?;
        Ok(Self { pixels })
    }

    /// Wraps an existing `(height, width)` array.
    pub(crate) fn from_array(pixels: Array2<Pixel>) -> Self {
        debug_assert!(!pixels.is_empty(), "picture must have at least one pixel");
        Self { pixels }
    }

    /// Builds a picture from packed RGB8 bytes in row-major order.
    pub fn from_rgb_bytes(width: usize, height: usize, data: &[u8]) -> Result<Self, PictureError> {
        if data.len() != width * height * 3 {
            return Err(PictureError::BufferSize {
                expected: width * height * 3,
                actual: data.len(),
            });
        }
        let pixels = data
            .chunks_exact(3)
            .map(|c| Pixel::new(c[0], c[1], c[2]))
            .collect();
        Self::from_pixels(width, height, pixels)
    }

    /// Packs the picture into RGB8 bytes in row-major order.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.width() * self.height() * 3);
        for p in self.pixels.iter() {
            data.extend_from_slice(&[p.red, p.green, p.blue]);
        }
        data
    }

    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    /// Panics if `(x, y)` lies outside the picture.
    pub fn get_pixel(&self, x: usize, y: usize) -> Pixel {
        self.check_bounds(x, y);
        self.pixels[[y, x]]
    }

    /// Panics if `(x, y)` lies outside the picture.
    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: Pixel) {
        self.check_bounds(x, y);
        self.pixels[[y, x]] = pixel;
    }

    /// Deep copy used as the read-only source of one blur invocation.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot(self.clone())
    }

    /// Width and height of the interior (the picture minus its outer ring).
    pub fn interior_dims(&self) -> (usize, usize) {
        (
            self.width().saturating_sub(2),
            self.height().saturating_sub(2),
        )
    }

    /// Mutable view over the interior, or `None` when it is empty.
    ///
    /// Element `[[j, i]]` of the view is pixel `(i + 1, j + 1)`.
    pub fn interior_mut(&mut self) -> Option<ArrayViewMut2<'_, Pixel>> {
        let (iw, ih) = self.interior_dims();
        if iw == 0 || ih == 0 {
            return None;
        }
        Some(self.pixels.slice_mut(s![1..=ih, 1..=iw]))
    }

    pub fn as_ndarray(&self) -> ArrayView2<'_, Pixel> {
        self.pixels.view()
    }

    pub fn as_ndarray_mut(&mut self) -> ArrayViewMut2<'_, Pixel> {
        self.pixels.view_mut()
    }

    fn check_bounds(&self, x: usize, y: usize) {
        assert!(
            x < self.width() && y < self.height(),
            "pixel ({x}, {y}) is outside the {}x{} picture",
            self.width(),
            self.height()
        );
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<(), PictureError> {
    if width == 0 || height == 0 {
        return Err(PictureError::EmptyDimensions { width, height });
    }
    Ok(())
}

/// Immutable point-in-time copy of a [`Picture`].
///
/// Exposes reads only, so every worker can share it without synchronization.
#[derive(Clone, Debug)]
pub struct Snapshot(Picture);

impl Snapshot {
    pub fn width(&self) -> usize {
        self.0.width()
    }

    pub fn height(&self) -> usize {
        self.0.height()
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Pixel {
        self.0.get_pixel(x, y)
    }

    pub fn as_picture(&self) -> &Picture {
        &self.0
    }
}
