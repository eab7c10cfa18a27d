use std::path::Path;

use crate::io::domain::picture_reader::PictureReader;
use crate::shared::picture::Picture;

/// Decodes any format the `image` crate understands into an RGB picture.
///
/// Alpha and higher bit depths are dropped by converting to RGB8.
pub struct ImageFileReader;

impl ImageFileReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileReader {
    fn default() -> Self {
        Self::new()
    }
}

impl PictureReader for ImageFileReader {
    fn read(&self, path: &Path) -> Result<Picture, Box<dyn std::error::Error>> {
        let img = image::open(path)?.to_rgb8();
        let (width, height) = img.dimensions();
        log::debug!("Decoded {} ({width}x{height})", path.display());
        let picture = Picture::from_rgb_bytes(width as usize, height as usize, img.as_raw())?;
        Ok(picture)
    }
}
