use std::path::Path;

use crate::io::domain::picture_writer::PictureWriter;
use crate::shared::picture::Picture;

/// Writes a picture using the `image` crate; the format follows the extension.
pub struct ImageFileWriter;

impl ImageFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PictureWriter for ImageFileWriter {
    fn write(&self, path: &Path, picture: &Picture) -> Result<(), Box<dyn std::error::Error>> {
        // Ensure parent directory exists (infrastructure concern)
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let width = u32::try_from(picture.width())?;
        let height = u32::try_from(picture.height())?;
        let img = image::RgbImage::from_raw(width, height, picture.to_rgb_bytes())
            .ok_or("Failed to create image from picture data")?;

        img.save(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::pixel::Pixel;

    #[test]
    fn test_write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let pic = Picture::filled(100, 80, Pixel::new(50, 100, 200)).unwrap();
        ImageFileWriter::new().write(&path, &pic).unwrap();
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_written_pixels_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let mut pic = Picture::filled(50, 40, Pixel::new(50, 100, 200)).unwrap();
        pic.set_pixel(49, 39, Pixel::new(7, 8, 9));
        ImageFileWriter::new().write(&path, &pic).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (50, 40));
        assert_eq!(img.get_pixel(0, 0).0, [50, 100, 200]);
        assert_eq!(img.get_pixel(49, 39).0, [7, 8, 9]);
    }

    #[test]
    fn test_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("out.bmp");
        let pic = Picture::new(3, 3).unwrap();
        ImageFileWriter::new().write(&path, &pic).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_unknown_extension_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.notanimage");
        let pic = Picture::new(3, 3).unwrap();
        assert!(ImageFileWriter::new().write(&path, &pic).is_err());
    }
}
