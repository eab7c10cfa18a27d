use std::path::Path;

use crate::shared::picture::Picture;

/// Writes a picture to an image file.
pub trait PictureWriter: Send {
    fn write(&self, path: &Path, picture: &Picture) -> Result<(), Box<dyn std::error::Error>>;
}
