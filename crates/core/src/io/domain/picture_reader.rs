use std::path::Path;

use crate::shared::picture::Picture;

/// Loads a picture from an image container.
///
/// Implementations own the codec; the core only ever sees a decoded
/// [`Picture`].
pub trait PictureReader: Send {
    fn read(&self, path: &Path) -> Result<Picture, Box<dyn std::error::Error>>;
}
