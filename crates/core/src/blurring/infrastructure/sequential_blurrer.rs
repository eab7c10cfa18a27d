use crate::blurring::domain::blur_strategy::{BlurError, BlurStrategy, StrategyKind};
use crate::blurring::domain::kernel::pixel_blur;
use crate::shared::picture::Picture;

/// Single-threaded baseline: one pass over the interior, no pool.
pub struct SequentialBlurrer;

impl SequentialBlurrer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SequentialBlurrer {
    fn default() -> Self {
        Self::new()
    }
}

impl BlurStrategy for SequentialBlurrer {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Sequential
    }

    fn blur(&self, picture: &mut Picture) -> Result<(), BlurError> {
        let snapshot = picture.snapshot();
        let (iw, ih) = picture.interior_dims();

        for y in 1..=ih {
            for x in 1..=iw {
                picture.set_pixel(x, y, pixel_blur(&snapshot, x, y));
            }
        }

        Ok(())
    }
}
