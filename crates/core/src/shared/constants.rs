/// Number of samples in the 3x3 blur neighborhood.
pub const BLUR_REGION_SIZE: u32 = 9;

/// Pool ceiling for the row and column strategies in their capped variant.
pub const MAX_RUNNING_THREAD_SIZE: usize = 12;

/// Fixed pool size for the sector strategy.
pub const SECTOR_POOL_SIZE: usize = 8;

/// Default pool capacity for the per-pixel strategy.
pub const PIXEL_POOL_SIZE: usize = 100;

pub const MAX_PIXEL_INTENSITY: u8 = 255;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];

/// Process exit status reserved for I/O and configuration failures.
pub const IO_ERROR_EXIT_CODE: i32 = 2;
