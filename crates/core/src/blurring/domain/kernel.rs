use crate::shared::constants::BLUR_REGION_SIZE;
use crate::shared::picture::Snapshot;
use crate::shared::pixel::Pixel;

/// Averages the 3x3 neighborhood centred on `(x, y)` in the snapshot.
///
/// Each channel is the truncated integer mean of its nine samples. Callers
/// must pass interior coordinates; there is no edge handling.
pub fn pixel_blur(snapshot: &Snapshot, x: usize, y: usize) -> Pixel {
    let mut sum_red = 0u32;
    let mut sum_green = 0u32;
    let mut sum_blue = 0u32;

    for ny in y - 1..=y + 1 {
        for nx in x - 1..=x + 1 {
            let p = snapshot.get_pixel(nx, ny);
            sum_red += u32::from(p.red);
            sum_green += u32::from(p.green);
            sum_blue += u32::from(p.blue);
        }
    }

    // sum <= 9 * 255, so the mean always fits in u8
    Pixel::new(
        (sum_red / BLUR_REGION_SIZE) as u8,
        (sum_green / BLUR_REGION_SIZE) as u8,
        (sum_blue / BLUR_REGION_SIZE) as u8,
    )
}
