use ndarray::{Axis, ArrayViewMut1, ArrayViewMut2};

use super::kernel::pixel_blur;
use crate::shared::picture::{Picture, Snapshot};
use crate::shared::pixel::Pixel;

/// How the interior of a picture is carved into work units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PartitionKind {
    Row,
    Column,
    Sector,
    Pixel,
}

impl PartitionKind {
    pub const ALL: [PartitionKind; 4] = [
        PartitionKind::Row,
        PartitionKind::Column,
        PartitionKind::Sector,
        PartitionKind::Pixel,
    ];

    /// Number of units [`partition`] yields for a picture of this size.
    pub fn unit_count(self, width: usize, height: usize) -> usize {
        let iw = width.saturating_sub(2);
        let ih = height.saturating_sub(2);
        if iw == 0 || ih == 0 {
            return 0;
        }
        match self {
            PartitionKind::Row => ih,
            PartitionKind::Column => iw,
            PartitionKind::Sector => {
                let (tw, th) = sector_extents(width, height);
                iw.div_ceil(tw) * ih.div_ceil(th)
            }
            PartitionKind::Pixel => iw * ih,
        }
    }
}

/// Tile `(width, height)` for the sector grid.
///
/// Landscape pictures get a 4x2 grid, portrait ones 2x4. Extents come from
/// the full picture size, so the last tile in each direction is clipped at
/// the interior edge.
pub fn sector_extents(width: usize, height: usize) -> (usize, usize) {
    if width >= height {
        ((width / 4).max(1), (height / 2).max(1))
    } else {
        ((width / 2).max(1), (height / 4).max(1))
    }
}

/// One disjoint piece of the interior, owning a mutable view of its pixels.
///
/// The view is the unit's entire write set; reads go to the snapshot.
#[derive(Debug)]
pub enum WorkUnit<'a> {
    Row {
        y: usize,
        pixels: ArrayViewMut1<'a, Pixel>,
    },
    Column {
        x: usize,
        pixels: ArrayViewMut1<'a, Pixel>,
    },
    Sector {
        x0: usize,
        y0: usize,
        pixels: ArrayViewMut2<'a, Pixel>,
    },
    Pixel {
        x: usize,
        y: usize,
        target: &'a mut Pixel,
    },
}

impl WorkUnit<'_> {
    pub fn kind(&self) -> PartitionKind {
        match self {
            WorkUnit::Row { .. } => PartitionKind::Row,
            WorkUnit::Column { .. } => PartitionKind::Column,
            WorkUnit::Sector { .. } => PartitionKind::Sector,
            WorkUnit::Pixel { .. } => PartitionKind::Pixel,
        }
    }

    /// Top-left picture coordinate of the unit.
    pub fn origin(&self) -> (usize, usize) {
        match self {
            WorkUnit::Row { y, .. } => (1, *y),
            WorkUnit::Column { x, .. } => (*x, 1),
            WorkUnit::Sector { x0, y0, .. } => (*x0, *y0),
            WorkUnit::Pixel { x, y, .. } => (*x, *y),
        }
    }

    /// `(width, height)` of the unit's region.
    pub fn extent(&self) -> (usize, usize) {
        match self {
            WorkUnit::Row { pixels, .. } => (pixels.len(), 1),
            WorkUnit::Column { pixels, .. } => (1, pixels.len()),
            WorkUnit::Sector { pixels, .. } => (pixels.ncols(), pixels.nrows()),
            WorkUnit::Pixel { .. } => (1, 1),
        }
    }

    /// Every picture coordinate this unit writes.
    pub fn coordinates(&self) -> Vec<(usize, usize)> {
        let (x0, y0) = self.origin();
        let (w, h) = self.extent();
        (y0..y0 + h)
            .flat_map(|y| (x0..x0 + w).map(move |x| (x, y)))
            .collect()
    }

    /// Blurs every pixel the unit owns from `snapshot`.
    pub fn run(self, snapshot: &Snapshot) {
        match self {
            WorkUnit::Row { y, mut pixels } => {
                for (i, p) in pixels.iter_mut().enumerate() {
                    *p = pixel_blur(snapshot, i + 1, y);
                }
            }
            WorkUnit::Column { x, mut pixels } => {
                for (j, p) in pixels.iter_mut().enumerate() {
                    *p = pixel_blur(snapshot, x, j + 1);
                }
            }
            WorkUnit::Sector { x0, y0, mut pixels } => {
                for ((j, i), p) in pixels.indexed_iter_mut() {
                    *p = pixel_blur(snapshot, x0 + i, y0 + j);
                }
            }
            WorkUnit::Pixel { x, y, target } => {
                *target = pixel_blur(snapshot, x, y);
            }
        }
    }
}

/// Splits the interior of `picture` into disjoint work units.
///
/// Each unit borrows its own slice of the picture, so the units together
/// hold exclusive access to exactly the interior and the border stays
/// untouched. Yields nothing when the interior is empty.
pub fn partition(
    kind: PartitionKind,
    picture: &mut Picture,
) -> Box<dyn Iterator<Item = WorkUnit<'_>> + '_> {
    let (tile_w, tile_h) = sector_extents(picture.width(), picture.height());
    let Some(interior) = picture.interior_mut() else {
        return Box::new(std::iter::empty());
    };

    match kind {
        PartitionKind::Row => Box::new(SplitAlong::new(interior, Axis(0), 1).enumerate().map(
            |(j, band)| WorkUnit::Row {
                y: j + 1,
                pixels: band.index_axis_move(Axis(0), 0),
            },
        )),
        PartitionKind::Column => Box::new(
            SplitAlong::new(interior, Axis(1), 1)
                .enumerate()
                .map(|(i, band)| WorkUnit::Column {
                    x: i + 1,
                    pixels: band.index_axis_move(Axis(1), 0),
                }),
        ),
        PartitionKind::Sector => Box::new(
            SplitAlong::new(interior, Axis(0), tile_h)
                .enumerate()
                .flat_map(move |(r, band)| {
                    SplitAlong::new(band, Axis(1), tile_w)
                        .enumerate()
                        .map(move |(c, tile)| WorkUnit::Sector {
                            x0: 1 + c * tile_w,
                            y0: 1 + r * tile_h,
                            pixels: tile,
                        })
                }),
        ),
        PartitionKind::Pixel => {
            let iw = interior.ncols();
            Box::new(
                interior
                    .into_iter()
                    .enumerate()
                    .map(move |(k, target)| WorkUnit::Pixel {
                        x: k % iw + 1,
                        y: k / iw + 1,
                        target,
                    }),
            )
        }
    }
}

/// Consumes a view, yielding consecutive chunks of `extent` along `axis`.
/// The final chunk holds whatever remains.
struct SplitAlong<'a> {
    rest: Option<ArrayViewMut2<'a, Pixel>>,
    axis: Axis,
    extent: usize,
}

impl<'a> SplitAlong<'a> {
    fn new(view: ArrayViewMut2<'a, Pixel>, axis: Axis, extent: usize) -> Self {
        Self {
            rest: Some(view),
            axis,
            extent: extent.max(1),
        }
    }
}

impl<'a> Iterator for SplitAlong<'a> {
    type Item = ArrayViewMut2<'a, Pixel>;

    fn next(&mut self) -> Option<Self::Item> {
        let view = self.rest.take()?;
        let len = view.len_of(self.axis);
        if len == 0 {
            return None;
        }
        if len <= self.extent {
            return Some(view);
        }
        let (head, tail) = view.split_at(self.axis, self.extent);
        self.rest = Some(tail);
        Some(head)
    }
}
