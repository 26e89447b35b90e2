use grid_util::point::Point;
use grid_util::rect::Rect;

/// Partition of a `width x height` grid into square regions of side `region_size`, numbered row
/// by row. When a side is not a multiple of `region_size`, the last row or column of regions is
/// cut short at the grid edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionLayout {
    pub region_size: usize,
    pub width: usize,
    pub height: usize,
    pub regions_wide: usize,
    pub regions_high: usize,
}

impl RegionLayout {
    pub fn new(width: usize, height: usize, region_size: usize) -> RegionLayout {
        assert!(region_size > 0, "region size must be positive");
        RegionLayout {
            region_size,
            width,
            height,
            regions_wide: width.div_ceil(region_size),
            regions_high: height.div_ceil(region_size),
        }
    }
    pub fn region_count(&self) -> usize {
        self.regions_wide * self.regions_high
    }
    pub fn region_index(&self, rx: usize, ry: usize) -> usize {
        ry * self.regions_wide + rx
    }
    pub fn region_coords(&self, region: usize) -> (usize, usize) {
        (region % self.regions_wide, region / self.regions_wide)
    }
    /// The region containing `point`, if the point lies on the grid.
    pub fn region_of(&self, point: Point) -> Option<usize> {
        if point.x < 0
            || point.y < 0
            || point.x as usize >= self.width
            || point.y as usize >= self.height
        {
            return None;
        }
        Some(self.region_index(
            point.x as usize / self.region_size,
            point.y as usize / self.region_size,
        ))
    }
    /// Cells of `region`, with the far edges `x2` and `y2` excluded.
    pub fn region_bounds(&self, region: usize) -> Rect {
        let (rx, ry) = self.region_coords(region);
        let s = self.region_size;
        Rect {
            x1: (rx * s) as i32,
            y1: (ry * s) as i32,
            x2: ((rx + 1) * s).min(self.width) as i32,
            y2: ((ry + 1) * s).min(self.height) as i32,
        }
    }
}
