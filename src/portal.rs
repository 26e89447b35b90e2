use grid_util::point::Point;
use grid_util::rect::Rect;
use itertools::iproduct;
use log::debug;

use crate::region::RegionLayout;
use crate::tile_grid::TileMap;

/// Which way the border under a portal runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Border along x, between a region and the one above it.
    Horizontal,
    /// Border along y, between a region and the one left of it.
    Vertical,
}

/// Edge of the portal graph: travel from the owning portal to portal `target` takes `cost` steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PortalConnection {
    pub target: usize,
    pub cost: usize,
}

/// A maximal run of border cells where both sides are walkable.
///
/// `start` and `end` are the inclusive corners of the two cells thick strip covering the run:
/// `start` lies in the upper or left region, `end` in the lower or right one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Portal {
    pub start: Point,
    pub end: Point,
    pub orientation: Orientation,
    /// The lower or right region first, then the region across the border.
    pub regions: [usize; 2],
    pub connections: Vec<PortalConnection>,
}

impl Portal {
    pub fn midpoint(&self) -> Point {
        Point::new((self.start.x + self.end.x) / 2, (self.start.y + self.end.y) / 2)
    }
    /// Number of border positions covered.
    pub fn span(&self) -> usize {
        match self.orientation {
            Orientation::Horizontal => (self.end.x - self.start.x + 1) as usize,
            Orientation::Vertical => (self.end.y - self.start.y + 1) as usize,
        }
    }
    pub fn touches(&self, region: usize) -> bool {
        self.regions.contains(&region)
    }
    pub fn other_region(&self, region: usize) -> Option<usize> {
        match self.regions {
            [a, b] if a == region => Some(b),
            [a, b] if b == region => Some(a),
            _ => None,
        }
    }
    /// The strip cells inside `bounds`, row by row.
    pub fn cells_within(&self, bounds: &Rect) -> impl Iterator<Item = Point> {
        let ys = self.start.y.max(bounds.y1)..=self.end.y.min(bounds.y2 - 1);
        let xs = self.start.x.max(bounds.x1)..=self.end.x.min(bounds.x2 - 1);
        iproduct!(ys, xs).map(|(y, x)| Point::new(x, y))
    }
    /// The cell facing `cell` on the other side of the border.
    pub fn across(&self, cell: Point) -> Point {
        match self.orientation {
            Orientation::Horizontal => Point::new(
                cell.x,
                if cell.y == self.start.y { self.end.y } else { self.start.y },
            ),
            Orientation::Vertical => Point::new(
                if cell.x == self.start.x { self.end.x } else { self.start.x },
                cell.y,
            ),
        }
    }
}

/// Walks `len` border cells from `origin` in direction `step` and returns the `(start, end)`
/// corners of every run where the cell and its neighbour at offset `across` are both walkable.
fn scan_border<G: TileMap + ?Sized>(
    grid: &G,
    origin: Point,
    step: Point,
    across: Point,
    len: usize,
) -> Vec<(Point, Point)> {
    let cell = |i: i32| Point::new(origin.x + i * step.x, origin.y + i * step.y);
    let corners = |from: i32, to: i32| {
        let first = cell(from);
        (Point::new(first.x + across.x, first.y + across.y), cell(to))
    };
    let mut spans = Vec::new();
    let mut open: Option<(i32, i32)> = None;
    for i in 0..len as i32 {
        let p = cell(i);
        let neighbor = Point::new(p.x + across.x, p.y + across.y);
        if grid.is_walkable(p) && grid.is_walkable(neighbor) {
            open = Some(open.map_or((i, i), |(from, _)| (from, i)));
        } else if let Some((from, to)) = open.take() {
            spans.push(corners(from, to));
        }
    }
    if let Some((from, to)) = open {
        spans.push(corners(from, to));
    }
    spans
}

/// Finds the portals between neighbouring regions. Regions are visited row by row; for each
/// region its top border is scanned before its left border. Returns the portals (without
/// connections) and, per region, the indices of the portals touching it.
pub fn extract_portals<G: TileMap + ?Sized>(
    grid: &G,
    layout: &RegionLayout,
) -> (Vec<Portal>, Vec<Vec<usize>>) {
    let mut portals: Vec<Portal> = Vec::new();
    let mut region_portals: Vec<Vec<usize>> = vec![Vec::new(); layout.region_count()];
    for ry in 0..layout.regions_high {
        for rx in 0..layout.regions_wide {
            let region = layout.region_index(rx, ry);
            let bounds = layout.region_bounds(region);
            let mut borders = Vec::with_capacity(2);
            if ry > 0 {
                borders.push((
                    Orientation::Horizontal,
                    layout.region_index(rx, ry - 1),
                    Point::new(1, 0),
                    Point::new(0, -1),
                    bounds.width() as usize,
                ));
            }
            if rx > 0 {
                borders.push((
                    Orientation::Vertical,
                    layout.region_index(rx - 1, ry),
                    Point::new(0, 1),
                    Point::new(-1, 0),
                    bounds.height() as usize,
                ));
            }
            let origin = Point::new(bounds.x1, bounds.y1);
            for (orientation, neighbor, step, across, len) in borders {
                for (start, end) in scan_border(grid, origin, step, across, len) {
                    let ix = portals.len();
                    portals.push(Portal {
                        start,
                        end,
                        orientation,
                        regions: [region, neighbor],
                        connections: Vec::new(),
                    });
                    region_portals[region].push(ix);
                    region_portals[neighbor].push(ix);
                }
            }
        }
    }
    debug!(
        "Extracted {} portals over {} regions",
        portals.len(),
        layout.region_count()
    );
    (portals, region_portals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile_grid::{Tile, TileGrid};
    use grid_util::grid::Grid;

    #[test]
    fn open_grid_has_one_portal_per_boundary() {
        let grid = TileGrid::new(8, 8, Tile::Floor);
        let layout = RegionLayout::new(8, 8, 4);
        let (portals, region_portals) = extract_portals(&grid, &layout);
        assert_eq!(portals.len(), 4);
        assert_eq!(region_portals, vec![vec![0, 1], vec![0, 2], vec![1, 3], vec![2, 3]]);
        // Left border of region 1
        assert_eq!(portals[0].start, Point::new(3, 0));
        assert_eq!(portals[0].end, Point::new(4, 3));
        assert_eq!(portals[0].orientation, Orientation::Vertical);
        // Top border of region 2
        assert_eq!(portals[1].start, Point::new(0, 3));
        assert_eq!(portals[1].end, Point::new(3, 4));
        assert_eq!(portals[1].regions, [2, 0]);
        assert!(portals.iter().all(|p| p.span() == 4));
    }

    #[test]
    fn walls_split_a_border_into_runs() {
        let mut grid = TileGrid::new(8, 4, Tile::Floor);
        // Break the vertical border between x = 3 and x = 4 at rows 1 and 2.
        grid.set_point(Point::new(3, 1), Tile::Wall);
        grid.set_point(Point::new(4, 2), Tile::Wall);
        let layout = RegionLayout::new(8, 4, 4);
        let (portals, region_portals) = extract_portals(&grid, &layout);
        assert_eq!(portals.len(), 2);
        assert_eq!((portals[0].start, portals[0].end), (Point::new(3, 0), Point::new(4, 0)));
        assert_eq!((portals[1].start, portals[1].end), (Point::new(3, 3), Point::new(4, 3)));
        assert_eq!(region_portals[0], vec![0, 1]);
        assert_eq!(region_portals[1], vec![0, 1]);
    }

    #[test]
    fn cells_within_a_region_and_across() {
        let portal = Portal {
            start: Point::new(0, 3),
            end: Point::new(3, 4),
            orientation: Orientation::Horizontal,
            regions: [2, 0],
            connections: Vec::new(),
        };
        let upper = Rect::new(0, 0, 4, 4);
        let cells = portal.cells_within(&upper).collect::<Vec<_>>();
        assert_eq!(cells.len(), 4);
        assert!(cells.iter().all(|c| c.y == 3));
        assert_eq!(portal.across(Point::new(2, 3)), Point::new(2, 4));
        assert_eq!(portal.across(Point::new(2, 4)), Point::new(2, 3));
        assert_eq!(portal.midpoint(), Point::new(1, 3));
        assert_eq!(portal.other_region(0), Some(2));
        assert_eq!(portal.other_region(1), None);
    }

    #[test]
    fn outer_edge_yields_no_portals() {
        let grid = TileGrid::new(4, 4, Tile::Floor);
        let layout = RegionLayout::new(4, 4, 4);
        let (portals, region_portals) = extract_portals(&grid, &layout);
        assert!(portals.is_empty());
        assert_eq!(region_portals, vec![Vec::<usize>::new()]);
    }
}
