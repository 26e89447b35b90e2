use grid_util::point::Point;
use grid_util::rect::Rect;
use log::{info, trace};
use petgraph::unionfind::UnionFind;

use crate::grid_search;
use crate::portal::{extract_portals, Portal, PortalConnection};
use crate::region::RegionLayout;
use crate::tile_grid::TileMap;

/// Coarse graph over the portals of a grid. Built once per grid by [PortalGraph::build] and
/// read-only afterwards; share it between agents and threads through an `Arc`.
#[derive(Clone, Debug)]
pub struct PortalGraph {
    layout: RegionLayout,
    portals: Vec<Portal>,
    region_portals: Vec<Vec<usize>>,
    components: UnionFind<usize>,
}

/// Minimum step count between a cell of `first` and a cell of `second` inside `bounds`, or
/// [None] as soon as one cell pair is not connected inside `bounds`.
/// The pair is abandoned on the first disconnected cell pair even when other pairs would connect.
///
/// The cost counts moves, not cells, so portals meeting at a region corner get a cost of 0 and
/// the single move across a portal is not part of any connection cost. Counting cells instead
/// would add one to every connection.
fn portal_distance<G: TileMap + ?Sized>(
    grid: &G,
    first: &Portal,
    second: &Portal,
    bounds: Rect,
) -> Option<usize> {
    let mut min_dist = usize::MAX;
    for from in first.cells_within(&bounds) {
        for to in second.cells_within(&bounds) {
            let path = grid_search::find_path(grid, from, to, bounds);
            if path.is_empty() {
                trace!("No path from {} to {}, dropping portal pair", from, to);
                return None;
            }
            min_dist = min_dist.min(path.len() - 1);
        }
    }
    (min_dist != usize::MAX).then_some(min_dist)
}

impl PortalGraph {
    /// Extracts the portals of `grid` for regions of side `region_size` and connects every
    /// pair of portals sharing a region with the cost of crossing that region. This runs a
    /// bounded search for every cell pair of every portal pair, so it belongs in a loading
    /// step, not in a query.
    ///
    /// # Panics
    /// When `region_size` is zero.
    pub fn build<G: TileMap + ?Sized>(grid: &G, region_size: usize) -> PortalGraph {
        let layout = RegionLayout::new(grid.width(), grid.height(), region_size);
        info!(
            "Building portal graph for {}x{} grid with region size {}",
            layout.width, layout.height, region_size
        );
        let (portals, region_portals) = extract_portals(grid, &layout);
        let mut graph = PortalGraph {
            layout,
            components: UnionFind::new(portals.len()),
            portals,
            region_portals,
        };
        graph.connect_portals(grid);
        graph.generate_components();
        info!(
            "Built portal graph: {} regions, {} portals, {} connections",
            graph.layout.region_count(),
            graph.portals.len(),
            graph.connection_count()
        );
        graph
    }

    fn connect_portals<G: TileMap + ?Sized>(&mut self, grid: &G) {
        for (region, indices) in self.region_portals.iter().enumerate() {
            let bounds = self.layout.region_bounds(region);
            for (i, &first) in indices.iter().enumerate() {
                for &second in &indices[i + 1..] {
                    let dist = portal_distance(
                        grid,
                        &self.portals[first],
                        &self.portals[second],
                        bounds,
                    );
                    if let Some(cost) = dist {
                        trace!(
                            "Region {}: portals {} and {} connected at cost {}",
                            region,
                            first,
                            second,
                            cost
                        );
                        self.portals[first].connections.push(PortalConnection {
                            target: second,
                            cost,
                        });
                        self.portals[second].connections.push(PortalConnection {
                            target: first,
                            cost,
                        });
                    }
                }
            }
        }
    }

    /// Generates a new [UnionFind] structure and joins the portals linked by a connection.
    fn generate_components(&mut self) {
        self.components = UnionFind::new(self.portals.len());
        for (ix, portal) in self.portals.iter().enumerate() {
            for connection in &portal.connections {
                self.components.union(ix, connection.target);
            }
        }
    }

    pub fn layout(&self) -> &RegionLayout {
        &self.layout
    }
    pub fn region_size(&self) -> usize {
        self.layout.region_size
    }
    pub fn portals(&self) -> &[Portal] {
        &self.portals
    }
    pub fn portal(&self, ix: usize) -> Option<&Portal> {
        self.portals.get(ix)
    }
    /// Indices of the portals touching `region`; empty for unknown regions.
    pub fn region_portals(&self, region: usize) -> &[usize] {
        self.region_portals
            .get(region)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
    pub fn region_of(&self, point: Point) -> Option<usize> {
        self.layout.region_of(point)
    }
    pub fn region_bounds(&self, region: usize) -> Rect {
        self.layout.region_bounds(region)
    }
    pub fn connection_count(&self) -> usize {
        self.portals.iter().map(|p| p.connections.len()).sum()
    }
    /// Whether a chain of connections links the two portals.
    pub fn connected(&self, first: usize, second: usize) -> bool {
        first < self.portals.len()
            && second < self.portals.len()
            && self.components.equiv(first, second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile_grid::{Tile, TileGrid};

    #[test]
    fn open_grid_connections() {
        let grid = TileGrid::new(8, 8, Tile::Floor);
        let graph = PortalGraph::build(&grid, 4);
        assert_eq!(graph.portals().len(), 4);
        // Portals 0 and 1 meet in region 0 at the corner cell (3, 3).
        assert!(graph.portals()[0]
            .connections
            .contains(&PortalConnection { target: 1, cost: 0 }));
        assert!(graph.portals()[1]
            .connections
            .contains(&PortalConnection { target: 0, cost: 0 }));
        // One connection per shared region, stored on both ends.
        assert_eq!(graph.connection_count(), 8);
        assert!(graph.connected(0, 3));
    }

    #[test]
    fn every_portal_is_listed_by_its_two_regions() {
        let grid: TileGrid = "\
            ..#.....\n\
            ..#..#..\n\
            ........\n\
            ####.###\n\
            ........\n\
            .#......\n\
            .#...#..\n\
            ........"
            .parse()
            .unwrap();
        let graph = PortalGraph::build(&grid, 4);
        for (ix, portal) in graph.portals().iter().enumerate() {
            for region in 0..graph.layout().region_count() {
                let listed = graph.region_portals(region).contains(&ix);
                assert_eq!(listed, portal.touches(region));
            }
            for connection in &portal.connections {
                let shared = portal
                    .regions
                    .iter()
                    .any(|r| graph.portals()[connection.target].touches(*r));
                assert!(shared);
            }
        }
    }

    #[test]
    fn walled_off_portals_get_no_edge() {
        // The wall column x = 1 cuts cell (0, 3) off from the rest of region 0, so the short
        // bottom portal under it cannot reach the portal on the right border.
        let grid: TileGrid = "\
            .#......\n\
            .#......\n\
            .#......\n\
            .#......\n\
            ........\n\
            ........\n\
            ........\n\
            ........"
            .parse()
            .unwrap();
        let graph = PortalGraph::build(&grid, 4);
        let region_0 = graph.region_portals(0).to_vec();
        assert_eq!(region_0.len(), 3);
        let right = region_0
            .iter()
            .copied()
            .find(|&ix| graph.portals()[ix].regions == [1, 0])
            .unwrap();
        let bottom_left = region_0
            .iter()
            .copied()
            .find(|&ix| graph.portals()[ix].regions == [2, 0] && graph.portals()[ix].start.x == 0)
            .unwrap();
        // (0, 3) cannot reach the right border inside region 0.
        assert!(!graph.portals()[right]
            .connections
            .iter()
            .any(|c| c.target == bottom_left));
    }

    #[test]
    fn sealed_regions_are_separate_components() {
        let grid: TileGrid = "\
            ........\n\
            ........\n\
            ........\n\
            ........\n\
            ########\n\
            ........\n\
            ........\n\
            ........"
            .parse()
            .unwrap();
        let graph = PortalGraph::build(&grid, 4);
        // Only the vertical borders produce portals: rows 0..4 and rows 5..8.
        assert_eq!(graph.portals().len(), 2);
        assert!(!graph.connected(0, 1));
        assert!(!graph.connected(0, 7));
    }

    #[test]
    fn region_lookup() {
        let grid = TileGrid::new(8, 8, Tile::Floor);
        let graph = PortalGraph::build(&grid, 4);
        assert_eq!(graph.region_size(), 4);
        assert_eq!(graph.region_of(Point::new(5, 6)), Some(3));
        assert!(graph.region_portals(17).is_empty());
    }
}
