//! # portal_pathfinding
//!
//! Hierarchical pathfinding on tile grids. The grid is cut into square regions; walkable runs
//! along the borders between neighbouring regions become *portals*, and a one-time
//! precomputation ([PortalGraph::build]) measures the cost of crossing each region from portal
//! to portal. Queries ([find_path]) then search the small portal graph instead of the whole grid
//! and only run cell-level [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) inside the
//! regions at both ends. Movement is 4-connected with uniform cost.
//!
//! Routes that stay inside one region are exact. Longer routes are approximate: the entry and
//! exit portals are chosen locally, so a different choice may occasionally be shorter.
//!
//! ```
//! use grid_util::point::Point;
//! use portal_pathfinding::{find_path, PortalGraph, TileGrid};
//!
//! let grid: TileGrid = "\
//!     ........\n\
//!     ........\n\
//!     ........\n\
//!     ####.####\n\
//!     ........\n\
//!     ........\n\
//!     ........\n\
//!     ........"
//!     .parse()
//!     .unwrap();
//! let graph = PortalGraph::build(&grid, 4);
//! let path = find_path(&graph, &grid, Point::new(0, 0), Point::new(7, 7));
//! assert!(path.contains(&Point::new(3, 3)));
//! ```
mod astar;
pub mod grid_search;
pub mod hierarchical;
pub mod portal;
pub mod portal_graph;
pub mod portal_search;
pub mod region;
pub mod solver;
pub mod tile_grid;

use grid_util::point::Point;

pub use hierarchical::find_path;
pub use portal::{Orientation, Portal, PortalConnection};
pub use portal_graph::PortalGraph;
pub use portal_search::{find_portal_path, find_portal_route};
pub use region::RegionLayout;
pub use solver::{AstarSolver, GridSolver};
pub use tile_grid::{ParseGridError, Tile, TileGrid, TileMap};

/// Side length of a region when the caller has no better value.
pub const DEFAULT_REGION_SIZE: usize = 10;

/// Inline capacity of neighbour lists; a cell has at most four neighbours.
pub const N_SMALLVEC_SIZE: usize = 4;

/// Number of steps along a path, [None] for an empty path.
pub fn path_cost(path: &[Point]) -> Option<usize> {
    path.len().checked_sub(1)
}

/// Checks that consecutive points of `path` are cardinal neighbours and every point is walkable.
pub fn is_walkable_path<G: TileMap + ?Sized>(grid: &G, path: &[Point]) -> bool {
    path.iter().all(|p| grid.is_walkable(*p))
        && path
            .windows(2)
            .all(|w| w[0].manhattan_distance(&w[1]) == 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_cost_counts_steps() {
        assert_eq!(path_cost(&[]), None);
        assert_eq!(path_cost(&[Point::new(0, 0)]), Some(0));
        assert_eq!(path_cost(&[Point::new(0, 0), Point::new(1, 0)]), Some(1));
    }

    #[test]
    fn walkable_path_check() {
        let grid: TileGrid = "..\n#.".parse().unwrap();
        let good = [Point::new(0, 0), Point::new(1, 0), Point::new(1, 1)];
        let diagonal = [Point::new(0, 0), Point::new(1, 1)];
        let through_wall = [Point::new(0, 0), Point::new(0, 1)];
        assert!(is_walkable_path(&grid, &good));
        assert!(!is_walkable_path(&grid, &diagonal));
        assert!(!is_walkable_path(&grid, &through_wall));
    }
}
