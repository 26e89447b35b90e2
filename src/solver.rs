use grid_util::point::Point;

use crate::grid_search;
use crate::hierarchical;
use crate::portal_graph::PortalGraph;
use crate::tile_grid::TileMap;

/// Common interface of the path queries so they can be swapped and compared.
pub trait GridSolver {
    /// Computes a 4-connected path from `start` to `goal`, both included. Empty if no path was
    /// found.
    fn get_path<G: TileMap + ?Sized>(&self, grid: &G, start: Point, goal: Point) -> Vec<Point>;

    /// Number of steps of the path found by [get_path](Self::get_path), [None] if there is none.
    fn get_path_cost<G: TileMap + ?Sized>(
        &self,
        grid: &G,
        start: Point,
        goal: Point,
    ) -> Option<usize> {
        crate::path_cost(&self.get_path(grid, start, goal))
    }
}

/// Exact A* over the whole grid, without any precomputation.
#[derive(Clone, Copy, Debug, Default)]
pub struct AstarSolver;

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver
    }
}

impl GridSolver for AstarSolver {
    fn get_path<G: TileMap + ?Sized>(&self, grid: &G, start: Point, goal: Point) -> Vec<Point> {
        grid_search::find_path(grid, start, goal, grid.rect())
    }
}

impl GridSolver for PortalGraph {
    fn get_path<G: TileMap + ?Sized>(&self, grid: &G, start: Point, goal: Point) -> Vec<Point> {
        hierarchical::find_path(self, grid, start, goal)
    }
}
