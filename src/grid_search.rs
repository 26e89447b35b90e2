use grid_util::point::Point;
use grid_util::rect::Rect;
use log::trace;
use smallvec::SmallVec;

use crate::astar::astar;
use crate::tile_grid::{rect_contains, TileMap};
use crate::N_SMALLVEC_SIZE;

/// The cardinal neighbours of `point` that are walkable and lie inside `bounds`, generated in
/// the order right, left, down, up. The order decides which of several equally short paths is
/// returned.
pub fn neighborhood_points<G: TileMap + ?Sized>(
    grid: &G,
    point: &Point,
    bounds: &Rect,
) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
    [
        Point::new(point.x + 1, point.y),
        Point::new(point.x - 1, point.y),
        Point::new(point.x, point.y + 1),
        Point::new(point.x, point.y - 1),
    ]
    .into_iter()
    .filter(|p| rect_contains(bounds, *p) && grid.is_walkable(*p))
    .collect()
}

/// Computes the shortest 4-connected path from `from` to `to` that stays inside `bounds`, using
/// A* with the Euclidean distance as heuristic. The returned path includes both endpoints.
///
/// An empty path means no path: `from` lies outside the grid, `from` is a wall, or `to` cannot
/// be reached without leaving `bounds`.
pub fn find_path<G: TileMap + ?Sized>(grid: &G, from: Point, to: Point, bounds: Rect) -> Vec<Point> {
    if !grid.point_in_bounds(from) || !grid.is_walkable(from) {
        trace!("{} is not a walkable source", from);
        return Vec::new();
    }
    astar(
        &from,
        |node| {
            neighborhood_points(grid, node, &bounds)
                .into_iter()
                .map(|p| (p, 1.0f32))
        },
        |point| point.euclidean_distance(&to),
        |point| *point == to,
    )
    .map(|(path, _cost)| path)
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile_grid::{Tile, TileGrid};
    use grid_util::grid::Grid;

    fn open_grid(w: usize, h: usize) -> TileGrid {
        TileGrid::new(w, h, Tile::Floor)
    }

    #[test]
    fn equal_start_goal() {
        let grid = open_grid(1, 1);
        let start = Point::new(0, 0);
        let path = find_path(&grid, start, start, grid.rect());
        assert_eq!(path, vec![start]);
    }

    /// Asserts that the optimal 4 step solution around a pillar is found.
    #[test]
    fn solve_simple_problem() {
        //  ___
        // |S  |
        // | # |
        // |  G|
        //  ___
        let grid: TileGrid = "...\n.#.\n...".parse().unwrap();
        let path = find_path(
            &grid,
            Point::new(0, 0),
            Point::new(2, 2),
            grid.rect(),
        );
        assert_eq!(path.len(), 5);
        assert!(path.iter().all(|p| grid.is_walkable(*p)));
    }

    #[test]
    fn expansion_order_prefers_moving_right_first() {
        let grid = open_grid(2, 2);
        let path = find_path(
            &grid,
            Point::new(0, 0),
            Point::new(1, 1),
            grid.rect(),
        );
        assert_eq!(
            path,
            vec![Point::new(0, 0), Point::new(1, 0), Point::new(1, 1)]
        );
    }

    #[test]
    fn out_of_grid_and_wall_sources_give_empty() {
        let grid: TileGrid = "#.\n..".parse().unwrap();
        let bounds = grid.rect();
        assert!(find_path(&grid, Point::new(-1, 0), Point::new(1, 1), bounds).is_empty());
        assert!(find_path(&grid, Point::new(5, 5), Point::new(1, 1), bounds).is_empty());
        assert!(find_path(&grid, Point::new(0, 0), Point::new(1, 1), bounds).is_empty());
        assert!(find_path(&grid, Point::new(0, 0), Point::new(0, 0), bounds).is_empty());
    }

    #[test]
    fn bounds_restrict_the_search() {
        // The only connection between the two halves runs through row 2.
        let grid: TileGrid = ".#.\n.#.\n...".parse().unwrap();
        let from = Point::new(0, 0);
        let to = Point::new(2, 0);
        assert_eq!(find_path(&grid, from, to, grid.rect()).len(), 7);
        let top = Rect::new(0, 0, 3, 2);
        assert!(find_path(&grid, from, to, top).is_empty());
    }

    #[test]
    fn unreachable_goal_gives_empty() {
        let grid: TileGrid = ".#.".parse().unwrap();
        let path = find_path(
            &grid,
            Point::new(0, 0),
            Point::new(2, 0),
            grid.rect(),
        );
        assert!(path.is_empty());
    }
}
