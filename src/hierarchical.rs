use grid_util::point::Point;
use grid_util::rect::Rect;
use log::debug;

use crate::grid_search;
use crate::portal::Portal;
use crate::portal_graph::PortalGraph;
use crate::portal_search::find_portal_route;
use crate::tile_grid::TileMap;

/// Shortest path from `from` to any cell of `portal` inside `bounds`. With
/// `abandon_on_unreachable`, the portal is given up on entirely as soon as one of its cells
/// cannot be reached; otherwise unreachable cells are skipped.
fn path_to_portal<G: TileMap + ?Sized>(
    grid: &G,
    from: Point,
    portal: &Portal,
    bounds: Rect,
    abandon_on_unreachable: bool,
) -> Option<Vec<Point>> {
    let mut best: Option<Vec<Point>> = None;
    for cell in portal.cells_within(&bounds) {
        let path = grid_search::find_path(grid, from, cell, bounds);
        if path.is_empty() {
            if abandon_on_unreachable {
                return None;
            }
            continue;
        }
        if best.as_ref().map_or(true, |b| path.len() < b.len()) {
            best = Some(path);
        }
    }
    best
}

/// Picks the portal of `region` closest to `point`, returning its index and the local path from
/// `point` to it. A portal with any cell unreachable from `point` is skipped; on equal length
/// the portal listed first wins.
pub fn nearest_portal<G: TileMap + ?Sized>(
    graph: &PortalGraph,
    grid: &G,
    point: Point,
    region: usize,
) -> Option<(usize, Vec<Point>)> {
    let bounds = graph.region_bounds(region);
    let mut best: Option<(usize, Vec<Point>)> = None;
    for &ix in graph.region_portals(region) {
        let Some(path) = path_to_portal(grid, point, &graph.portals()[ix], bounds, true) else {
            continue;
        };
        if best.as_ref().map_or(true, |(_, b)| path.len() < b.len()) {
            best = Some((ix, path));
        }
    }
    best
}

/// Turns a portal route into cells, continuing `path` (which ends on the first portal of
/// `route`, inside `region`) up to `to`. Each step either stays in the current region, when the
/// next portal borders it, or crosses the current portal first. Every walk heads for the nearest
/// reachable cell of the next portal.
fn refine_route<G: TileMap + ?Sized>(
    graph: &PortalGraph,
    grid: &G,
    mut path: Vec<Point>,
    mut region: usize,
    route: &[usize],
    to: Point,
    to_region: usize,
) -> Option<Vec<Point>> {
    let portals = graph.portals();
    for pair in route.windows(2) {
        let (current, next) = (&portals[pair[0]], &portals[pair[1]]);
        let here = *path.last()?;
        let stay = next
            .touches(region)
            .then(|| path_to_portal(grid, here, next, graph.region_bounds(region), false))
            .flatten();
        let leg = match stay {
            Some(leg) => leg,
            None => {
                let across = current.other_region(region)?;
                if !next.touches(across) {
                    return None;
                }
                let entered = current.across(here);
                path.push(entered);
                region = across;
                path_to_portal(grid, entered, next, graph.region_bounds(region), false)?
            }
        };
        path.extend(leg.into_iter().skip(1));
    }
    if region != to_region {
        let exit = &portals[*route.last()?];
        if exit.other_region(region) != Some(to_region) {
            return None;
        }
        let here = *path.last()?;
        path.push(exit.across(here));
        region = to_region;
    }
    let here = *path.last()?;
    let leg = grid_search::find_path(grid, here, to, graph.region_bounds(region));
    if leg.is_empty() {
        return None;
    }
    path.extend(leg.into_iter().skip(1));
    Some(path)
}

/// Finds a walkable path from `from` to `to` using the precomputed `graph` of `grid`.
///
/// Endpoints in the same region are answered exactly with a search bounded to that region.
/// Otherwise the closest usable portal is picked independently on each side, the portal graph
/// is searched between them and the resulting route is walked cell by cell. The result is not
/// guaranteed to be the shortest path; an empty result means no path was found.
pub fn find_path<G: TileMap + ?Sized>(
    graph: &PortalGraph,
    grid: &G,
    from: Point,
    to: Point,
) -> Vec<Point> {
    let (Some(from_region), Some(to_region)) = (graph.region_of(from), graph.region_of(to)) else {
        debug!("{} or {} lies outside the grid", from, to);
        return Vec::new();
    };
    if from_region == to_region {
        debug!("{} and {} share region {}", from, to, from_region);
        return grid_search::find_path(grid, from, to, graph.region_bounds(from_region));
    }
    if !grid.is_walkable(from) {
        return Vec::new();
    }
    let Some((entry, source_leg)) = nearest_portal(graph, grid, from, from_region) else {
        debug!("No usable portal around {}", from);
        return Vec::new();
    };
    let Some((exit, target_leg)) = nearest_portal(graph, grid, to, to_region) else {
        debug!("No usable portal around {}", to);
        return Vec::new();
    };
    debug!(
        "Entry portal {} at {} steps, exit portal {} at {} steps",
        entry,
        source_leg.len() - 1,
        exit,
        target_leg.len() - 1
    );
    let route = find_portal_route(graph, entry, exit);
    if route.is_empty() {
        return Vec::new();
    }
    refine_route(graph, grid, source_leg, from_region, &route, to, to_region).unwrap_or_default()
}

impl PortalGraph {
    /// See [find_path].
    pub fn find_path<G: TileMap + ?Sized>(&self, grid: &G, from: Point, to: Point) -> Vec<Point> {
        find_path(self, grid, from, to)
    }
}
