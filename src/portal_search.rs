use grid_util::point::Point;
use log::debug;

use crate::astar::astar;
use crate::portal_graph::PortalGraph;

/// Computes the cheapest chain of portals from portal `from` to portal `to`, both included,
/// walking precomputed connections. The heuristic is the distance between portal midpoints.
///
/// Returns an empty route for unknown indices and for portals in different components; the
/// latter is answered from the union-find without searching.
pub fn find_portal_route(graph: &PortalGraph, from: usize, to: usize) -> Vec<usize> {
    if !graph.connected(from, to) {
        debug!("Portals {} and {} are not connected", from, to);
        return Vec::new();
    }
    let portals = graph.portals();
    let goal = portals[to].midpoint();
    astar(
        &from,
        |&ix| {
            portals[ix]
                .connections
                .iter()
                .map(|c| (c.target, c.cost as f32))
        },
        |&ix| portals[ix].midpoint().euclidean_distance(&goal),
        |&ix| ix == to,
    )
    .map(|(route, _cost)| route)
    .unwrap_or_default()
}

/// The midpoints of the portals on [find_portal_route]: a coarse sequence of waypoints, one per
/// region border crossed.
pub fn find_portal_path(graph: &PortalGraph, from: usize, to: usize) -> Vec<Point> {
    find_portal_route(graph, from, to)
        .into_iter()
        .map(|ix| graph.portals()[ix].midpoint())
        .collect()
}
