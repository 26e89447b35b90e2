use grid_util::point::Point;
use portal_pathfinding::{find_path, find_portal_path, PortalGraph, TileGrid};

// In this example a path is found across a 16x12 dungeon split into regions of 4 cells:
// - # marks a wall
// - . marks floor
//
// The portal graph is built once, then queried.

const DUNGEON: &str = "
    ........#.......
    ........#.......
    ..####..#..###..
    ........#.......
    ######.##.######
    ........#.......
    ...#............
    ...#....#####...
    ...#............
    #######.########
    ................
    ................
";

fn main() {
    let grid: TileGrid = match DUNGEON.parse() {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("Could not parse dungeon: {e}");
            return;
        }
    };
    println!("{}", grid);
    let graph = PortalGraph::build(&grid, 4);
    println!(
        "{} portals, {} connections",
        graph.portals().len(),
        graph.connection_count()
    );
    let start = Point::new(0, 0);
    let end = Point::new(15, 11);
    let path = find_path(&graph, &grid, start, end);
    println!("Path ({} steps):", path.len().saturating_sub(1));
    for p in &path {
        println!("{:?}", p);
    }
    if let (Some(first), Some(last)) = (graph.region_of(start), graph.region_of(end)) {
        let entry = graph.region_portals(first).first();
        let exit = graph.region_portals(last).first();
        if let (Some(&entry), Some(&exit)) = (entry, exit) {
            println!("Coarse waypoints: {:?}", find_portal_path(&graph, entry, exit));
        }
    }
}
