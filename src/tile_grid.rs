use core::fmt;
use grid_util::grid::{Grid, SimpleGrid};
use grid_util::point::Point;
use grid_util::rect::Rect;
use std::error::Error;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    Wall,
    Floor,
}

/// Walkability as seen by the searches. Any [Grid] of [Tile]s is a [TileMap], so the grid type
/// owned by the world store can be searched in place by implementing [Grid] for it.
pub trait TileMap: Grid<Tile> {
    /// Whether the cell can be entered. Cells outside the grid are never walkable.
    fn is_walkable(&self, point: Point) -> bool {
        self.point_in_bounds(point) && self.get_point(point) == Tile::Floor
    }
}

impl<G: Grid<Tile> + ?Sized> TileMap for G {}

/// Tests whether `point` lies in `rect`, excluding the far edges `x2` and `y2`, as for
/// [Grid::rect] and [Grid::set_rectangle].
pub fn rect_contains(rect: &Rect, point: Point) -> bool {
    point.x >= rect.x1 && point.y >= rect.y1 && point.x < rect.x2 && point.y < rect.y2
}

/// Walls and floor of a level. Implements [Grid] by building on [SimpleGrid].
#[derive(Clone, Debug)]
pub struct TileGrid {
    pub grid: SimpleGrid<Tile>,
}

impl TileGrid {
    pub fn new(width: usize, height: usize, tile: Tile) -> TileGrid {
        TileGrid {
            grid: SimpleGrid::new(width, height, tile),
        }
    }
}

impl Grid<Tile> for TileGrid {
    fn new(width: usize, height: usize, default_value: Tile) -> Self {
        TileGrid::new(width, height, default_value)
    }
    fn get(&self, x: usize, y: usize) -> Tile {
        self.grid.get(x, y)
    }
    fn set(&mut self, x: usize, y: usize, value: Tile) {
        self.grid.set(x, y, value);
    }
    fn width(&self) -> usize {
        self.grid.width()
    }
    fn height(&self) -> usize {
        self.grid.height()
    }
}

impl fmt::Display for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.grid.values.chunks(self.grid.width.max(1)) {
            let line = row
                .iter()
                .map(|tile| match tile {
                    Tile::Wall => '#',
                    Tile::Floor => '.',
                })
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseGridError {
    Empty,
    RaggedRow { row: usize, expected: usize, found: usize },
    UnknownTile { row: usize, column: usize, found: char },
}

impl fmt::Display for ParseGridError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseGridError::Empty => write!(f, "grid has no rows"),
            ParseGridError::RaggedRow {
                row,
                expected,
                found,
            } => write!(f, "row {row} has {found} tiles, expected {expected}"),
            ParseGridError::UnknownTile { row, column, found } => {
                write!(f, "unknown tile {found:?} at row {row}, column {column}")
            }
        }
    }
}

impl Error for ParseGridError {}

/// Parses `#` as [Tile::Wall] and `.` as [Tile::Floor], one row per line. Blank lines and
/// surrounding whitespace are ignored.
impl FromStr for TileGrid {
    type Err = ParseGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<&str>>();
        let width = rows.first().ok_or(ParseGridError::Empty)?.chars().count();
        let mut tiles = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(ParseGridError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }
            for (column, c) in line.chars().enumerate() {
                tiles.push(match c {
                    '#' => Tile::Wall,
                    '.' => Tile::Floor,
                    found => return Err(ParseGridError::UnknownTile { row, column, found }),
                });
            }
        }
        Ok(TileGrid {
            grid: SimpleGrid {
                width,
                height: rows.len(),
                values: tiles,
            },
        })
    }
}
