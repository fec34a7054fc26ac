//! The wall-state maze grid.
//!
//! A [`Maze`] is a fixed-size rectangle of cells. Every cell stores which of
//! its four walls are open as a bitmask; two cells are traversable iff the
//! wall between them is open. [`Maze::open_wall`] always opens both sides,
//! so the wall state stays symmetric by construction.

use std::fmt;

use crate::direction::Direction;
use crate::geom::Point;

/// Errors that can occur when constructing a maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeError {
    /// A non-positive width or height was requested.
    InvalidDimensions { width: i32, height: i32 },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid maze dimensions {width}x{height}")
            }
        }
    }
}

impl std::error::Error for MazeError {}

/// A rectangular maze with per-cell wall state.
///
/// Dimensions are fixed at construction. A fresh maze has every wall
/// closed; a generator opens walls until the passages form a spanning tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Maze {
    width: i32,
    height: i32,
    /// Row-major open-wall masks, one per cell.
    cells: Vec<u8>,
}

impl Maze {
    /// Create a maze with every wall closed.
    pub fn new(width: i32, height: i32) -> Result<Self, MazeError> {
        if width <= 0 || height <= 0 {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![0; (width * height) as usize],
        })
    }

    /// Width in cells.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in cells.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether `p` lies inside the maze.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some((p.y * self.width + p.x) as usize)
    }

    /// Whether the wall of `p` facing `dir` is open.
    ///
    /// Returns `false` for out-of-bounds cells.
    pub fn is_open(&self, p: Point, dir: Direction) -> bool {
        match self.idx(p) {
            Some(i) => self.cells[i] & dir.bit() != 0,
            None => false,
        }
    }

    /// Open the shared wall between grid-adjacent cells `a` and `b`.
    ///
    /// The wall is opened on both sides. A silent no-op when the cells are
    /// not grid-adjacent or either lies outside the maze.
    pub fn open_wall(&mut self, a: Point, b: Point) {
        let Some(dir) = Direction::ALL.into_iter().find(|d| a + d.delta() == b) else {
            return;
        };
        let (Some(ai), Some(bi)) = (self.idx(a), self.idx(b)) else {
            return;
        };
        self.cells[ai] |= dir.bit();
        self.cells[bi] |= dir.opposite().bit();
    }

    /// Close every wall, returning the maze to its freshly-built state.
    pub fn reset(&mut self) {
        self.cells.fill(0);
    }

    /// Number of open passages, each counted once.
    ///
    /// A perfect maze has exactly `width * height - 1` of them.
    pub fn open_walls(&self) -> usize {
        let bits: usize = self.cells.iter().map(|c| c.count_ones() as usize).sum();
        // Each passage sets one bit on both of its cells.
        bits / 2
    }

    /// Append the up-to-4 grid-adjacent cells of `p` into `buf`, ignoring
    /// wall state. Used by generators, which work over the raw grid graph.
    pub fn neighbors_all(&self, p: Point, buf: &mut Vec<Point>) {
        for d in Direction::ALL {
            let n = p + d.delta();
            if self.contains(n) {
                buf.push(n);
            }
        }
    }

    /// Append the grid-adjacent cells of `p` reachable through an open wall
    /// into `buf`. Used by searches.
    pub fn neighbors_open(&self, p: Point, buf: &mut Vec<Point>) {
        for d in Direction::ALL {
            if self.is_open(p, d) {
                let n = p + d.delta();
                if self.contains(n) {
                    buf.push(n);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_non_positive_dimensions() {
        assert_eq!(
            Maze::new(0, 5),
            Err(MazeError::InvalidDimensions {
                width: 0,
                height: 5
            })
        );
        assert!(Maze::new(5, -1).is_err());
        assert!(Maze::new(1, 1).is_ok());
    }

    #[test]
    fn fresh_maze_is_fully_walled() {
        let m = Maze::new(3, 3).unwrap();
        assert_eq!(m.open_walls(), 0);
        let mut buf = Vec::new();
        m.neighbors_open(Point::new(1, 1), &mut buf);
        assert!(buf.is_empty());
    }

    #[test]
    fn open_wall_is_symmetric() {
        let mut m = Maze::new(3, 3).unwrap();
        let a = Point::new(1, 1);
        let b = Point::new(2, 1);
        m.open_wall(a, b);
        assert!(m.is_open(a, Direction::East));
        assert!(m.is_open(b, Direction::West));
        assert_eq!(m.open_walls(), 1);

        let mut buf = Vec::new();
        m.neighbors_open(a, &mut buf);
        assert_eq!(buf, vec![b]);
        buf.clear();
        m.neighbors_open(b, &mut buf);
        assert_eq!(buf, vec![a]);
    }

    #[test]
    fn open_wall_ignores_non_adjacent_pairs() {
        let mut m = Maze::new(3, 3).unwrap();
        m.open_wall(Point::new(0, 0), Point::new(2, 0));
        m.open_wall(Point::new(0, 0), Point::new(1, 1));
        m.open_wall(Point::new(0, 0), Point::new(0, 0));
        assert_eq!(m.open_walls(), 0);
    }

    #[test]
    fn open_wall_ignores_out_of_bounds() {
        let mut m = Maze::new(2, 2).unwrap();
        m.open_wall(Point::new(0, 0), Point::new(0, -1));
        m.open_wall(Point::new(1, 1), Point::new(2, 1));
        assert_eq!(m.open_walls(), 0);
    }

    #[test]
    fn neighbors_all_respects_bounds() {
        let m = Maze::new(3, 3).unwrap();
        let mut buf = Vec::new();
        m.neighbors_all(Point::new(0, 0), &mut buf);
        assert_eq!(buf.len(), 2);
        buf.clear();
        m.neighbors_all(Point::new(1, 0), &mut buf);
        assert_eq!(buf.len(), 3);
        buf.clear();
        m.neighbors_all(Point::new(1, 1), &mut buf);
        assert_eq!(buf.len(), 4);
    }

    #[test]
    fn reset_closes_everything() {
        let mut m = Maze::new(2, 2).unwrap();
        m.open_wall(Point::new(0, 0), Point::new(1, 0));
        m.open_wall(Point::new(0, 0), Point::new(0, 1));
        assert_eq!(m.open_walls(), 2);
        m.reset();
        assert_eq!(m, Maze::new(2, 2).unwrap());
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn maze_round_trip() {
        let mut m = Maze::new(4, 3).unwrap();
        m.open_wall(Point::new(0, 0), Point::new(1, 0));
        m.open_wall(Point::new(1, 0), Point::new(1, 1));
        let json = serde_json::to_string(&m).unwrap();
        let back: Maze = serde_json::from_str(&json).unwrap();
        assert_eq!(m, back);
    }
}
