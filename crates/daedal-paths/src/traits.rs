use daedal_core::{Maze, Point};

/// Minimal search interface — provides neighbor enumeration.
pub trait Pather {
    /// Append the traversable neighbors of `p` into `buf`. The caller
    /// clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// A maze is traversable through its open walls.
impl Pather for Maze {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        self.neighbors_open(p, buf);
    }
}
