//! Recursive-backtracking maze carver.

use daedal_core::{Maze, MazeError, Point};
use rand::Rng;
use rand::RngExt;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Maze generator carving passages by depth-first backtracking.
///
/// The carver walks the raw grid graph with an explicit stack: from the
/// current cell it picks an unvisited grid-neighbor uniformly at random,
/// opens the wall to it and moves on; when no unvisited neighbor remains it
/// backtracks. Every cell is visited exactly once, so the opened walls form
/// a spanning tree.
pub struct Carver<R: Rng> {
    pub rng: R,
}

impl<R: Rng> Carver<R> {
    /// Create a carver driven by the given random generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Carve a perfect maze into `maze`, starting from `start`.
    ///
    /// Expects every wall closed (a fresh or [`Maze::reset`] grid).
    /// Returns the number of passages opened: `width * height - 1` on
    /// success, 0 when `start` lies outside the maze.
    pub fn carve(&mut self, maze: &mut Maze, start: Point) -> usize {
        debug_assert_eq!(maze.open_walls(), 0);
        if !maze.contains(start) {
            return 0;
        }

        let w = maze.width();
        let h = maze.height();
        let vidx = |p: Point| (p.y * w + p.x) as usize;

        let mut visited = vec![false; (w * h) as usize];
        let mut stack = vec![start];
        visited[vidx(start)] = true;

        let mut nbuf: Vec<Point> = Vec::with_capacity(4);
        let mut opened = 0usize;

        while let Some(&current) = stack.last() {
            nbuf.clear();
            maze.neighbors_all(current, &mut nbuf);
            nbuf.retain(|&n| !visited[vidx(n)]);

            if nbuf.is_empty() {
                stack.pop();
                continue;
            }

            let next = nbuf[self.rng.random_range(0..nbuf.len())];
            maze.open_wall(current, next);
            visited[vidx(next)] = true;
            opened += 1;
            stack.push(next);
        }

        log::debug!("carved {w}x{h} maze: {opened} passages");
        opened
    }
}

/// Generate a seeded perfect maze, carving from the origin.
///
/// The same `(width, height, seed)` triple always yields the same layout.
pub fn generate(width: i32, height: i32, seed: u64) -> Result<Maze, MazeError> {
    let mut maze = Maze::new(width, height)?;
    let mut carver = Carver::new(StdRng::seed_from_u64(seed));
    carver.carve(&mut maze, Point::ZERO);
    Ok(maze)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Number of cells reachable from the origin through open walls.
    fn reachable(maze: &Maze) -> usize {
        let w = maze.width();
        let vidx = |p: Point| (p.y * w + p.x) as usize;
        let mut seen = vec![false; (w * maze.height()) as usize];
        let mut stack = vec![Point::ZERO];
        seen[vidx(Point::ZERO)] = true;
        let mut count = 1;
        let mut nbuf = Vec::new();
        while let Some(p) = stack.pop() {
            nbuf.clear();
            maze.neighbors_open(p, &mut nbuf);
            for &n in &nbuf {
                if !seen[vidx(n)] {
                    seen[vidx(n)] = true;
                    count += 1;
                    stack.push(n);
                }
            }
        }
        count
    }

    #[test]
    fn carved_maze_is_a_spanning_tree() {
        for &(w, h) in &[(8, 5), (10, 10), (5, 5)] {
            for seed in [1u64, 7, 42] {
                let maze = generate(w, h, seed).unwrap();
                let cells = (w * h) as usize;
                assert_eq!(maze.open_walls(), cells - 1, "{w}x{h} seed {seed}");
                assert_eq!(reachable(&maze), cells, "{w}x{h} seed {seed}");
            }
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let a = generate(10, 10, 42).unwrap();
        let b = generate(10, 10, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seed_different_layout() {
        let a = generate(10, 10, 1).unwrap();
        let b = generate(10, 10, 2).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn rerunnable_after_reset() {
        let mut maze = Maze::new(6, 6).unwrap();
        let mut carver = Carver::new(StdRng::seed_from_u64(9));
        carver.carve(&mut maze, Point::ZERO);
        let first = maze.clone();

        maze.reset();
        let mut carver = Carver::new(StdRng::seed_from_u64(9));
        let opened = carver.carve(&mut maze, Point::ZERO);
        assert_eq!(opened, 35);
        assert_eq!(maze, first);
    }

    #[test]
    fn single_cell_maze() {
        let maze = generate(1, 1, 0).unwrap();
        assert_eq!(maze.open_walls(), 0);
        assert_eq!(reachable(&maze), 1);
    }

    #[test]
    fn out_of_bounds_start_is_a_no_op() {
        let mut maze = Maze::new(3, 3).unwrap();
        let mut carver = Carver::new(StdRng::seed_from_u64(0));
        assert_eq!(carver.carve(&mut maze, Point::new(9, 9)), 0);
        assert_eq!(maze.open_walls(), 0);
    }

    #[test]
    fn invalid_dimensions_propagate() {
        assert!(generate(0, 4, 1).is_err());
    }
}
