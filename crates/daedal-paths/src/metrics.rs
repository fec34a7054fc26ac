//! Run statistics.

use std::time::Duration;

use crate::search::Search;

/// Read-only statistics captured from a search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metrics {
    /// Edges on the reconstructed path; 0 when there is no path.
    pub path_length: usize,
    /// Wall-clock time from construction to the terminal transition, or to
    /// the snapshot for a still-running search.
    pub elapsed: Duration,
}

impl Metrics {
    /// Capture the current statistics of `search`.
    ///
    /// Purely observational; the search state is not touched.
    pub fn snapshot(search: &Search) -> Self {
        let path_length = match search.path() {
            Ok(path) => path.len() - 1,
            Err(_) => 0,
        };
        Self {
            path_length,
            elapsed: search.elapsed(),
        }
    }

    /// Elapsed time in fractional seconds.
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{Search, Status};
    use crate::strategy::Strategy;
    use daedal_carve::generate;
    use daedal_core::{Maze, Point};

    #[test]
    fn snapshot_reports_path_edges() {
        let maze = generate(5, 5, 42).unwrap();
        let mut s = Search::new(&maze, Point::ZERO, Point::new(4, 4), Strategy::Bfs).unwrap();
        s.run(&maze);
        let m = Metrics::snapshot(&s);
        assert_eq!(m.path_length, s.path().unwrap().len() - 1);
        assert!(m.elapsed_seconds() >= 0.0);
    }

    #[test]
    fn elapsed_freezes_at_terminal() {
        let maze = generate(5, 5, 7).unwrap();
        let mut s = Search::new(&maze, Point::ZERO, Point::new(4, 4), Strategy::AStar).unwrap();
        s.run(&maze);
        let first = Metrics::snapshot(&s);
        std::thread::sleep(Duration::from_millis(5));
        let second = Metrics::snapshot(&s);
        assert_eq!(first, second);
    }

    #[test]
    fn no_path_means_zero_length() {
        let maze = Maze::new(2, 2).unwrap();
        let mut s = Search::new(&maze, Point::ZERO, Point::new(1, 1), Strategy::Dijkstra).unwrap();
        assert_eq!(s.run(&maze), Status::Exhausted);
        assert_eq!(Metrics::snapshot(&s).path_length, 0);
    }
}
