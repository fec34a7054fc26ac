//! The steppable search engine.
//!
//! [`Search`] holds one run's entire state: a flat node arena (cost, parent
//! link, seen/settled flags), the strategy-ordered frontier and the visited
//! order. Each [`Search::step`] performs exactly one frontier removal, so
//! the caller decides the pace; `pause` is simply not calling `step`.

use std::collections::{BinaryHeap, VecDeque};
use std::fmt;
use std::time::{Duration, Instant};

use daedal_core::{Maze, Point};

use crate::distance::manhattan;
use crate::strategy::Strategy;
use crate::traits::Pather;

/// Sentinel cost meaning "never discovered".
pub const UNREACHABLE: i32 = i32::MAX;

const NO_PARENT: usize = usize::MAX;

/// Terminal or in-flight condition of a search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    InProgress,
    /// The end cell was expanded.
    Found,
    /// The frontier emptied without reaching the end cell.
    Exhausted,
}

impl Status {
    /// Whether the run is over.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::InProgress)
    }
}

/// Outcome of a single [`Search::step`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// One cell left the frontier and was settled.
    Expanded { cell: Point, status: Status },
    /// A stale frontier entry was dropped; no cell was expanded.
    ///
    /// Only the priority strategies produce these: a relaxation re-inserts
    /// a cell, and the superseded entry surfaces later.
    Discarded { cell: Point },
    /// The search is terminal; nothing happened.
    Terminal { status: Status },
}

/// Errors reported by a search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// Path reconstruction found no recorded route to the end cell.
    NoPathFound,
    /// A start or end cell outside the maze was supplied.
    OutOfBounds(Point),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPathFound => write!(f, "no path to the end cell was found"),
            Self::OutOfBounds(p) => write!(f, "cell {p} lies outside the maze"),
        }
    }
}

impl std::error::Error for SearchError {}

/// Per-cell bookkeeping, indexed by flat cell index.
#[derive(Clone)]
struct Node {
    g: i32,
    parent: usize,
    seen: bool,
    settled: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: UNREACHABLE,
            parent: NO_PARENT,
            seen: false,
            settled: false,
        }
    }
}

/// Reference into the node arena, ordered by `f` for use in `BinaryHeap`.
#[derive(Clone, Copy, PartialEq, Eq)]
struct OpenRef {
    idx: usize,
    f: i32,
    seq: u64,
}

impl Ord for OpenRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (a max-heap) pops the smallest f first,
        // ties going to the earliest insertion.
        other.f.cmp(&self.f).then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// The frontier; its removal order defines the strategy.
enum Frontier {
    Fifo(VecDeque<usize>),
    Lifo(Vec<usize>),
    Priority(BinaryHeap<OpenRef>),
}

impl Frontier {
    fn for_strategy(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Bfs => Self::Fifo(VecDeque::new()),
            Strategy::Dfs => Self::Lifo(Vec::new()),
            Strategy::Dijkstra | Strategy::AStar => Self::Priority(BinaryHeap::new()),
        }
    }

    fn push(&mut self, idx: usize, f: i32, seq: u64) {
        match self {
            Self::Fifo(q) => q.push_back(idx),
            Self::Lifo(s) => s.push(idx),
            Self::Priority(h) => h.push(OpenRef { idx, f, seq }),
        }
    }

    fn pop(&mut self) -> Option<usize> {
        match self {
            Self::Fifo(q) => q.pop_front(),
            Self::Lifo(s) => s.pop(),
            Self::Priority(h) => h.pop().map(|r| r.idx),
        }
    }
}

/// One search run over a maze, advanced one expansion at a time.
///
/// A `Search` is built for a specific maze and must be discarded wholesale
/// when that maze is regenerated or the strategy changes; it never reuses
/// state across runs.
pub struct Search {
    strategy: Strategy,
    width: i32,
    height: i32,
    start: Point,
    end: Point,
    end_idx: usize,
    nodes: Vec<Node>,
    frontier: Frontier,
    /// Settled cells, in expansion order.
    visited: Vec<Point>,
    status: Status,
    seq: u64,
    started: Instant,
    finished: Option<Instant>,
    nbuf: Vec<Point>,
}

impl Search {
    /// Start a search over `maze` from `start` to `end`.
    ///
    /// The start cell enters the frontier at cost 0 with no parent. When
    /// `start == end` the run is terminal [`Status::Found`] immediately.
    pub fn new(
        maze: &Maze,
        start: Point,
        end: Point,
        strategy: Strategy,
    ) -> Result<Self, SearchError> {
        for p in [start, end] {
            if !maze.contains(p) {
                return Err(SearchError::OutOfBounds(p));
            }
        }

        let width = maze.width();
        let height = maze.height();
        let len = (width * height) as usize;
        let start_idx = (start.y * width + start.x) as usize;
        let end_idx = (end.y * width + end.x) as usize;

        let mut search = Self {
            strategy,
            width,
            height,
            start,
            end,
            end_idx,
            nodes: vec![Node::default(); len],
            frontier: Frontier::for_strategy(strategy),
            visited: Vec::new(),
            status: Status::InProgress,
            seq: 0,
            started: Instant::now(),
            finished: None,
            nbuf: Vec::with_capacity(4),
        };

        search.nodes[start_idx].g = 0;
        search.nodes[start_idx].seen = true;
        let f0 = match strategy {
            Strategy::AStar => manhattan(start, end),
            _ => 0,
        };
        search.frontier.push(start_idx, f0, 0);

        if start == end {
            search.nodes[start_idx].settled = true;
            search.visited.push(start);
            search.finish(Status::Found);
        }

        Ok(search)
    }

    /// Advance the search by exactly one frontier removal.
    ///
    /// Once terminal, further calls are no-ops returning the same status.
    pub fn step(&mut self, pather: &impl Pather) -> Step {
        if self.status.is_terminal() {
            return Step::Terminal {
                status: self.status,
            };
        }

        let Some(ci) = self.frontier.pop() else {
            self.finish(Status::Exhausted);
            return Step::Terminal {
                status: Status::Exhausted,
            };
        };

        if self.nodes[ci].settled {
            // Superseded by a cheaper re-insertion; not an expansion.
            return Step::Discarded {
                cell: self.point(ci),
            };
        }

        self.nodes[ci].settled = true;
        let cell = self.point(ci);
        self.visited.push(cell);

        if ci == self.end_idx {
            self.finish(Status::Found);
            return Step::Expanded {
                cell,
                status: Status::Found,
            };
        }

        let g = self.nodes[ci].g;
        let relaxing = matches!(self.strategy, Strategy::Dijkstra | Strategy::AStar);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        pather.neighbors(cell, &mut nbuf);

        for &np in nbuf.iter() {
            let Some(ni) = self.idx(np) else {
                continue;
            };
            let tentative = g + 1;
            let n = &mut self.nodes[ni];

            if relaxing {
                if n.settled {
                    continue;
                }
                if n.seen && tentative >= n.g {
                    continue;
                }
                n.seen = true;
                n.g = tentative;
                n.parent = ci;
                let f = match self.strategy {
                    Strategy::AStar => tentative + manhattan(np, self.end),
                    _ => tentative,
                };
                self.seq += 1;
                self.frontier.push(ni, f, self.seq);
            } else {
                // First discovery wins for BFS/DFS.
                if n.seen {
                    continue;
                }
                n.seen = true;
                n.g = tentative;
                n.parent = ci;
                self.seq += 1;
                self.frontier.push(ni, tentative, self.seq);
            }
        }

        self.nbuf = nbuf;
        Step::Expanded {
            cell,
            status: Status::InProgress,
        }
    }

    /// Drive the search to termination. Returns the terminal status.
    pub fn run(&mut self, pather: &impl Pather) -> Status {
        while !self.is_terminal() {
            self.step(pather);
        }
        self.status
    }

    /// Reconstruct the path from start to end, inclusive.
    ///
    /// Walks parent links end → start and reverses. Fails with
    /// [`SearchError::NoPathFound`] when the end cell was never discovered
    /// (and is not the start itself).
    pub fn path(&self) -> Result<Vec<Point>, SearchError> {
        if !self.nodes[self.end_idx].seen && self.start != self.end {
            return Err(SearchError::NoPathFound);
        }

        let mut path = Vec::new();
        let mut ci = self.end_idx;
        loop {
            path.push(self.point(ci));
            let parent = self.nodes[ci].parent;
            if parent == NO_PARENT {
                break;
            }
            ci = parent;
        }
        path.reverse();

        debug_assert_eq!(path.first(), Some(&self.start));
        debug_assert_eq!(path.last(), Some(&self.end));
        // Parents are only recorded across open walls, so grid adjacency is
        // the part worth asserting.
        debug_assert!(path.windows(2).all(|w| manhattan(w[0], w[1]) == 1));

        Ok(path)
    }

    /// Current run status.
    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Whether the run is over.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Settled cells, in expansion order.
    #[inline]
    pub fn visited(&self) -> &[Point] {
        &self.visited
    }

    /// Best-known cost to reach `p`, or [`UNREACHABLE`] if never discovered.
    pub fn cost(&self, p: Point) -> i32 {
        match self.idx(p) {
            Some(i) => self.nodes[i].g,
            None => UNREACHABLE,
        }
    }

    /// The strategy this run was built with.
    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// The start cell.
    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    /// The end cell.
    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    /// Wall-clock time since construction; frozen at the terminal
    /// transition.
    pub fn elapsed(&self) -> Duration {
        self.finished.unwrap_or_else(Instant::now) - self.started
    }

    fn finish(&mut self, status: Status) {
        self.status = status;
        self.finished = Some(Instant::now());
        log::debug!(
            "{} search {:?} after {} expansions",
            self.strategy,
            status,
            self.visited.len()
        );
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if p.x < 0 || p.x >= self.width || p.y < 0 || p.y >= self.height {
            return None;
        }
        Some((p.y * self.width + p.x) as usize)
    }

    #[inline]
    fn point(&self, idx: usize) -> Point {
        let w = self.width as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }
}
