//! Strategy selection.

use std::fmt;
use std::str::FromStr;

/// Which frontier policy a [`Search`](crate::Search) removes cells by.
///
/// The engine's stepping logic is identical across all four; only the
/// frontier order (and, for A*, the cost shaping) differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Breadth-first: FIFO frontier. Optimal on unit-cost grids.
    Bfs,
    /// Depth-first: LIFO frontier. Finds *a* path, not necessarily short.
    Dfs,
    /// Uniform-cost: min-priority frontier on accumulated cost.
    Dijkstra,
    /// Best-first on accumulated cost plus the Manhattan heuristic.
    AStar,
}

impl Strategy {
    /// All strategies, in display order.
    pub const ALL: [Strategy; 4] = [
        Strategy::Bfs,
        Strategy::Dfs,
        Strategy::Dijkstra,
        Strategy::AStar,
    ];

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Bfs => "BFS",
            Strategy::Dfs => "DFS",
            Strategy::Dijkstra => "Dijkstra",
            Strategy::AStar => "A*",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unrecognized strategy tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidStrategy(pub String);

impl fmt::Display for InvalidStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized strategy {:?}", self.0)
    }
}

impl std::error::Error for InvalidStrategy {}

impl FromStr for Strategy {
    type Err = InvalidStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" => Ok(Strategy::Bfs),
            "dfs" => Ok(Strategy::Dfs),
            "dijkstra" => Ok(Strategy::Dijkstra),
            "astar" | "a*" | "a-star" => Ok(Strategy::AStar),
            _ => Err(InvalidStrategy(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepted_tags() {
        assert_eq!("bfs".parse::<Strategy>().unwrap(), Strategy::Bfs);
        assert_eq!("DFS".parse::<Strategy>().unwrap(), Strategy::Dfs);
        assert_eq!("Dijkstra".parse::<Strategy>().unwrap(), Strategy::Dijkstra);
        assert_eq!("a*".parse::<Strategy>().unwrap(), Strategy::AStar);
        assert_eq!("astar".parse::<Strategy>().unwrap(), Strategy::AStar);
    }

    #[test]
    fn parse_rejects_unknown_tags() {
        let err = "best-first".parse::<Strategy>().unwrap_err();
        assert_eq!(err, InvalidStrategy("best-first".to_string()));
        assert!(err.to_string().contains("best-first"));
    }

    #[test]
    fn display_round_trips() {
        for s in Strategy::ALL {
            assert_eq!(s.to_string().parse::<Strategy>().unwrap(), s);
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn strategy_round_trip() {
        for s in Strategy::ALL {
            let json = serde_json::to_string(&s).unwrap();
            let back: Strategy = serde_json::from_str(&json).unwrap();
            assert_eq!(s, back);
        }
    }
}
