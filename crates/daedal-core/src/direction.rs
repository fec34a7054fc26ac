//! Cardinal directions on the grid.

use std::fmt;

use crate::geom::Point;

/// One of the four cardinal directions.
///
/// North points toward decreasing y (screen coordinates). Each direction
/// owns one bit of a cell's open-wall mask in [`Maze`](crate::Maze).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All four directions, clockwise from North.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit offset of one step in this direction.
    #[inline]
    pub const fn delta(self) -> Point {
        match self {
            Direction::North => Point::new(0, -1),
            Direction::East => Point::new(1, 0),
            Direction::South => Point::new(0, 1),
            Direction::West => Point::new(-1, 0),
        }
    }

    /// The opposite direction.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// This direction's bit in a cell's open-wall mask.
    #[inline]
    pub(crate) const fn bit(self) -> u8 {
        match self {
            Direction::North => 0b0001,
            Direction::East => 0b0010,
            Direction::South => 0b0100,
            Direction::West => 0b1000,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_involution() {
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
        }
    }

    #[test]
    fn deltas_cancel() {
        for d in Direction::ALL {
            assert_eq!(d.delta() + d.opposite().delta(), Point::ZERO);
        }
    }

    #[test]
    fn bits_are_distinct() {
        let mask = Direction::ALL.iter().fold(0u8, |m, d| m | d.bit());
        assert_eq!(mask, 0b1111);
    }
}
