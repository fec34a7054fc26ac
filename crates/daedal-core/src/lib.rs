//! **daedal-core** — maze grid data model and geometry primitives.
//!
//! This crate provides the foundational types used across the *daedal*
//! workspace: an integer [`Point`], the four cardinal [`Direction`]s, and
//! the wall-state [`Maze`] grid that the generator carves and the search
//! engine traverses.

pub mod direction;
pub mod geom;
pub mod maze;

pub use direction::Direction;
pub use geom::Point;
pub use maze::{Maze, MazeError};
