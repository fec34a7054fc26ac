//! **daedal-carve** — perfect-maze generation.
//!
//! A perfect maze is one whose open passages form a spanning tree over the
//! grid graph: every cell reachable from every other through exactly one
//! simple path. [`Carver`] produces such mazes by recursive backtracking;
//! [`generate`] is the seeded one-call convenience.

mod backtracker;

pub use backtracker::{Carver, generate};
