//! Spatial partitioning data structures
//!
//! Grid-based navigation for agents moving through the maze.

mod nav_grid;

pub use nav_grid::{Cell, NavGrid};
