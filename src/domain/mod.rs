//! This module owns the grid state.
//! A generation is one full copy of the grid, stored as a linear buffer
//! over an `AABB`. `GridStore` keeps the two generations a run
//! alternates between.

mod grid_store;
mod view;

pub use grid_store::*;
pub use view::*;
