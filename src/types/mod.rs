//! Data types shared by the drag and sort engines.

mod geometry;
mod grid;
mod pointer;
mod sort_state;

pub use geometry::*;
pub use grid::*;
pub use pointer::*;
pub use sort_state::*;
