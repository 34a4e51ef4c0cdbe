//! Geometry of a column drag.
//!
//! This module handles:
//! - Finding the slot under the pointer by scanning column centers
//! - The dead zone and index adjustment when the dragged column re-slots
//! - Repacking columns along a running frontier after each re-slot

mod frontier;
mod slots;

pub use frontier::{pack, PackedSlot};
pub use slots::{landing_index, reslot, target_slot};
