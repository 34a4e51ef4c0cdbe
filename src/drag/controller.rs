//! Drag state machine for live column reordering.
//!
//! `Idle -> Armed -> Dragging -> Idle`. A press on a header arms the
//! controller; once the pointer travels past the threshold every column is
//! captured into a proxy and the dragged one follows the pointer. Each
//! move may re-slot it among its siblings, after which the others are
//! repacked and the centers recomputed. Release hands the captured order
//! back to the caller for commit.

use super::proxy::{Column, ColumnProxyFactory};
use crate::error::{DragTableError, Result};
use crate::layout::{pack, reslot, target_slot};
use crate::types::{GridModel, Point};
use crate::view::{Geometry, ProxyLayer};

/// Default displacement (px) that turns a press into a drag
pub const DEFAULT_DRAG_THRESHOLD: f64 = 3.0;

/// A press on a header that has not moved far enough to be a drag yet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmedPress {
    pub origin_index: usize,
    pub start: Point,
    /// Pointer position minus the header's top-left
    pub pointer_shift: Point,
}

/// State of one live drag, from threshold crossing to release
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub origin_index: usize,
    /// Slot currently held by the dragged column
    pub current_index: usize,
    pub pointer_shift: Point,
    /// Page x of the grid's left edge, where packing starts
    pub grid_left: f64,
    /// Column midpoints in slot order, ascending
    pub centers: Vec<f64>,
    /// Working copy of every column, reordered in place
    pub captured: Vec<Column>,
}

impl DragSession {
    /// Follow the pointer and re-slot the dragged column if needed.
    ///
    /// Returns `(from, to)` when the column changed slots.
    pub fn track<V: ProxyLayer>(
        &mut self,
        view: &mut V,
        at: Point,
    ) -> Result<Option<(usize, usize)>> {
        let dragged = self
            .captured
            .get(self.current_index)
            .ok_or(DragTableError::ColumnOutOfRange {
                index: self.current_index,
                count: self.captured.len(),
            })?;
        view.place_proxy(dragged.proxy, at.offset_from(self.pointer_shift))?;

        let target = target_slot(&self.centers, at.x);
        let from = self.current_index;
        let Some(landing) = reslot(&mut self.captured, from, target) else {
            return Ok(None);
        };
        self.current_index = landing;
        self.repack(view)?;
        Ok(Some((from, landing)))
    }

    /// Lay columns out left to right, leaving the dragged column's slot
    /// open as a gap, then recompute the centers.
    fn repack<V: ProxyLayer>(&mut self, view: &mut V) -> Result<()> {
        let slots = pack(self.captured.iter().map(|c| c.metrics), self.grid_left);
        for (i, (column, slot)) in self.captured.iter_mut().zip(slots).enumerate() {
            column.index = i;
            column.left_offset = slot.left - self.grid_left;
            column.center_x = slot.center_x;
            if i != self.current_index {
                view.place_proxy(column.proxy, Point::new(slot.left, column.top))?;
            }
        }
        self.centers = self.captured.iter().map(|c| c.center_x).collect();
        Ok(())
    }

    /// Captured columns in their final order
    pub fn into_columns(self) -> Vec<Column> {
        self.captured
    }
}

/// True once the pointer has left the square of half-width `threshold`
fn exceeds_threshold(threshold: f64, start: Point, at: Point) -> bool {
    let delta = at.offset_from(start);
    delta.x.abs() > threshold || delta.y.abs() > threshold
}

/// Controller state
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Armed(ArmedPress),
    Dragging(DragSession),
}

/// What a single pointer event did to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragStep {
    /// Nothing to do in the current state
    Ignored,
    /// A header press was recorded
    Armed,
    /// Still under the threshold
    Held,
    /// The threshold was crossed; proxies are up
    Started,
    /// The dragged proxy followed the pointer without changing slots
    Moved,
    /// The dragged column moved from one slot to another
    Reslotted { from: usize, to: usize },
}

/// Outcome of releasing the pointer
#[derive(Debug, Clone, PartialEq)]
pub enum Release {
    /// No interaction was in progress
    Idle,
    /// The press never became a drag; the click path owns it
    Press { slot: usize },
    /// A drag ended; the session holds the final column order
    Drop(DragSession),
}

/// Owns the drag state machine
#[derive(Debug, Clone, PartialEq)]
pub struct DragReorderController {
    state: DragState,
    threshold: f64,
}

impl Default for DragReorderController {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD)
    }
}

impl DragReorderController {
    pub fn new(threshold: f64) -> Self {
        Self {
            state: DragState::Idle,
            threshold,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, DragState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Pointer pressed on the header at `slot`
    pub fn press<V: Geometry>(&mut self, view: &V, slot: usize, at: Point) -> Result<DragStep> {
        if !self.is_idle() {
            return Ok(DragStep::Ignored);
        }
        let header = view.header_rect(slot)?;
        self.state = DragState::Armed(ArmedPress {
            origin_index: slot,
            start: at,
            pointer_shift: at.offset_from(header.top_left()),
        });
        log::debug!("armed on header {slot}");
        Ok(DragStep::Armed)
    }

    /// Pointer moved to `at`
    pub fn motion<V: Geometry + ProxyLayer>(
        &mut self,
        view: &mut V,
        grid: &GridModel,
        at: Point,
    ) -> Result<DragStep> {
        let threshold = self.threshold;
        match &mut self.state {
            DragState::Idle => Ok(DragStep::Ignored),
            DragState::Armed(press) => {
                let press = *press;
                if !exceeds_threshold(threshold, press.start, at) {
                    return Ok(DragStep::Held);
                }
                let session = Self::start(view, grid, press)?;
                log::debug!(
                    "drag started on column {} ({} columns captured)",
                    session.origin_index,
                    session.captured.len()
                );
                self.state = DragState::Dragging(session);
                Ok(DragStep::Started)
            }
            DragState::Dragging(session) => {
                log::trace!("drag move to ({}, {})", at.x, at.y);
                match session.track(view, at)? {
                    Some((from, to)) => {
                        log::debug!("column re-slotted {from} -> {to}");
                        Ok(DragStep::Reslotted { from, to })
                    }
                    None => Ok(DragStep::Moved),
                }
            }
        }
    }

    /// Pointer released; the controller is `Idle` afterwards
    pub fn release(&mut self) -> Release {
        match std::mem::take(&mut self.state) {
            DragState::Idle => Release::Idle,
            DragState::Armed(press) => Release::Press {
                slot: press.origin_index,
            },
            DragState::Dragging(session) => {
                log::debug!(
                    "drag released: column {} landed on slot {}",
                    session.origin_index,
                    session.current_index
                );
                Release::Drop(session)
            }
        }
    }

    /// Tear down without committing: proxies go away and the grid shows again
    pub fn abort<V: ProxyLayer>(&mut self, view: &mut V) {
        if let DragState::Dragging(session) = std::mem::take(&mut self.state) {
            ColumnProxyFactory::discard(view, &session.captured);
            if let Err(e) = view.set_grid_hidden(false) {
                log::warn!("failed to restore grid after aborted drag: {e}");
            }
        }
    }

    fn start<V: Geometry + ProxyLayer>(
        view: &mut V,
        grid: &GridModel,
        press: ArmedPress,
    ) -> Result<DragSession> {
        let grid_left = view.grid_rect()?.left;
        let captured = ColumnProxyFactory::capture(view, grid, grid_left)?;
        let setup = captured
            .get(press.origin_index)
            .ok_or(DragTableError::ColumnOutOfRange {
                index: press.origin_index,
                count: captured.len(),
            })
            .and_then(|dragged| view.mark_dragging(dragged.proxy))
            .and_then(|()| view.set_grid_hidden(true));
        if let Err(e) = setup {
            ColumnProxyFactory::discard(view, &captured);
            return Err(e);
        }

        let centers = captured.iter().map(|c| c.center_x).collect();
        Ok(DragSession {
            origin_index: press.origin_index,
            current_index: press.origin_index,
            pointer_shift: press.pointer_shift,
            grid_left,
            centers,
            captured,
        })
    }
}
