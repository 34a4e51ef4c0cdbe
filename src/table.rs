//! The platform-independent widget.
//!
//! [`Table`] owns the model, the drag controller and the sort engine and
//! routes pointer events and header clicks between them. It talks to the
//! screen only through a [`GridView`], so the same code drives a DOM
//! `<table>` in the browser and a [`crate::memory::MemoryGrid`] natively.

use crate::commit;
use crate::config::TableConfig;
use crate::drag::{DragReorderController, DragStep, Release};
use crate::error::Result;
use crate::sort::SortEngine;
use crate::types::{ColumnId, GridModel, PointerEvent, PointerPhase, SortState};
use crate::view::GridView;

/// What a pointer event amounted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Nothing happened (no header under a press, or the event failed)
    Ignored,
    /// The drag controller advanced
    Step(DragStep),
    /// A press ended under the threshold; the click that follows sorts
    Pressed { slot: usize },
    /// A drag was committed
    Dropped { from: usize, to: usize },
}

/// A sortable table with draggable columns
#[derive(Debug)]
pub struct Table<V> {
    view: V,
    grid: GridModel,
    controller: DragReorderController,
    sorter: SortEngine,
    config: TableConfig,
    /// Set when a drag was dropped so the click the browser may still
    /// deliver for the same press does not sort
    suppress_click: bool,
}

impl<V: GridView> Table<V> {
    /// Snapshot the view and show every header as unsorted.
    ///
    /// # Errors
    /// Fails on invalid options, an empty or ragged grid, or a view error.
    pub fn new(mut view: V, config: TableConfig) -> Result<Self> {
        config.validate()?;
        let grid = commit::snapshot(&view)?;
        view.render(&grid)?;
        log::debug!(
            "table ready: {} columns, {} rows",
            grid.column_count(),
            grid.row_count()
        );
        Ok(Self {
            view,
            grid,
            controller: DragReorderController::new(config.drag_threshold),
            sorter: SortEngine::new(config.compare_policy),
            config,
            suppress_click: false,
        })
    }

    /// Feed one pointer event.
    ///
    /// View errors are logged and end the interaction; they never reach
    /// the caller.
    pub fn pointer(&mut self, event: PointerEvent) -> Interaction {
        let result = match event.phase {
            PointerPhase::Down => self.press(event),
            PointerPhase::Move => self
                .controller
                .motion(&mut self.view, &self.grid, event.position)
                .map(Interaction::Step),
            PointerPhase::Up => self.release(),
        };
        result.unwrap_or_else(|e| {
            log::warn!("pointer {:?} failed, interaction dropped: {e}", event.phase);
            self.controller.abort(&mut self.view);
            Interaction::Ignored
        })
    }

    fn press(&mut self, event: PointerEvent) -> Result<Interaction> {
        self.suppress_click = false;
        let Some(slot) = event.header else {
            return Ok(Interaction::Ignored);
        };
        let step = self.controller.press(&self.view, slot, event.position)?;
        Ok(Interaction::Step(step))
    }

    fn release(&mut self) -> Result<Interaction> {
        match self.controller.release() {
            Release::Idle => Ok(Interaction::Ignored),
            Release::Press { slot } => Ok(Interaction::Pressed { slot }),
            Release::Drop(session) => {
                let (from, to) = (session.origin_index, session.current_index);
                self.suppress_click = true;
                commit::apply_drop(&mut self.view, &mut self.grid, session)?;
                log::debug!("column {from} dropped on slot {to}");
                Ok(Interaction::Dropped { from, to })
            }
        }
    }

    /// Header click at `slot`.
    ///
    /// Returns the header's new sort state, or `None` when the click
    /// belongs to a drag and is ignored.
    ///
    /// # Errors
    /// Fails for a slot past the end or when the view cannot be updated.
    pub fn click(&mut self, slot: usize) -> Result<Option<SortState>> {
        if std::mem::take(&mut self.suppress_click) {
            log::debug!("click on header {slot} ignored after drag");
            return Ok(None);
        }
        if !self.controller.is_idle() {
            return Ok(None);
        }
        self.view.pin_column_size(slot)?;
        let state = self.sorter.toggle(&mut self.grid, slot)?;
        commit::apply_sort(&mut self.view, &mut self.grid)?;
        Ok(Some(state))
    }

    /// Move the column at `from` to slot `to` without a pointer.
    ///
    /// Any drag in progress is abandoned first.
    ///
    /// # Errors
    /// Fails if either slot is out of range or the view cannot be updated.
    pub fn move_column(&mut self, from: usize, to: usize) -> Result<()> {
        self.controller.abort(&mut self.view);
        commit::move_column(&mut self.grid, from, to)?;
        commit::apply_sort(&mut self.view, &mut self.grid)?;
        log::debug!("column {from} moved to slot {to}");
        Ok(())
    }

    /// Unsort every header and put rows back in their original order.
    ///
    /// Column order is kept.
    ///
    /// # Errors
    /// Fails when the view cannot be updated.
    pub fn reset(&mut self) -> Result<()> {
        self.controller.abort(&mut self.view);
        self.suppress_click = false;
        self.grid.clear_sort();
        self.grid.restore_row_order();
        commit::apply_sort(&mut self.view, &mut self.grid)
    }

    pub fn model(&self) -> &GridModel {
        &self.grid
    }

    pub fn sort_states(&self) -> Vec<SortState> {
        self.grid.sort_states()
    }

    /// Original column ids in current left-to-right order
    pub fn column_order(&self) -> Vec<ColumnId> {
        self.grid.column_order()
    }

    pub fn controller(&self) -> &DragReorderController {
        &self.controller
    }

    /// True between a header press and the matching release
    pub fn is_interacting(&self) -> bool {
        !self.controller.is_idle()
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::memory::MemoryGrid;
    use crate::types::Point;

    fn table() -> Table<MemoryGrid> {
        let view = MemoryGrid::new(
            vec!["n".into(), "name".into(), "score".into()],
            vec![
                vec!["1".into(), "carol".into(), "7".into()],
                vec!["2".into(), "alice".into(), "9".into()],
                vec!["3".into(), "bob".into(), "8".into()],
            ],
        );
        Table::new(view, TableConfig::default()).unwrap()
    }

    #[test]
    fn test_new_renders_unsorted_headers() {
        let t = table();
        assert_eq!(t.view().render_count(), 1);
        assert_eq!(t.view().sort_states(), &[SortState::Unsorted; 3]);
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let view = MemoryGrid::new(vec!["a".into()], Vec::new());
        let config = TableConfig {
            drag_threshold: f64::NAN,
            ..TableConfig::default()
        };
        assert!(Table::new(view, config).is_err());
    }

    #[test]
    fn test_press_without_header_is_ignored() {
        let mut t = table();
        let event = PointerEvent {
            header: None,
            ..PointerEvent::down(0, Point::new(10.0, 10.0))
        };
        assert_eq!(t.pointer(event), Interaction::Ignored);
        assert!(!t.is_interacting());
    }

    #[test]
    fn test_click_sorts_and_pins() {
        let mut t = table();
        assert_eq!(t.click(1).unwrap(), Some(SortState::Ascending));
        assert_eq!(t.view().pinned(), &[1]);
        let names: Vec<&str> = t.model().column_values(1).collect();
        assert_eq!(names, vec!["alice", "bob", "carol"]);
        assert_eq!(t.view().rows()[0][1], "alice");
    }

    #[test]
    fn test_drag_then_click_is_swallowed() {
        let mut t = table();
        t.pointer(PointerEvent::down(0, Point::new(50.0, 10.0)));
        t.pointer(PointerEvent::moved(Point::new(60.0, 10.0)));
        t.pointer(PointerEvent::moved(Point::new(260.0, 10.0)));
        assert_eq!(
            t.pointer(PointerEvent::up(Point::new(260.0, 10.0))),
            Interaction::Dropped { from: 0, to: 2 }
        );
        assert_eq!(t.click(2).unwrap(), None);
        assert_eq!(t.click(2).unwrap(), Some(SortState::Ascending));
    }

    #[test]
    fn test_reset_restores_rows_and_indicators() {
        let mut t = table();
        t.click(2).unwrap();
        t.click(2).unwrap();
        t.move_column(2, 0).unwrap();
        t.reset().unwrap();

        assert_eq!(t.sort_states(), vec![SortState::Unsorted; 3]);
        let ns: Vec<&str> = t.model().column_values(1).collect();
        assert_eq!(ns, vec!["1", "2", "3"]);
        assert_eq!(
            t.column_order(),
            vec![ColumnId(2), ColumnId(0), ColumnId(1)]
        );
    }
}
