//! Common test utilities and assertion helpers.
//!
//! Pointer gestures, column readers, a content-integrity check and
//! [`RecordingGrid`], a view that logs every call and can be told to fail.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use dragtable::{
    ColumnBox, ColumnContent, Geometry, GridModel, GridRenderer, GridSource, GridView,
    Interaction, MemoryGrid, Point, PointerEvent, ProxyId, ProxyLayer, Rect, Result, Table,
};

// Re-export fixtures for convenience
pub use super::fixtures::*;

// ============================================================================
// Gestures
// ============================================================================

/// Press on header `slot` at its center, one pixel below the top
pub fn press<V: GridView>(table: &mut Table<V>, slot: usize) -> Point {
    let rect = table.view().header_rect(slot).unwrap();
    let at = Point::new(rect.center_x(), rect.top + 1.0);
    table.pointer(PointerEvent::down(slot, at));
    at
}

/// Full drag of header `slot` to page x `to_x`: press, cross the
/// threshold vertically, travel, release
pub fn drag<V: GridView>(table: &mut Table<V>, slot: usize, to_x: f64) -> Interaction {
    let start = press(table, slot);
    let threshold = table.config().drag_threshold;
    table.pointer(PointerEvent::moved(Point::new(start.x, start.y + threshold + 1.0)));
    table.pointer(PointerEvent::moved(Point::new(to_x, start.y)));
    table.pointer(PointerEvent::up(Point::new(to_x, start.y)))
}

/// Press and release on header `slot` with a small jitter, then click
pub fn jittery_click<V: GridView>(
    table: &mut Table<V>,
    slot: usize,
    jitter: (f64, f64),
) -> Interaction {
    let start = press(table, slot);
    let end = Point::new(start.x + jitter.0, start.y + jitter.1);
    table.pointer(PointerEvent::moved(end));
    table.pointer(PointerEvent::up(end))
}

// ============================================================================
// Readers
// ============================================================================

pub fn header_texts<V: GridView>(table: &Table<V>) -> Vec<String> {
    table.model().headers().iter().map(|h| h.text.clone()).collect()
}

pub fn column<V: GridView>(table: &Table<V>, slot: usize) -> Vec<String> {
    table.model().column_values(slot).map(str::to_string).collect()
}

/// Header at slot `i` and every row's cell at slot `i` must be exactly
/// the original column that now sits there
pub fn assert_content_integrity(original: &GridModel, current: &GridModel) {
    assert_eq!(current.column_count(), original.column_count());
    assert_eq!(current.row_count(), original.row_count());
    for (slot, header) in current.headers().iter().enumerate() {
        let source = original.header(header.id.0).expect("known column id");
        assert_eq!(header.text, source.text, "header at slot {slot}");
        for row in current.rows() {
            assert_eq!(
                row.cells[slot],
                original.rows()[row.origin].cells[header.id.0],
                "row {} at slot {slot}",
                row.origin
            );
        }
    }
}

// ============================================================================
// Recording view
// ============================================================================

/// One call made on a [`RecordingGrid`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    CreateProxy,
    MarkDragging,
    PlaceProxy,
    RemoveProxy,
    Hide,
    Show,
    Render,
    Pin(usize),
}

/// A [`MemoryGrid`] that records mutating calls and can fail on demand
#[derive(Debug, Clone)]
pub struct RecordingGrid {
    pub inner: MemoryGrid,
    pub calls: Vec<Call>,
    /// The first call equal to this fails with a DOM error
    pub fail_on: Option<Call>,
}

impl RecordingGrid {
    pub fn new(inner: MemoryGrid) -> Self {
        Self {
            inner,
            calls: Vec::new(),
            fail_on: None,
        }
    }

    pub fn failing_on(mut self, call: Call) -> Self {
        self.fail_on = Some(call);
        self
    }

    pub fn count(&self, call: Call) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }

    fn record(&mut self, call: Call) -> Result<()> {
        if self.fail_on == Some(call) {
            self.fail_on = None;
            return Err(dragtable::DragTableError::Dom(format!("{call:?} refused")));
        }
        self.calls.push(call);
        Ok(())
    }
}

impl GridSource for RecordingGrid {
    fn header_texts(&self) -> Result<Vec<String>> {
        self.inner.header_texts()
    }

    fn row_texts(&self) -> Result<Vec<Vec<String>>> {
        self.inner.row_texts()
    }
}

impl Geometry for RecordingGrid {
    fn grid_rect(&self) -> Result<Rect> {
        self.inner.grid_rect()
    }

    fn header_rect(&self, slot: usize) -> Result<Rect> {
        self.inner.header_rect(slot)
    }

    fn proxy_rect(&self, proxy: ProxyId) -> Result<Rect> {
        self.inner.proxy_rect(proxy)
    }

    fn proxy_box(&self, proxy: ProxyId) -> Result<ColumnBox> {
        self.inner.proxy_box(proxy)
    }
}

impl ProxyLayer for RecordingGrid {
    fn create_proxy(&mut self, content: &ColumnContent, at: Point) -> Result<ProxyId> {
        self.record(Call::CreateProxy)?;
        self.inner.create_proxy(content, at)
    }

    fn mark_dragging(&mut self, proxy: ProxyId) -> Result<()> {
        self.record(Call::MarkDragging)?;
        self.inner.mark_dragging(proxy)
    }

    fn place_proxy(&mut self, proxy: ProxyId, at: Point) -> Result<()> {
        self.record(Call::PlaceProxy)?;
        self.inner.place_proxy(proxy, at)
    }

    fn remove_proxy(&mut self, proxy: ProxyId) -> Result<()> {
        self.record(Call::RemoveProxy)?;
        self.inner.remove_proxy(proxy)
    }

    fn set_grid_hidden(&mut self, hidden: bool) -> Result<()> {
        self.record(if hidden { Call::Hide } else { Call::Show })?;
        self.inner.set_grid_hidden(hidden)
    }
}

impl GridRenderer for RecordingGrid {
    fn render(&mut self, grid: &GridModel) -> Result<()> {
        self.record(Call::Render)?;
        self.inner.render(grid)
    }

    fn pin_column_size(&mut self, slot: usize) -> Result<()> {
        self.record(Call::Pin(slot))?;
        self.inner.pin_column_size(slot)
    }
}
