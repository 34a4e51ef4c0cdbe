//! In-memory view for native use (CLI, benches, tests).
//!
//! `MemoryGrid` stands in for a rendered `<table>`: columns are laid out
//! side by side from a fixed origin with uniform row height, proxies are
//! plain records, and rendering copies the model's texts and indicators.

use crate::error::{DragTableError, Result};
use crate::layout::pack;
use crate::types::{ColumnBox, ColumnContent, ColumnId, GridModel, Point, Rect, SortState};
use crate::view::{Geometry, GridRenderer, GridSource, ProxyId, ProxyLayer};

/// Default content width of a column in pixels
pub const DEFAULT_COLUMN_WIDTH: f64 = 100.0;

/// Default height of the header and of every body row in pixels
pub const DEFAULT_ROW_HEIGHT: f64 = 20.0;

/// A floating column proxy
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryProxy {
    pub content: ColumnContent,
    /// Top-left in page coordinates
    pub at: Point,
    pub metrics: ColumnBox,
    pub dragging: bool,
}

/// A grid held in memory with synthetic geometry
#[derive(Debug, Clone)]
pub struct MemoryGrid {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    /// Column identity per slot as of the last render
    ids: Vec<ColumnId>,
    sort_states: Vec<SortState>,
    /// Content width per column id
    widths: Vec<f64>,
    border: f64,
    row_height: f64,
    origin: Point,
    proxies: Vec<Option<MemoryProxy>>,
    hidden: bool,
    pinned: Vec<usize>,
    renders: usize,
}

impl MemoryGrid {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let count = headers.len();
        Self {
            headers,
            rows,
            ids: (0..count).map(ColumnId).collect(),
            sort_states: vec![SortState::Unsorted; count],
            widths: vec![DEFAULT_COLUMN_WIDTH; count],
            border: 1.0,
            row_height: DEFAULT_ROW_HEIGHT,
            origin: Point::default(),
            proxies: Vec::new(),
            hidden: false,
            pinned: Vec::new(),
            renders: 0,
        }
    }

    /// Content widths by original column position
    #[must_use]
    pub fn with_column_widths(mut self, widths: Vec<f64>) -> Self {
        self.widths = widths;
        self
    }

    /// Page coordinates of the grid's top-left corner
    #[must_use]
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    #[must_use]
    pub fn with_border(mut self, border: f64) -> Self {
        self.border = border;
        self
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Sort indicators as of the last render
    pub fn sort_states(&self) -> &[SortState] {
        &self.sort_states
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn render_count(&self) -> usize {
        self.renders
    }

    /// Slots pinned before sorting, in call order
    pub fn pinned(&self) -> &[usize] {
        &self.pinned
    }

    pub fn proxy(&self, id: ProxyId) -> Option<&MemoryProxy> {
        self.proxies.get(id.0).and_then(Option::as_ref)
    }

    /// Proxies that have been created and not yet removed
    pub fn live_proxies(&self) -> impl Iterator<Item = (ProxyId, &MemoryProxy)> + '_ {
        self.proxies
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.as_ref().map(|p| (ProxyId(i), p)))
    }

    /// Horizontal midpoint of the header at `slot`
    pub fn header_center(&self, slot: usize) -> Option<f64> {
        self.header_rect(slot).ok().map(|r| r.center_x())
    }

    fn column_box(&self, id: ColumnId) -> ColumnBox {
        let width = self
            .widths
            .get(id.0)
            .copied()
            .unwrap_or(DEFAULT_COLUMN_WIDTH);
        ColumnBox::new(width, self.border)
    }

    fn boxes(&self) -> Vec<ColumnBox> {
        self.ids.iter().map(|&id| self.column_box(id)).collect()
    }

    fn height(&self) -> f64 {
        let rows = (self.rows.len() + 1) as f64;
        rows * self.row_height
    }

    fn proxy_entry(&self, id: ProxyId) -> Result<&MemoryProxy> {
        self.proxy(id)
            .ok_or_else(|| DragTableError::Other(format!("unknown proxy {}", id.0)))
    }

    fn proxy_entry_mut(&mut self, id: ProxyId) -> Result<&mut MemoryProxy> {
        self.proxies
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or_else(|| DragTableError::Other(format!("unknown proxy {}", id.0)))
    }
}

impl GridSource for MemoryGrid {
    fn header_texts(&self) -> Result<Vec<String>> {
        Ok(self.headers.clone())
    }

    fn row_texts(&self) -> Result<Vec<Vec<String>>> {
        Ok(self.rows.clone())
    }
}

impl Geometry for MemoryGrid {
    fn grid_rect(&self) -> Result<Rect> {
        let boxes = self.boxes();
        let right = pack(boxes.iter().copied(), self.origin.x)
            .last()
            .zip(boxes.last())
            .map_or(self.origin.x, |(slot, b)| slot.left + b.outer_width());
        Ok(Rect::new(
            self.origin.x,
            self.origin.y,
            right,
            self.origin.y + self.height(),
        ))
    }

    fn header_rect(&self, slot: usize) -> Result<Rect> {
        let boxes = self.boxes();
        let count = boxes.len();
        let packed = pack(boxes.iter().copied(), self.origin.x);
        let (left, b) = packed
            .get(slot)
            .zip(boxes.get(slot))
            .map(|(s, b)| (s.left, *b))
            .ok_or(DragTableError::ColumnOutOfRange { index: slot, count })?;
        Ok(Rect::new(
            left,
            self.origin.y,
            left + b.outer_width(),
            self.origin.y + self.row_height,
        ))
    }

    fn proxy_rect(&self, proxy: ProxyId) -> Result<Rect> {
        let p = self.proxy_entry(proxy)?;
        Ok(Rect::new(
            p.at.x,
            p.at.y,
            p.at.x + p.metrics.outer_width(),
            p.at.y + self.height(),
        ))
    }

    fn proxy_box(&self, proxy: ProxyId) -> Result<ColumnBox> {
        Ok(self.proxy_entry(proxy)?.metrics)
    }
}

impl ProxyLayer for MemoryGrid {
    fn create_proxy(&mut self, content: &ColumnContent, at: Point) -> Result<ProxyId> {
        let metrics = self.column_box(content.header.id);
        self.proxies.push(Some(MemoryProxy {
            content: content.clone(),
            at,
            metrics,
            dragging: false,
        }));
        Ok(ProxyId(self.proxies.len() - 1))
    }

    fn mark_dragging(&mut self, proxy: ProxyId) -> Result<()> {
        self.proxy_entry_mut(proxy)?.dragging = true;
        Ok(())
    }

    fn place_proxy(&mut self, proxy: ProxyId, at: Point) -> Result<()> {
        self.proxy_entry_mut(proxy)?.at = at;
        Ok(())
    }

    fn remove_proxy(&mut self, proxy: ProxyId) -> Result<()> {
        let slot = self
            .proxies
            .get_mut(proxy.0)
            .ok_or_else(|| DragTableError::Other(format!("unknown proxy {}", proxy.0)))?;
        *slot = None;
        if self.proxies.iter().all(Option::is_none) {
            self.proxies.clear();
        }
        Ok(())
    }

    fn set_grid_hidden(&mut self, hidden: bool) -> Result<()> {
        self.hidden = hidden;
        Ok(())
    }
}

impl GridRenderer for MemoryGrid {
    fn render(&mut self, grid: &GridModel) -> Result<()> {
        self.headers = grid.headers().iter().map(|h| h.text.clone()).collect();
        self.ids = grid.column_order();
        self.sort_states = grid.sort_states();
        self.rows = grid.rows().iter().map(|r| r.cells.clone()).collect();
        self.renders += 1;
        Ok(())
    }

    fn pin_column_size(&mut self, slot: usize) -> Result<()> {
        if slot >= self.headers.len() {
            return Err(DragTableError::ColumnOutOfRange {
                index: slot,
                count: self.headers.len(),
            });
        }
        self.pinned.push(slot);
        Ok(())
    }
}
