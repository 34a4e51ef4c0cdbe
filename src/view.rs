//! Capabilities the engines need from the surrounding view layer.
//!
//! The drag and sort engines never touch the DOM directly. They read the
//! grid through [`GridSource`], measure it through [`Geometry`], float
//! column proxies through [`ProxyLayer`] and write results back through
//! [`GridRenderer`]. [`crate::dom::DomGrid`] implements these on a real
//! `<table>`; [`crate::memory::MemoryGrid`] implements them in memory for
//! the CLI and tests.

use crate::error::Result;
use crate::types::{ColumnBox, ColumnContent, GridModel, Point, Rect};

/// Handle to a floating column proxy created by a [`ProxyLayer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProxyId(pub usize);

/// Ordered header and body cell texts of the live grid
pub trait GridSource {
    fn header_texts(&self) -> Result<Vec<String>>;

    /// One entry per body row, each with one text per header
    fn row_texts(&self) -> Result<Vec<Vec<String>>>;
}

/// Page-coordinate measurements of the grid and its proxies
pub trait Geometry {
    /// Bounding rectangle of the whole grid
    fn grid_rect(&self) -> Result<Rect>;

    /// Bounding rectangle of the header cell at `slot`
    fn header_rect(&self, slot: usize) -> Result<Rect>;

    /// Bounding rectangle of a proxy at its current position
    fn proxy_rect(&self, proxy: ProxyId) -> Result<Rect>;

    /// Rendered content width and border width of a proxy
    fn proxy_box(&self, proxy: ProxyId) -> Result<ColumnBox>;
}

/// Detached, absolutely positioned column visuals
pub trait ProxyLayer {
    /// Build a stack of the column's header and cells with its top-left at `at`
    fn create_proxy(&mut self, content: &ColumnContent, at: Point) -> Result<ProxyId>;

    /// Flag the proxy that follows the pointer
    fn mark_dragging(&mut self, proxy: ProxyId) -> Result<()>;

    /// Move a proxy so its top-left sits at `at`
    fn place_proxy(&mut self, proxy: ProxyId, at: Point) -> Result<()>;

    fn remove_proxy(&mut self, proxy: ProxyId) -> Result<()>;

    /// Hide or show the live grid while proxies stand in for it
    fn set_grid_hidden(&mut self, hidden: bool) -> Result<()>;
}

/// Writes model state back to the live grid
pub trait GridRenderer {
    /// Re-render headers (text and sort indicator) and rows in model order
    fn render(&mut self, grid: &GridModel) -> Result<()>;

    /// Freeze the current size of the header and cells at `slot`.
    ///
    /// Called before a sort so the indicator glyph cannot resize the column.
    fn pin_column_size(&mut self, slot: usize) -> Result<()>;
}

/// Everything a [`crate::Table`] needs from its view
pub trait GridView: GridSource + Geometry + ProxyLayer + GridRenderer {}

impl<T: GridSource + Geometry + ProxyLayer + GridRenderer> GridView for T {}
