//! Test fixtures for building grids and tables in memory.
//!
//! # Example
//!
//! ```rust,ignore
//! use fixtures::GridBuilder;
//!
//! let mut table = GridBuilder::new(&["name", "score"])
//!     .row(&["alice", "9"])
//!     .row(&["bob", "7"])
//!     .build_table();
//! table.click(1).unwrap();
//! ```
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use dragtable::{MemoryGrid, Point, Table, TableConfig};

/// Builder for an in-memory grid
#[derive(Debug, Clone, Default)]
pub struct GridBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    widths: Option<Vec<f64>>,
    origin: Option<Point>,
    border: Option<f64>,
}

impl GridBuilder {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| (*h).to_string()).collect(),
            ..Self::default()
        }
    }

    /// Headers `c0..cN` and `rows` rows of `r{row}c{col}` cells
    pub fn numbered(cols: usize, rows: usize) -> Self {
        let mut builder = Self {
            headers: (0..cols).map(|c| format!("c{c}")).collect(),
            ..Self::default()
        };
        for r in 0..rows {
            builder.rows.push((0..cols).map(|c| format!("r{r}c{c}")).collect());
        }
        builder
    }

    pub fn row(mut self, cells: &[&str]) -> Self {
        self.rows.push(cells.iter().map(|c| (*c).to_string()).collect());
        self
    }

    /// One single-cell row per value
    pub fn column_values(mut self, values: &[&str]) -> Self {
        for value in values {
            self.rows.push(vec![(*value).to_string()]);
        }
        self
    }

    pub fn widths(mut self, widths: &[f64]) -> Self {
        self.widths = Some(widths.to_vec());
        self
    }

    pub fn origin(mut self, x: f64, y: f64) -> Self {
        self.origin = Some(Point::new(x, y));
        self
    }

    pub fn border(mut self, border: f64) -> Self {
        self.border = Some(border);
        self
    }

    pub fn build_view(&self) -> MemoryGrid {
        let mut view = MemoryGrid::new(self.headers.clone(), self.rows.clone());
        if let Some(widths) = &self.widths {
            view = view.with_column_widths(widths.clone());
        }
        if let Some(origin) = self.origin {
            view = view.with_origin(origin);
        }
        if let Some(border) = self.border {
            view = view.with_border(border);
        }
        view
    }

    pub fn build_table(&self) -> Table<MemoryGrid> {
        self.build_table_with(TableConfig::default())
    }

    pub fn build_table_with(&self, config: TableConfig) -> Table<MemoryGrid> {
        Table::new(self.build_view(), config).expect("valid table")
    }
}
