//! dragtable - drag-to-reorder columns and click-to-sort rows for HTML tables
//!
//! Turns a plain `<table>` into an interactive grid via WebAssembly:
//! - Drag a header sideways to move its whole column; the other columns
//!   slide aside live to show where it will land
//! - Click a header to sort rows by that column, click again to reverse
//! - Mouse and touch input
//! - All logic is plain Rust and runs natively against an in-memory grid
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { DragTable } from 'dragtable';
//! await init();
//! const table = new DragTable('#grid', { comparePolicy: 'legacy' });
//! table.sortStates(); // ["unsorted", "ascending", ...]
//! ```
//!
//! # Usage (Rust)
//!
//! ```
//! use dragtable::{MemoryGrid, Table, TableConfig, SortState};
//!
//! let view = MemoryGrid::new(
//!     vec!["n".to_string()],
//!     vec![vec!["3".to_string()], vec!["1".to_string()], vec!["2".to_string()]],
//! );
//! let mut table = Table::new(view, TableConfig::default())?;
//! assert_eq!(table.click(0)?, Some(SortState::Ascending));
//! # Ok::<(), dragtable::DragTableError>(())
//! ```

pub mod commit;
pub mod config;
pub mod csv;
pub mod drag;
pub mod error;
pub mod layout;
pub mod logging;
pub mod memory;
pub mod sort;
pub mod table;
pub mod types;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod dom;

use wasm_bindgen::prelude::*;

pub use config::{ClassNames, TableConfig};
pub use drag::{ColumnProxyFactory, DragReorderController, DragSession, DragState, DragStep};
pub use error::{DragTableError, Result};
pub use memory::MemoryGrid;
pub use sort::{ComparePolicy, SortEngine};
pub use table::{Interaction, Table};
pub use types::*;
pub use view::{Geometry, GridRenderer, GridSource, GridView, ProxyId, ProxyLayer};

#[cfg(target_arch = "wasm32")]
pub use dom::{DomGrid, DragTable};

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
