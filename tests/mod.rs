//! Integration tests for dragtable.
//!
//! This module provides the shared test infrastructure:
//!
//! - `fixtures`: Builders for in-memory grids and tables
//! - `common`: Pointer gestures, readers, assertion helpers and a
//!   recording view
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use crate::common::{drag, header_texts, GridBuilder};
//!
//! fn test_drag_first_column_to_end() {
//!     let mut table = GridBuilder::numbered(3, 2).build_table();
//!     drag(&mut table, 0, 400.0);
//!     assert_eq!(header_texts(&table), vec!["c1", "c2", "c0"]);
//! }
//! ```
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

pub mod common;
pub mod fixtures;
