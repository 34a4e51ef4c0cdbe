//! Delimited data tests for dragtable
//!
//! Loads CSV/TSV text into a table, drives it, and writes it back out.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;
mod fixtures;

use std::path::Path;

use common::drag;
use dragtable::csv::{parse_delimited, read_path, to_delimited, Delimiter};
use dragtable::{DragTableError, MemoryGrid, Table, TableConfig};

const PEOPLE: &str = "\u{feff}name,age,city\n\
                      Carol,0,\"Paris, FR\"\n\
                      \n\
                      alice,31,Oslo\n\
                      Bob,7,\"the \"\"Hub\"\"\"\n";

fn table_from(text: &str) -> Table<MemoryGrid> {
    let data = parse_delimited(text.as_bytes(), Delimiter::Comma).unwrap();
    Table::new(MemoryGrid::new(data.headers, data.rows), TableConfig::default()).unwrap()
}

#[test]
fn test_parse_skips_bom_and_blank_lines() {
    let data = parse_delimited(PEOPLE.as_bytes(), Delimiter::Comma).unwrap();
    assert_eq!(data.headers, vec!["name", "age", "city"]);
    assert_eq!(data.rows.len(), 3);
    assert_eq!(data.rows[0], vec!["Carol", "0", "Paris, FR"]);
    assert_eq!(data.rows[2], vec!["Bob", "7", "the \"Hub\""]);
}

#[test]
fn test_sort_then_write() {
    let mut table = table_from(PEOPLE);
    table.click(1).unwrap();
    // "0" sorts as text, ahead of "31" and "7" by their first byte
    assert_eq!(
        to_delimited(table.model(), Delimiter::Comma),
        "name,age,city\n\
         Carol,0,\"Paris, FR\"\n\
         Bob,7,\"the \"\"Hub\"\"\"\n\
         alice,31,Oslo\n"
    );
}

#[test]
fn test_drag_then_write_tsv() {
    let mut table = table_from(PEOPLE);
    drag(&mut table, 2, 0.0);
    assert_eq!(
        to_delimited(table.model(), Delimiter::Tab),
        "city\tname\tage\n\
         Paris, FR\tCarol\t0\n\
         Oslo\talice\t31\n\
         \"the \"\"Hub\"\"\"\tBob\t7\n"
    );
}

#[test]
fn test_written_text_reads_back() {
    let mut table = table_from(PEOPLE);
    table.move_column(0, 2).unwrap();
    let written = to_delimited(table.model(), Delimiter::Comma);
    let reread = parse_delimited(written.as_bytes(), Delimiter::Comma)
        .unwrap()
        .into_grid()
        .unwrap();
    assert_eq!(reread.headers().len(), 3);
    assert_eq!(reread.header(2).unwrap().text, "name");
    assert_eq!(reread.cell(2, 1), Some("the \"Hub\""));
}

#[test]
fn test_ragged_rows_are_rejected() {
    let data = parse_delimited(b"a,b\n1,2\n3\n", Delimiter::Comma).unwrap();
    let err = Table::new(MemoryGrid::new(data.headers, data.rows), TableConfig::default())
        .unwrap_err();
    assert!(matches!(err, DragTableError::RaggedRow { row: 1, .. }), "{err}");
}

#[test]
fn test_empty_input() {
    assert!(matches!(
        parse_delimited(b"\n \n", Delimiter::Comma),
        Err(DragTableError::EmptyGrid)
    ));
}

#[test]
fn test_delimiter_from_extension() {
    assert_eq!(Delimiter::from_path(Path::new("a.TSV")), Delimiter::Tab);
    assert_eq!(Delimiter::from_path(Path::new("a.csv")), Delimiter::Comma);
    assert_eq!(Delimiter::from_path(Path::new("noext")), Delimiter::Comma);
}

#[test]
fn test_read_missing_file() {
    let err = read_path(Path::new("does/not/exist.csv")).unwrap_err();
    assert!(matches!(err, DragTableError::Io(_)), "{err}");
}
