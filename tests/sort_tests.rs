//! Header click sorting tests for dragtable
//!
//! Tests for sorting through a table including:
//! - The Unsorted -> Ascending -> Descending -> Ascending cycle
//! - One sorted header at a time
//! - Comparison of zero and empty cells under both policies
//! - Stability and reversal on repeated clicks
//! - Reset and column pinning

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;
mod fixtures;

use common::{column, header_texts, Call, RecordingGrid};
use dragtable::{ComparePolicy, DragTableError, SortState, Table, TableConfig};
use fixtures::GridBuilder;
use test_case::test_case;

fn with_policy(policy: ComparePolicy) -> TableConfig {
    TableConfig {
        compare_policy: policy,
        ..TableConfig::default()
    }
}

fn scores() -> GridBuilder {
    GridBuilder::new(&["name", "score"])
        .row(&["carol", "3"])
        .row(&["alice", "1"])
        .row(&["bob", "2"])
}

// ============================================================================
// Cycle and indicators
// ============================================================================

#[test]
fn test_click_cycle() {
    let mut table = scores().build_table();

    assert_eq!(table.click(1).unwrap(), Some(SortState::Ascending));
    assert_eq!(column(&table, 1), vec!["1", "2", "3"]);
    assert_eq!(column(&table, 0), vec!["alice", "bob", "carol"]);

    assert_eq!(table.click(1).unwrap(), Some(SortState::Descending));
    assert_eq!(column(&table, 1), vec!["3", "2", "1"]);

    assert_eq!(table.click(1).unwrap(), Some(SortState::Ascending));
    assert_eq!(column(&table, 1), vec!["1", "2", "3"]);
    assert_eq!(table.view().rows()[0], vec!["alice", "1"]);
}

#[test]
fn test_only_one_header_is_sorted() {
    let mut table = scores().build_table();
    table.click(1).unwrap();
    table.click(1).unwrap();
    assert_eq!(table.click(0).unwrap(), Some(SortState::Ascending));
    assert_eq!(
        table.sort_states(),
        vec![SortState::Ascending, SortState::Unsorted]
    );
    assert_eq!(
        table.view().sort_states(),
        &[SortState::Ascending, SortState::Unsorted]
    );

    // Coming back to a header that lost its indicator sorts ascending again
    assert_eq!(table.click(1).unwrap(), Some(SortState::Ascending));
    assert_eq!(column(&table, 1), vec!["1", "2", "3"]);
}

#[test]
fn test_repeat_click_reverses_instead_of_resorting() {
    let mut table = GridBuilder::new(&["id", "key"])
        .row(&["b", "1"])
        .row(&["a", "1"])
        .row(&["c", "0"])
        .build_table();

    table.click(1).unwrap();
    // "0" compares as text against "1"; equal keys keep their order
    assert_eq!(column(&table, 0), vec!["c", "b", "a"]);

    table.click(1).unwrap();
    assert_eq!(column(&table, 0), vec!["a", "b", "c"]);
}

#[test]
fn test_click_out_of_range() {
    let mut table = scores().build_table();
    let before = table.model().clone();
    let err = table.click(5).unwrap_err();
    assert!(matches!(err, DragTableError::ColumnOutOfRange { .. }), "{err}");
    assert_eq!(table.model(), &before);
}

// ============================================================================
// Comparison
// ============================================================================

#[test_case(ComparePolicy::Legacy, &["0", "5", "3"], &["0", "3", "5"] ; "legacy zero first")]
#[test_case(ComparePolicy::Legacy, &["0", ".5", "2"], &[".5", "0", "2"] ; "legacy zero as text")]
#[test_case(ComparePolicy::Numeric, &["0", ".5", "2"], &["0", ".5", "2"] ; "numeric zero")]
#[test_case(ComparePolicy::Legacy, &["", "b", "a"], &["", "a", "b"] ; "empty cell first")]
#[test_case(ComparePolicy::Legacy, &["banana", "Apple", "cherry"], &["Apple", "banana", "cherry"] ; "case sensitive")]
#[test_case(ComparePolicy::Legacy, &["1e3", "-2", "50"], &["-2", "50", "1e3"] ; "signs and exponents")]
#[test_case(ComparePolicy::Legacy, &["0x10", "9", " 12 "], &["9", " 12 ", "0x10"] ; "hex and padding")]
#[test_case(ComparePolicy::Numeric, &["10", "9", "100"], &["9", "10", "100"] ; "numbers not text")]
fn test_ascending_order(policy: ComparePolicy, values: &[&str], expected: &[&str]) {
    let mut table = GridBuilder::new(&["v"])
        .column_values(values)
        .build_table_with(with_policy(policy));
    table.click(0).unwrap();
    assert_eq!(column(&table, 0), expected);
}

#[test]
fn test_policy_from_json_config() {
    let config = TableConfig::from_json(r#"{ "comparePolicy": "numeric" }"#).unwrap();
    let mut table = GridBuilder::new(&["v"])
        .column_values(&[".5", "0"])
        .build_table_with(config);
    table.click(0).unwrap();
    assert_eq!(column(&table, 0), vec!["0", ".5"]);
}

// ============================================================================
// Reset and view calls
// ============================================================================

#[test]
fn test_reset_restores_rows_and_keeps_columns() {
    let mut table = scores().build_table();
    table.move_column(1, 0).unwrap();
    table.click(0).unwrap();
    table.click(0).unwrap();

    table.reset().unwrap();
    assert_eq!(header_texts(&table), vec!["score", "name"]);
    assert_eq!(column(&table, 1), vec!["carol", "alice", "bob"]);
    assert_eq!(table.sort_states(), vec![SortState::Unsorted; 2]);

    assert_eq!(table.click(0).unwrap(), Some(SortState::Ascending));
}

#[test]
fn test_columns_are_pinned_before_sorting() {
    let view = RecordingGrid::new(scores().build_view());
    let mut table = Table::new(view, TableConfig::default()).unwrap();
    table.click(1).unwrap();
    table.click(0).unwrap();
    assert_eq!(
        table.view().calls,
        vec![
            Call::Render,
            Call::Pin(1),
            Call::Render,
            Call::Pin(0),
            Call::Render
        ]
    );
    assert_eq!(table.view().inner.pinned(), &[1, 0]);
}

#[test]
fn test_failed_pin_leaves_rows_alone() {
    let view = RecordingGrid::new(scores().build_view()).failing_on(Call::Pin(1));
    let mut table = Table::new(view, TableConfig::default()).unwrap();
    assert!(table.click(1).is_err());
    assert_eq!(column(&table, 1), vec!["3", "1", "2"]);
    assert_eq!(table.sort_states(), vec![SortState::Unsorted; 2]);

    assert_eq!(table.click(1).unwrap(), Some(SortState::Ascending));
}
