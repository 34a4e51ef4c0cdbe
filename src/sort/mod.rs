//! Click-to-sort.
//!
//! The first click on a header sorts rows ascending by that column's cell
//! text. Further clicks on the same header only reverse the current row
//! order, so ascending and descending always mirror each other exactly.
//! Sorting a header puts every other header back to `Unsorted`.

mod compare;

pub use compare::{js_number, ComparePolicy, SortKey};

use crate::error::{DragTableError, Result};
use crate::types::{GridModel, Row, SortState};
use compare::merge_sort_by;

/// Row sorting and per-header sort indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortEngine {
    policy: ComparePolicy,
}

impl SortEngine {
    pub fn new(policy: ComparePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ComparePolicy {
        self.policy
    }

    /// Apply one click on the header at `slot` and return its new state.
    ///
    /// # Errors
    /// Returns [`DragTableError::ColumnOutOfRange`] for a slot past the end;
    /// the grid is left untouched in that case.
    pub fn toggle(&self, grid: &mut GridModel, slot: usize) -> Result<SortState> {
        let current = grid
            .header(slot)
            .map(|h| h.sort)
            .ok_or(DragTableError::ColumnOutOfRange {
                index: slot,
                count: grid.column_count(),
            })?;
        let next = current.toggled();

        if current.is_sorted() {
            grid.rows_mut().reverse();
        } else {
            self.sort_ascending(grid, slot);
        }

        grid.clear_sort();
        if let Some(header) = grid.headers_mut().get_mut(slot) {
            header.sort = next;
        }
        log::debug!("column {slot} sorted {next:?} ({} rows)", grid.row_count());
        Ok(next)
    }

    /// Stable ascending sort of all rows by the text at `slot`
    fn sort_ascending(&self, grid: &mut GridModel, slot: usize) {
        let rows = std::mem::take(grid.rows_mut());
        let keyed: Vec<(SortKey, Row)> = rows
            .into_iter()
            .map(|row| {
                let text = row.cells.get(slot).cloned().unwrap_or_default();
                (SortKey::new(text), row)
            })
            .collect();

        let policy = self.policy;
        let sorted = merge_sort_by(keyed, &mut |a: &(SortKey, Row), b: &(SortKey, Row)| {
            policy.compare(&a.0, &b.0)
        });
        *grid.rows_mut() = sorted.into_iter().map(|(_, row)| row).collect();
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
    use test_case::test_case;

    fn single_column(values: &[&str]) -> GridModel {
        GridModel::from_texts(
            vec!["v".to_string()],
            values.iter().map(|v| vec![(*v).to_string()]).collect(),
        )
        .unwrap()
    }

    fn values(grid: &GridModel, slot: usize) -> Vec<String> {
        grid.column_values(slot).map(str::to_string).collect()
    }

    #[test]
    fn test_three_clicks_round_trip() {
        let engine = SortEngine::default();
        let mut grid = single_column(&["3", "1", "2"]);

        assert_eq!(engine.toggle(&mut grid, 0).unwrap(), SortState::Ascending);
        assert_eq!(values(&grid, 0), vec!["1", "2", "3"]);
        let first = grid.rows().to_vec();

        assert_eq!(engine.toggle(&mut grid, 0).unwrap(), SortState::Descending);
        assert_eq!(values(&grid, 0), vec!["3", "2", "1"]);

        assert_eq!(engine.toggle(&mut grid, 0).unwrap(), SortState::Ascending);
        assert_eq!(grid.rows(), first.as_slice());
    }

    #[test]
    fn test_other_header_resets_indicator() {
        let engine = SortEngine::default();
        let mut grid = GridModel::from_texts(
            vec!["a".to_string(), "b".to_string()],
            vec![
                vec!["2".to_string(), "x".to_string()],
                vec!["1".to_string(), "y".to_string()],
            ],
        )
        .unwrap();

        engine.toggle(&mut grid, 0).unwrap();
        engine.toggle(&mut grid, 0).unwrap();
        engine.toggle(&mut grid, 1).unwrap();
        assert_eq!(
            grid.sort_states(),
            vec![SortState::Unsorted, SortState::Ascending]
        );
        assert_eq!(values(&grid, 1), vec!["x", "y"]);
    }

    #[test]
    fn test_resorting_a_reset_header_sorts_afresh() {
        let engine = SortEngine::default();
        let mut grid = GridModel::from_texts(
            vec!["a".to_string(), "b".to_string()],
            vec![
                vec!["1".to_string(), "z".to_string()],
                vec!["2".to_string(), "y".to_string()],
                vec!["3".to_string(), "x".to_string()],
            ],
        )
        .unwrap();

        engine.toggle(&mut grid, 0).unwrap();
        engine.toggle(&mut grid, 1).unwrap();
        // Back on column a: a real sort, not a reversal of b's order
        assert_eq!(engine.toggle(&mut grid, 0).unwrap(), SortState::Ascending);
        assert_eq!(values(&grid, 0), vec!["1", "2", "3"]);
    }

    #[test_case(&["0", "5", "3"], &["0", "3", "5"] ; "zero sorts as text")]
    #[test_case(&["0", ".5"], &[".5", "0"] ; "zero after leading dot")]
    #[test_case(&["10", "9", "100"], &["9", "10", "100"] ; "non zero numbers")]
    #[test_case(&["b", "B", "a"], &["B", "a", "b"] ; "case sensitive text")]
    #[test_case(&["", "2", "1"], &["", "1", "2"] ; "empty cell is zero")]
    fn test_legacy_ascending(input: &[&str], expected: &[&str]) {
        let engine = SortEngine::new(ComparePolicy::Legacy);
        let mut grid = single_column(input);
        engine.toggle(&mut grid, 0).unwrap();
        assert_eq!(values(&grid, 0), expected);
    }

    #[test]
    fn test_numeric_policy_orders_zero_numerically() {
        let engine = SortEngine::new(ComparePolicy::Numeric);
        let mut grid = single_column(&["0", ".5", "-1"]);
        engine.toggle(&mut grid, 0).unwrap();
        assert_eq!(values(&grid, 0), vec!["-1", "0", ".5"]);
    }

    #[test]
    fn test_equal_keys_keep_source_order() {
        let engine = SortEngine::default();
        let mut grid = GridModel::from_texts(
            vec!["k".to_string(), "tag".to_string()],
            vec![
                vec!["1".to_string(), "first".to_string()],
                vec!["0".to_string(), "zero".to_string()],
                vec!["1".to_string(), "second".to_string()],
            ],
        )
        .unwrap();
        engine.toggle(&mut grid, 0).unwrap();
        assert_eq!(values(&grid, 1), vec!["zero", "first", "second"]);
    }

    #[test]
    fn test_tied_text_keys_keep_source_order() {
        let engine = SortEngine::default();
        let mut grid = GridModel::from_texts(
            vec!["k".to_string(), "tag".to_string()],
            vec![
                vec!["a".to_string(), "first".to_string()],
                vec!["a".to_string(), "second".to_string()],
            ],
        )
        .unwrap();
        engine.toggle(&mut grid, 0).unwrap();
        assert_eq!(values(&grid, 1), vec!["first", "second"]);
    }

    #[test]
    fn test_out_of_range_leaves_grid_alone() {
        let engine = SortEngine::default();
        let mut grid = single_column(&["2", "1"]);
        assert!(matches!(
            engine.toggle(&mut grid, 3),
            Err(DragTableError::ColumnOutOfRange { index: 3, count: 1 })
        ));
        assert_eq!(values(&grid, 0), vec!["2", "1"]);
        assert_eq!(grid.sort_states(), vec![SortState::Unsorted]);
    }
}
