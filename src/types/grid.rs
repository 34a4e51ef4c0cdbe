use serde::{Deserialize, Serialize};

use super::SortState;
use crate::error::{DragTableError, Result};

/// Stable identity of a column: its slot when the table was created.
///
/// Slots change as columns are dragged around; the id does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColumnId(pub usize);

/// A header cell with its sort indicator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderCell {
    pub id: ColumnId,
    pub text: String,
    pub sort: SortState,
}

/// A body row: cell texts by slot plus its position in the source markup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    /// Index of this row when the table was created
    pub origin: usize,
    pub cells: Vec<String>,
}

/// Header and cells of one column, detached from the grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnContent {
    pub header: HeaderCell,
    /// One value per row, in current row order
    pub cells: Vec<String>,
}

/// Snapshot of the grid: ordered headers and ordered rows.
///
/// Every row holds exactly one cell per header; the constructors reject
/// anything else and no method changes the column count.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GridModel {
    headers: Vec<HeaderCell>,
    rows: Vec<Row>,
}

impl GridModel {
    /// Build a model from raw header and row texts.
    ///
    /// # Errors
    /// Returns [`DragTableError::EmptyGrid`] when there are no headers and
    /// [`DragTableError::RaggedRow`] when a row's cell count differs from
    /// the header count.
    pub fn from_texts(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if headers.is_empty() {
            return Err(DragTableError::EmptyGrid);
        }
        let expected = headers.len();
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != expected {
                return Err(DragTableError::RaggedRow {
                    row,
                    expected,
                    found: cells.len(),
                });
            }
        }

        let headers = headers
            .into_iter()
            .enumerate()
            .map(|(i, text)| HeaderCell {
                id: ColumnId(i),
                text,
                sort: SortState::Unsorted,
            })
            .collect();
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(origin, cells)| Row { origin, cells })
            .collect();

        Ok(Self { headers, rows })
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn headers(&self) -> &[HeaderCell] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut Vec<Row> {
        &mut self.rows
    }

    pub fn header(&self, slot: usize) -> Option<&HeaderCell> {
        self.headers.get(slot)
    }

    pub(crate) fn headers_mut(&mut self) -> &mut [HeaderCell] {
        &mut self.headers
    }

    pub fn cell(&self, row: usize, slot: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.cells.get(slot))
            .map(String::as_str)
    }

    /// Values of the column at `slot`, in row order
    pub fn column_values(&self, slot: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows
            .iter()
            .filter_map(move |r| r.cells.get(slot).map(String::as_str))
    }

    /// Column ids in current left-to-right order
    pub fn column_order(&self) -> Vec<ColumnId> {
        self.headers.iter().map(|h| h.id).collect()
    }

    pub fn sort_states(&self) -> Vec<SortState> {
        self.headers.iter().map(|h| h.sort).collect()
    }

    /// Copy out the header and cells at `slot`.
    ///
    /// # Errors
    /// Returns [`DragTableError::ColumnOutOfRange`] for a slot past the end.
    pub fn column(&self, slot: usize) -> Result<ColumnContent> {
        let header = self
            .headers
            .get(slot)
            .cloned()
            .ok_or(DragTableError::ColumnOutOfRange {
                index: slot,
                count: self.headers.len(),
            })?;
        let cells = self.column_values(slot).map(str::to_string).collect();
        Ok(ColumnContent { header, cells })
    }

    /// Replace the header and every row's cell at `slot`.
    ///
    /// # Errors
    /// Returns [`DragTableError::ColumnOutOfRange`] for a slot past the end
    /// and [`DragTableError::RaggedRow`] if `content` has the wrong number
    /// of cells.
    pub fn set_column(&mut self, slot: usize, content: ColumnContent) -> Result<()> {
        let count = self.headers.len();
        if content.cells.len() != self.rows.len() {
            return Err(DragTableError::RaggedRow {
                row: slot,
                expected: self.rows.len(),
                found: content.cells.len(),
            });
        }
        let header = self
            .headers
            .get_mut(slot)
            .ok_or(DragTableError::ColumnOutOfRange { index: slot, count })?;
        *header = content.header;
        for (row, value) in self.rows.iter_mut().zip(content.cells) {
            if let Some(cell) = row.cells.get_mut(slot) {
                *cell = value;
            }
        }
        Ok(())
    }

    /// Set every header back to `Unsorted`
    pub fn clear_sort(&mut self) {
        for header in &mut self.headers {
            header.sort = SortState::Unsorted;
        }
    }

    /// Put rows back in the order they had when the table was created
    pub fn restore_row_order(&mut self) {
        self.rows.sort_by_key(|r| r.origin);
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

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_ragged_row_rejected() {
        let err = GridModel::from_texts(
            strings(&["a", "b"]),
            vec![strings(&["1", "2"]), strings(&["3"])],
        )
        .unwrap_err();
        match err {
            DragTableError::RaggedRow {
                row,
                expected,
                found,
            } => {
                assert_eq!((row, expected, found), (1, 2, 1));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_empty_grid_rejected() {
        assert!(matches!(
            GridModel::from_texts(Vec::new(), Vec::new()),
            Err(DragTableError::EmptyGrid)
        ));
    }

    #[test]
    fn test_column_roundtrip_through_set_column() {
        let mut grid = GridModel::from_texts(
            strings(&["a", "b"]),
            vec![strings(&["1", "2"]), strings(&["3", "4"])],
        )
        .unwrap();
        let a = grid.column(0).unwrap();
        let b = grid.column(1).unwrap();
        grid.set_column(0, b).unwrap();
        grid.set_column(1, a).unwrap();

        assert_eq!(grid.column_order(), vec![ColumnId(1), ColumnId(0)]);
        assert_eq!(grid.rows()[0].cells, strings(&["2", "1"]));
        assert_eq!(grid.rows()[1].cells, strings(&["4", "3"]));
    }

    #[test]
    fn test_restore_row_order() {
        let mut grid = GridModel::from_texts(
            strings(&["n"]),
            vec![strings(&["x"]), strings(&["y"]), strings(&["z"])],
        )
        .unwrap();
        grid.rows_mut().reverse();
        grid.restore_row_order();
        let values: Vec<&str> = grid.column_values(0).collect();
        assert_eq!(values, vec!["x", "y", "z"]);
    }
}
