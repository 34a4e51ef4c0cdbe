//! Writing finished interactions back to the view.
//!
//! Runs only after the drag controller or the sort engine has reached a
//! terminal state. Afterwards the model is re-read from the view so the
//! next interaction starts from what is actually on screen.

use crate::drag::{ColumnProxyFactory, DragSession};
use crate::error::{DragTableError, Result};
use crate::types::{ColumnContent, GridModel};
use crate::view::{GridRenderer, GridSource, GridView};

/// Take a fresh model from the live grid.
///
/// # Errors
/// Fails on an empty or ragged grid, or when the view cannot be read.
pub fn snapshot<S: GridSource>(source: &S) -> Result<GridModel> {
    GridModel::from_texts(source.header_texts()?, source.row_texts()?)
}

/// Commit a finished drag: write the captured order, show the grid again
/// and drop every proxy.
///
/// The grid is shown and the proxies are removed even when writing fails.
pub fn apply_drop<V: GridView>(
    view: &mut V,
    grid: &mut GridModel,
    session: DragSession,
) -> Result<()> {
    let columns = session.into_columns();
    let written = write_columns(grid, columns.iter().map(|c| c.content.clone()));

    let shown = view.set_grid_hidden(false);
    ColumnProxyFactory::discard(view, &columns);
    written?;
    shown?;

    view.render(grid)?;
    resync(view, grid)
}

/// Commit a finished sort
pub fn apply_sort<V>(view: &mut V, grid: &mut GridModel) -> Result<()>
where
    V: GridRenderer + GridSource,
{
    view.render(grid)?;
    resync(view, grid)
}

/// Move the column at `from` so it ends up at slot `to`, shifting the
/// columns in between by one.
///
/// # Errors
/// Returns [`DragTableError::ColumnOutOfRange`] if either slot is past the end.
pub fn move_column(grid: &mut GridModel, from: usize, to: usize) -> Result<()> {
    let count = grid.column_count();
    for index in [from, to] {
        if index >= count {
            return Err(DragTableError::ColumnOutOfRange { index, count });
        }
    }
    let mut columns = (0..count)
        .map(|slot| grid.column(slot))
        .collect::<Result<Vec<_>>>()?;
    let moved = columns.remove(from);
    columns.insert(to, moved);
    write_columns(grid, columns)
}

/// Replace every slot's header and cells in order.
///
/// All-or-nothing: on error `grid` is unchanged.
fn write_columns<I>(grid: &mut GridModel, columns: I) -> Result<()>
where
    I: IntoIterator<Item = ColumnContent>,
{
    let mut next = grid.clone();
    let mut written = 0;
    for (slot, content) in columns.into_iter().enumerate() {
        next.set_column(slot, content)?;
        written += 1;
    }
    if written != grid.column_count() {
        return Err(DragTableError::ColumnOutOfRange {
            index: written,
            count: grid.column_count(),
        });
    }
    *grid = next;
    Ok(())
}

/// Re-read texts from the view into `grid`.
///
/// Column ids, sort indicators and row origins are kept; only the texts
/// are refreshed. The view must still have the model's shape.
pub fn resync<S: GridSource>(source: &S, grid: &mut GridModel) -> Result<()> {
    let headers = source.header_texts()?;
    let rows = source.row_texts()?;
    if headers.len() != grid.column_count() || rows.len() != grid.row_count() {
        return Err(DragTableError::Dom(format!(
            "grid changed shape: {}x{} on screen, {}x{} in the model",
            headers.len(),
            rows.len(),
            grid.column_count(),
            grid.row_count()
        )));
    }
    if let Some((row, cells)) = rows
        .iter()
        .enumerate()
        .find(|(_, cells)| cells.len() != headers.len())
    {
        return Err(DragTableError::RaggedRow {
            row,
            expected: headers.len(),
            found: cells.len(),
        });
    }

    for (header, text) in grid.headers_mut().iter_mut().zip(headers) {
        header.text = text;
    }
    for (row, cells) in grid.rows_mut().iter_mut().zip(rows) {
        row.cells = cells;
    }
    Ok(())
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
    use crate::memory::MemoryGrid;
    use crate::types::ColumnId;

    fn view() -> MemoryGrid {
        MemoryGrid::new(
            vec!["a".into(), "b".into(), "c".into()],
            vec![
                vec!["a1".into(), "b1".into(), "c1".into()],
                vec!["a2".into(), "b2".into(), "c2".into()],
            ],
        )
    }

    #[test]
    fn test_move_column_right_and_left() {
        let mut grid = snapshot(&view()).unwrap();
        move_column(&mut grid, 0, 2).unwrap();
        assert_eq!(grid.column_order(), vec![ColumnId(1), ColumnId(2), ColumnId(0)]);
        assert_eq!(grid.rows()[1].cells, vec!["b2", "c2", "a2"]);

        move_column(&mut grid, 2, 0).unwrap();
        assert_eq!(grid.column_order(), vec![ColumnId(0), ColumnId(1), ColumnId(2)]);
    }

    #[test]
    fn test_move_column_out_of_range() {
        let mut grid = snapshot(&view()).unwrap();
        let before = grid.clone();
        assert!(matches!(
            move_column(&mut grid, 0, 3),
            Err(DragTableError::ColumnOutOfRange { index: 3, count: 3 })
        ));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_apply_sort_renders_and_keeps_identity() {
        let mut v = view();
        let mut grid = snapshot(&v).unwrap();
        move_column(&mut grid, 2, 0).unwrap();
        grid.rows_mut().reverse();
        apply_sort(&mut v, &mut grid).unwrap();

        assert_eq!(v.render_count(), 1);
        assert_eq!(v.headers(), &["c", "a", "b"]);
        assert_eq!(v.rows()[0], vec!["c2", "a2", "b2"]);
        assert_eq!(grid.column_order(), vec![ColumnId(2), ColumnId(0), ColumnId(1)]);
        assert_eq!(grid.rows()[0].origin, 1);
    }

    #[test]
    fn test_resync_rejects_shape_change() {
        let v = view();
        let mut grid = GridModel::from_texts(vec!["only".into()], vec![vec!["x".into()]]).unwrap();
        assert!(matches!(resync(&v, &mut grid), Err(DragTableError::Dom(_))));
    }
}
