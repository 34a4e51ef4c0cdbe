//! Live column reordering.

mod controller;
mod proxy;

pub use controller::{
    ArmedPress, DragReorderController, DragSession, DragState, DragStep, Release,
    DEFAULT_DRAG_THRESHOLD,
};
pub use proxy::{Column, ColumnProxyFactory};

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
    use crate::types::{ColumnId, GridModel, Point};
    use crate::view::GridSource;

    fn grid_and_view(cols: usize) -> (GridModel, MemoryGrid) {
        let headers: Vec<String> = (0..cols).map(|c| format!("h{c}")).collect();
        let rows: Vec<Vec<String>> = (0..2)
            .map(|r| (0..cols).map(|c| format!("r{r}c{c}")).collect())
            .collect();
        let view = MemoryGrid::new(headers, rows);
        let grid = GridModel::from_texts(view.header_texts().unwrap(), view.row_texts().unwrap())
            .unwrap();
        (grid, view)
    }

    fn session(controller: &DragReorderController) -> &DragSession {
        match controller.state() {
            DragState::Dragging(s) => s,
            other => panic!("expected dragging, got {other:?}"),
        }
    }

    #[test]
    fn test_press_records_pointer_shift() {
        let (_, view) = grid_and_view(3);
        let mut c = DragReorderController::default();
        // Header 1 spans x 100..202 (left edge one border before the frontier)
        c.press(&view, 1, Point::new(120.0, 5.0)).unwrap();
        match c.state() {
            DragState::Armed(p) => {
                assert_eq!(p.origin_index, 1);
                assert_eq!(p.pointer_shift, Point::new(20.0, 5.0));
            }
            other => panic!("expected armed, got {other:?}"),
        }
    }

    #[test]
    fn test_small_jitter_stays_armed() {
        let (grid, mut view) = grid_and_view(3);
        let mut c = DragReorderController::default();
        c.press(&view, 0, Point::new(50.0, 10.0)).unwrap();
        for (dx, dy) in [(1.0, 0.0), (3.0, -3.0), (-3.0, 3.0)] {
            let step = c
                .motion(&mut view, &grid, Point::new(50.0 + dx, 10.0 + dy))
                .unwrap();
            assert_eq!(step, DragStep::Held);
        }
        assert_eq!(view.live_proxies().count(), 0);
        assert_eq!(c.release(), Release::Press { slot: 0 });
        assert!(c.is_idle());
    }

    #[test]
    fn test_crossing_threshold_captures_columns() {
        let (grid, mut view) = grid_and_view(3);
        let mut c = DragReorderController::default();
        c.press(&view, 2, Point::new(250.0, 10.0)).unwrap();
        let step = c
            .motion(&mut view, &grid, Point::new(250.0, 14.0))
            .unwrap();
        assert_eq!(step, DragStep::Started);
        assert!(view.is_hidden());

        let s = session(&c);
        assert_eq!(s.current_index, 2);
        assert_eq!(s.captured.len(), 3);
        assert!(s.centers.windows(2).all(|w| w[0] < w[1]));
        let dragging: Vec<_> = view.live_proxies().filter(|(_, p)| p.dragging).collect();
        assert_eq!(dragging.len(), 1);
        assert_eq!(dragging[0].1.content.header.id, ColumnId(2));
    }

    #[test]
    fn test_rightward_reslot() {
        let (grid, mut view) = grid_and_view(4);
        let mut c = DragReorderController::default();
        c.press(&view, 0, Point::new(50.0, 10.0)).unwrap();
        c.motion(&mut view, &grid, Point::new(60.0, 10.0)).unwrap();

        // Past column 1's center (~150) but short of column 2's (~250)
        let step = c
            .motion(&mut view, &grid, Point::new(200.0, 10.0))
            .unwrap();
        assert_eq!(step, DragStep::Reslotted { from: 0, to: 1 });

        let s = session(&c);
        assert_eq!(s.current_index, 1);
        let order: Vec<ColumnId> = s.captured.iter().map(|c| c.content.header.id).collect();
        assert_eq!(order, vec![ColumnId(1), ColumnId(0), ColumnId(2), ColumnId(3)]);
        let indices: Vec<usize> = s.captured.iter().map(|c| c.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert!(s.centers.windows(2).all(|w| w[0] < w[1]));

        // Column 1 was packed into slot 0
        let moved = view.proxy(s.captured[0].proxy).unwrap();
        assert_eq!(moved.at.x, -1.0);
        assert_eq!(s.captured[0].left_offset, -1.0);
    }

    #[test]
    fn test_leftward_reslot() {
        let (grid, mut view) = grid_and_view(4);
        let mut c = DragReorderController::default();
        c.press(&view, 3, Point::new(350.0, 10.0)).unwrap();
        c.motion(&mut view, &grid, Point::new(340.0, 10.0)).unwrap();

        // Between the centers of columns 0 and 1
        let step = c.motion(&mut view, &grid, Point::new(100.0, 10.0)).unwrap();
        assert_eq!(step, DragStep::Reslotted { from: 3, to: 1 });
        assert_eq!(session(&c).current_index, 1);
    }

    #[test]
    fn test_dead_zone_only_moves_proxy() {
        let (grid, mut view) = grid_and_view(3);
        let mut c = DragReorderController::default();
        c.press(&view, 1, Point::new(150.0, 10.0)).unwrap();
        c.motion(&mut view, &grid, Point::new(160.0, 10.0)).unwrap();

        // Still between the centers of columns 0 and 2
        let step = c.motion(&mut view, &grid, Point::new(190.0, 30.0)).unwrap();
        assert_eq!(step, DragStep::Moved);

        let s = session(&c);
        let dragged = view.proxy(s.captured[1].proxy).unwrap();
        assert_eq!(dragged.at, Point::new(190.0 - 50.0, 30.0 - 10.0));
    }

    #[test]
    fn test_release_after_drag_hands_back_session() {
        let (grid, mut view) = grid_and_view(3);
        let mut c = DragReorderController::default();
        c.press(&view, 0, Point::new(50.0, 10.0)).unwrap();
        c.motion(&mut view, &grid, Point::new(60.0, 10.0)).unwrap();
        c.motion(&mut view, &grid, Point::new(500.0, 10.0)).unwrap();
        match c.release() {
            Release::Drop(s) => {
                assert_eq!(s.current_index, 2);
                let order: Vec<ColumnId> =
                    s.into_columns().iter().map(|c| c.content.header.id).collect();
                assert_eq!(order, vec![ColumnId(1), ColumnId(2), ColumnId(0)]);
            }
            other => panic!("expected drop, got {other:?}"),
        }
        assert!(c.is_idle());
    }

    #[test]
    fn test_abort_cleans_up() {
        let (grid, mut view) = grid_and_view(3);
        let mut c = DragReorderController::default();
        c.press(&view, 0, Point::new(50.0, 10.0)).unwrap();
        c.motion(&mut view, &grid, Point::new(70.0, 10.0)).unwrap();
        c.abort(&mut view);
        assert!(c.is_idle());
        assert!(!view.is_hidden());
        assert_eq!(view.live_proxies().count(), 0);
    }

    #[test]
    fn test_second_press_is_ignored() {
        let (_, view) = grid_and_view(3);
        let mut c = DragReorderController::default();
        c.press(&view, 0, Point::new(50.0, 10.0)).unwrap();
        assert_eq!(
            c.press(&view, 2, Point::new(250.0, 10.0)).unwrap(),
            DragStep::Ignored
        );
        assert_eq!(c.release(), Release::Press { slot: 0 });
    }
}
