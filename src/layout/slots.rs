//! Slot detection and re-slotting of the dragged column.

/// Index of the first center to the right of `x`, or `centers.len()`.
///
/// `centers` must be ascending; the scan stops at the first hit.
pub fn target_slot(centers: &[f64], x: f64) -> usize {
    centers
        .iter()
        .position(|&center| x < center)
        .unwrap_or(centers.len())
}

/// Index the dragged column lands on when the pointer is over `target`.
///
/// Returns `None` inside the dead zone (`target` is the column's own slot
/// or the one right after it). Moving right lands one before `target`
/// since removing the column shifts later slots down.
pub fn landing_index(current: usize, target: usize) -> Option<usize> {
    if target == current || target == current.saturating_add(1) {
        return None;
    }
    if current < target {
        Some(target - 1)
    } else {
        Some(target)
    }
}

/// Move the item at `current` to where the pointer over `target` lands.
///
/// Returns the new index, or `None` when nothing moved (dead zone or out
/// of range).
pub fn reslot<T>(items: &mut Vec<T>, current: usize, target: usize) -> Option<usize> {
    let landing = landing_index(current, target)?;
    if current >= items.len() || landing >= items.len() {
        return None;
    }
    let item = items.remove(current);
    items.insert(landing, item);
    Some(landing)
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

    const CENTERS: [f64; 4] = [50.0, 150.0, 250.0, 350.0];

    #[test_case(10.0, 0 ; "left of first center")]
    #[test_case(50.0, 1 ; "exactly on first center")]
    #[test_case(100.0, 1 ; "between first and second")]
    #[test_case(349.0, 3 ; "just before last")]
    #[test_case(900.0, 4 ; "right of last center")]
    fn test_target_slot(x: f64, expected: usize) {
        assert_eq!(target_slot(&CENTERS, x), expected);
    }

    #[test]
    fn test_target_slot_empty() {
        assert_eq!(target_slot(&[], 5.0), 0);
    }

    #[test_case(2, 2 ; "own slot")]
    #[test_case(2, 3 ; "slot after")]
    fn test_dead_zone(current: usize, target: usize) {
        assert_eq!(landing_index(current, target), None);
    }

    #[test]
    fn test_rightward_landing_is_adjusted() {
        assert_eq!(landing_index(0, 2), Some(1));
        assert_eq!(landing_index(1, 4), Some(3));
    }

    #[test]
    fn test_leftward_landing_is_unadjusted() {
        assert_eq!(landing_index(3, 1), Some(1));
        assert_eq!(landing_index(3, 0), Some(0));
    }

    #[test]
    fn test_reslot_moves_item() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        assert_eq!(reslot(&mut items, 0, 2), Some(1));
        assert_eq!(items, vec!['b', 'a', 'c', 'd']);

        assert_eq!(reslot(&mut items, 1, 4), Some(3));
        assert_eq!(items, vec!['b', 'c', 'd', 'a']);

        assert_eq!(reslot(&mut items, 3, 1), Some(1));
        assert_eq!(items, vec!['b', 'a', 'c', 'd']);
    }

    #[test]
    fn test_reslot_dead_zone_keeps_order() {
        let mut items = vec![1, 2, 3];
        assert_eq!(reslot(&mut items, 1, 2), None);
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_reslot_out_of_range() {
        let mut items = vec![1, 2];
        assert_eq!(reslot(&mut items, 5, 0), None);
        assert_eq!(items, vec![1, 2]);
    }
}
