//! Left-to-right packing of column proxies.
//!
//! A running frontier starts at the grid's left edge and advances by each
//! column's content width plus border. Neighbouring columns overlap by one
//! border, so each column's left edge sits one border left of the frontier.

use crate::types::ColumnBox;

/// Where one column ends up after packing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackedSlot {
    /// Page x of the column's left edge
    pub left: f64,
    /// Page x of the column's horizontal midpoint
    pub center_x: f64,
}

/// Pack `boxes` side by side starting at `origin`.
///
/// Centers come out strictly ascending as long as every width is
/// non-negative, which the slot scan relies on.
pub fn pack<I>(boxes: I, origin: f64) -> Vec<PackedSlot>
where
    I: IntoIterator<Item = ColumnBox>,
{
    let mut frontier = origin;
    boxes
        .into_iter()
        .map(|b| {
            let left = frontier - b.border;
            frontier += b.advance();
            PackedSlot {
                left,
                center_x: left + b.outer_width() / 2.0,
            }
        })
        .collect()
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

    #[test]
    fn test_pack_uniform_columns() {
        let boxes = vec![ColumnBox::new(98.0, 1.0); 3];
        let slots = pack(boxes, 10.0);
        let lefts: Vec<f64> = slots.iter().map(|s| s.left).collect();
        let centers: Vec<f64> = slots.iter().map(|s| s.center_x).collect();
        assert_eq!(lefts, vec![9.0, 108.0, 207.0]);
        assert_eq!(centers, vec![59.0, 158.0, 257.0]);
    }

    #[test]
    fn test_pack_mixed_widths_stay_ascending() {
        let boxes = vec![
            ColumnBox::new(200.0, 2.0),
            ColumnBox::new(0.0, 0.0),
            ColumnBox::new(30.0, 1.0),
            ColumnBox::new(5.0, 3.0),
        ];
        let slots = pack(boxes, 0.0);
        assert!(slots.windows(2).all(|w| w[0].center_x < w[1].center_x));
    }

    #[test]
    fn test_pack_empty() {
        assert!(pack(Vec::new(), 0.0).is_empty());
    }
}
