/// A point in page coordinates (CSS pixels, scroll offset included)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`
    #[must_use]
    pub fn offset_from(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// Bounding rectangle in page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Horizontal midpoint
    pub fn center_x(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }
}

/// Minimum border width used when packing columns.
///
/// Collapsed table borders report 0 in some engines; columns still
/// overlap by one pixel on screen.
pub const MIN_BORDER_WIDTH: f64 = 1.0;

/// Rendered box metrics of one column proxy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnBox {
    /// Computed content width (CSS `width`)
    pub width: f64,
    /// Left border width, floored at [`MIN_BORDER_WIDTH`]
    pub border: f64,
}

impl ColumnBox {
    pub fn new(width: f64, border: f64) -> Self {
        Self {
            width,
            border: border.max(MIN_BORDER_WIDTH),
        }
    }

    /// Distance the frontier advances past this column
    pub fn advance(&self) -> f64 {
        self.width + self.border
    }

    /// Full border-box width (content plus both borders)
    pub fn outer_width(&self) -> f64 {
        self.width + 2.0 * self.border
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

    #[test]
    fn test_border_is_floored() {
        let b = ColumnBox::new(80.0, 0.0);
        assert_eq!(b.border, 1.0);
        assert_eq!(b.advance(), 81.0);
        assert_eq!(b.outer_width(), 82.0);
    }

    #[test]
    fn test_rect_center() {
        let r = Rect::new(10.0, 0.0, 30.0, 5.0);
        assert_eq!(r.center_x(), 20.0);
        assert_eq!(r.width(), 20.0);
        assert_eq!(r.height(), 5.0);
    }
}
