use super::Point;

/// Phase of a pointer interaction, shared by mouse and touch input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// A mouse or touch event reduced to what the engines need
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    /// Pointer position in page coordinates
    pub position: Point,
    /// Header slot under the pointer, when the event targets a header cell
    pub header: Option<usize>,
}

impl PointerEvent {
    pub fn down(header: usize, position: Point) -> Self {
        Self {
            phase: PointerPhase::Down,
            position,
            header: Some(header),
        }
    }

    pub fn moved(position: Point) -> Self {
        Self {
            phase: PointerPhase::Move,
            position,
            header: None,
        }
    }

    pub fn up(position: Point) -> Self {
        Self {
            phase: PointerPhase::Up,
            position,
            header: None,
        }
    }
}
