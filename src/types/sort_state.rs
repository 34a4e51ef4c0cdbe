use serde::{Deserialize, Serialize};

/// Sort indicator of a single header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortState {
    #[default]
    Unsorted,
    Ascending,
    Descending,
}

impl SortState {
    /// State after one more click on the same header.
    ///
    /// `Descending` goes back to `Ascending`, never to `Unsorted`.
    pub fn toggled(self) -> Self {
        match self {
            SortState::Unsorted | SortState::Descending => SortState::Ascending,
            SortState::Ascending => SortState::Descending,
        }
    }

    pub fn is_sorted(self) -> bool {
        self != SortState::Unsorted
    }
}
