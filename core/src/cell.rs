use serde::{Deserialize, Serialize};

/// Player-facing state of a single square.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Closed,
    Open,
    Flagged,
}

impl Visibility {
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self::Closed
    }
}

/// One grid square.
///
/// `is_mine` and `adjacent_mines` are fixed when the board is generated;
/// only `visibility` changes during play. Mine cells keep `adjacent_mines`
/// at 0, the value is never read for them.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub adjacent_mines: u8,
    pub visibility: Visibility,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cell_is_a_closed_safe_cell() {
        let cell = Cell::default();
        assert!(!cell.is_mine);
        assert_eq!(cell.adjacent_mines, 0);
        assert_eq!(cell.visibility, Visibility::Closed);
    }
}
