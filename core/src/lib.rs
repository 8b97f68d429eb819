use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use command::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use types::*;

mod cell;
mod command;
mod error;
mod game;
mod generator;
mod types;

/// Validated board parameters: dimensions plus the total mine count.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    /// Rejects degenerate dimensions and impossible mine counts before any
    /// generation happens.
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::EmptyBoard);
        }
        if mines > mult(rows, cols) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(rows, cols, mines))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }
}

/// A fixed-size grid of cells in row-major storage.
///
/// Mine placement and adjacency counts are computed once at construction
/// and never touched again; play only flips per-cell visibility.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl Board {
    /// Builds a board from a mine mask, filling every safe cell's
    /// `adjacent_mines` from the Moore neighborhood of the mask.
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap();
        let cells = mine_mask.map(|&is_mine| Cell {
            is_mine,
            ..Cell::default()
        });
        let mut board = Self { cells, mine_count };

        let (rows, cols) = board.size();
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                if !board[coords].is_mine {
                    let count = board.count_mines_around(coords);
                    board.cells[coords.to_nd_index()].adjacent_mines = count;
                }
            }
        }
        board
    }

    /// Deterministic construction from explicit mine coordinates, mostly
    /// for tests and scripted setups.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn game_config(&self) -> GameConfig {
        let (rows, cols) = self.size();
        GameConfig {
            rows,
            cols,
            mines: self.mine_count,
        }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Board size as `(rows, cols)`.
    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len().try_into().unwrap()
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn flag_count(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| cell.visibility == Visibility::Flagged)
            .count()
            .try_into()
            .unwrap()
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self[coords]
    }

    /// Moore-neighborhood mine count for one cell, recomputed from the
    /// mine flags. Matches the stored `adjacent_mines` of safe cells.
    pub fn count_mines_around(&self, coords: Coord2) -> u8 {
        self.cells
            .iter_neighbor_cells(coords)
            .filter(|cell| cell.is_mine)
            .count()
            .try_into()
            .unwrap()
    }

    /// Win predicate: every safe cell is open and no mine cell is.
    pub fn is_cleared(&self) -> bool {
        self.cells.iter().all(|cell| {
            if cell.is_mine {
                cell.visibility != Visibility::Open
            } else {
                cell.visibility == Visibility::Open
            }
        })
    }

    pub(crate) fn set_visibility(&mut self, coords: Coord2, visibility: Visibility) {
        self.cells[coords.to_nd_index()].visibility = visibility;
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

/// Outcome of toggling a flag.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    /// Whether this outcome changed the board.
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Outcome of opening a cell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum OpenOutcome {
    NoChange,
    Revealed,
    Exploded,
    Won,
}

impl OpenOutcome {
    /// Whether this outcome changed the game.
    pub const fn has_update(self) -> bool {
        use OpenOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            Exploded => true,
            Won => true,
        }
    }
}
