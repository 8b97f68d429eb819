use std::collections::VecDeque;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{Board, Cell, CellCount, Coord2, FlagOutcome, GameError, OpenOutcome, Result, Visibility};

/// Valid transitions:
/// - Playing -> Won
/// - Playing -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameState {
    /// Initial state, the only one accepting moves
    Playing,
    /// Terminal, every safe cell was opened
    Won,
    /// Terminal, a mine was opened
    Lost,
}

impl GameState {
    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_terminal(self) -> bool {
        use GameState::*;
        match self {
            Playing => false,
            Won => true,
            Lost => true,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Playing
    }
}

/// Represents one game from start to finish. Owns its board exclusively;
/// a new game gets a freshly generated board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    state: GameState,
}

impl Game {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            state: Default::default(),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.board.mine_count()
    }

    /// How many mines have not been flagged yet
    pub fn mines_left(&self) -> isize {
        (self.board.mine_count() as isize) - (self.board.flag_count() as isize)
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.board[coords]
    }

    /// Open a closed cell, cascading through mine-free regions.
    ///
    /// Opening a mine ends the game; the detonated cell's visibility stays
    /// `Closed`, the renderer shows mines through `is_mine` once the game
    /// has ended.
    pub fn open(&mut self, coords: Coord2) -> Result<OpenOutcome> {
        let coords = self.board.validate_coords(coords)?;
        self.check_playing()?;
        Ok(self.open_cell(coords))
    }

    /// Flag a closed cell or unflag a flagged one; open cells are left alone.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        use FlagOutcome::*;
        use Visibility::*;

        let coords = self.board.validate_coords(coords)?;
        self.check_playing()?;

        let outcome = match self.board[coords].visibility {
            Closed => {
                self.board.set_visibility(coords, Flagged);
                Changed
            }
            Flagged => {
                self.board.set_visibility(coords, Closed);
                Changed
            }
            Open => NoChange,
        };
        self.settle_win();
        Ok(outcome)
    }

    fn open_cell(&mut self, coords: Coord2) -> OpenOutcome {
        let cell = self.board[coords];

        if !cell.visibility.is_closed() {
            return OpenOutcome::NoChange;
        }

        if cell.is_mine {
            log::debug!("opened mine at {coords:?}, game lost");
            self.state = GameState::Lost;
            return OpenOutcome::Exploded;
        }

        self.board.set_visibility(coords, Visibility::Open);
        log::debug!("opened cell at {coords:?}, mine count: {}", cell.adjacent_mines);

        if cell.adjacent_mines == 0 {
            self.flood_open(coords);
        }

        if self.settle_win() {
            OpenOutcome::Won
        } else {
            OpenOutcome::Revealed
        }
    }

    /// Worklist traversal of the connected zero-count region plus its
    /// non-zero border. The closed-only filter is what bounds the walk:
    /// every cell transitions `Closed -> Open` at most once.
    fn flood_open(&mut self, start: Coord2) {
        let mut visited: HashSet<Coord2> = HashSet::new();
        visited.insert(start);
        let mut to_visit: VecDeque<Coord2> = self.closed_neighbors(start).into_iter().collect();
        log::trace!("starting flood-fill from {start:?}, initial neighbors: {to_visit:?}");

        while let Some(visit_coords) = to_visit.pop_front() {
            if !visited.insert(visit_coords) {
                continue;
            }

            // skip flagged cells and anything opened earlier in the walk
            if !self.board[visit_coords].visibility.is_closed() {
                log::trace!("skipping cell at {visit_coords:?}");
                continue;
            }

            self.board.set_visibility(visit_coords, Visibility::Open);
            let visit_count = self.board[visit_coords].adjacent_mines;
            log::trace!("flood opened cell at {visit_coords:?}, mine count: {visit_count}");

            // only zero cells extend the frontier
            if visit_count == 0 {
                to_visit.extend(
                    self.closed_neighbors(visit_coords)
                        .into_iter()
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }
    }

    fn closed_neighbors(&self, coords: Coord2) -> SmallVec<[Coord2; 8]> {
        self.board
            .iter_neighbors(coords)
            .filter(|&pos| self.board[pos].visibility.is_closed())
            .collect()
    }

    /// Win check run after every accepted mutation while playing.
    fn settle_win(&mut self) -> bool {
        if matches!(self.state, GameState::Playing) && self.board.is_cleared() {
            log::debug!("board cleared, game won");
            self.state = GameState::Won;
        }
        matches!(self.state, GameState::Won)
    }

    fn check_playing(&self) -> Result<()> {
        if self.state.is_terminal() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
