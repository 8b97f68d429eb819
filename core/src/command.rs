use serde::{Deserialize, Serialize};

use crate::{Coord, Coord2, Game};

/// Structured form of one player move, addressed by `(row, col)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Open { row: Coord, col: Coord },
    Flag { row: Coord, col: Coord },
}

impl Command {
    /// Parses `open ROW COL` / `flag ROW COL` (short forms `o` / `f`).
    ///
    /// Anything else, a wrong token count included, is `None`; the caller
    /// drops rejected lines instead of failing.
    pub fn parse(line: &str) -> Option<Command> {
        let mut tokens = line.split_whitespace();
        let verb = tokens.next()?;
        let row = tokens.next()?.parse().ok()?;
        let col = tokens.next()?.parse().ok()?;
        if tokens.next().is_some() {
            return None;
        }

        match verb {
            "open" | "o" => Some(Command::Open { row, col }),
            "flag" | "f" => Some(Command::Flag { row, col }),
            _ => None,
        }
    }

    pub const fn coords(self) -> Coord2 {
        match self {
            Command::Open { row, col } => (row, col),
            Command::Flag { row, col } => (row, col),
        }
    }
}

/// Applies one command to the game, reporting whether the board changed.
///
/// This is the gate for every recoverable rejection: commands arriving in a
/// terminal state, out-of-range coordinates, and moves the rules treat as
/// no-ops all leave the game untouched and return `false`.
pub fn dispatch(game: &mut Game, command: Command) -> bool {
    if game.is_finished() {
        log::debug!("dropping {command:?}, game already ended");
        return false;
    }

    let changed = match command {
        Command::Open { row, col } => game.open((row, col)).map(|outcome| outcome.has_update()),
        Command::Flag { row, col } => game
            .toggle_flag((row, col))
            .map(|outcome| outcome.has_update()),
    };

    match changed {
        Ok(changed) => changed,
        Err(err) => {
            log::debug!("dropping {command:?}: {err}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, GameState};

    fn corner_mine_game() -> Game {
        Game::new(Board::from_mine_coords((3, 3), &[(0, 0)]).unwrap())
    }

    #[test]
    fn parses_both_verbs_and_their_short_forms() {
        assert_eq!(Command::parse("open 1 2"), Some(Command::Open { row: 1, col: 2 }));
        assert_eq!(Command::parse("o 0 0"), Some(Command::Open { row: 0, col: 0 }));
        assert_eq!(Command::parse("flag 2 1"), Some(Command::Flag { row: 2, col: 1 }));
        assert_eq!(Command::parse(" f  7 7 "), Some(Command::Flag { row: 7, col: 7 }));
    }

    #[test]
    fn rejects_malformed_lines() {
        for line in ["", "open", "open 1", "open 1 2 3", "open x 2", "boom 1 2", "open 1 2.5"] {
            assert_eq!(Command::parse(line), None, "line {line:?}");
        }
    }

    #[test]
    fn dispatch_applies_open_and_flag() {
        let mut game = corner_mine_game();

        assert!(dispatch(&mut game, Command::Flag { row: 0, col: 0 }));
        assert!(dispatch(&mut game, Command::Open { row: 2, col: 2 }));
        assert_eq!(game.state(), GameState::Won);
    }

    #[test]
    fn dispatch_ignores_out_of_range_coordinates() {
        let mut game = corner_mine_game();
        let snapshot = game.clone();

        assert!(!dispatch(&mut game, Command::Open { row: 99, col: 99 }));
        assert_eq!(game, snapshot);
    }

    #[test]
    fn dispatch_rejects_moves_after_the_game_ended() {
        let mut game = corner_mine_game();

        assert!(dispatch(&mut game, Command::Open { row: 0, col: 0 }));
        assert_eq!(game.state(), GameState::Lost);
        let snapshot = game.clone();

        assert!(!dispatch(&mut game, Command::Open { row: 2, col: 2 }));
        assert!(!dispatch(&mut game, Command::Flag { row: 1, col: 1 }));
        assert_eq!(game, snapshot);
    }

    #[test]
    fn dispatch_reports_no_ops_without_state_changes() {
        let mut game = corner_mine_game();

        assert!(dispatch(&mut game, Command::Open { row: 1, col: 1 }));
        // reopening is a no-op
        assert!(!dispatch(&mut game, Command::Open { row: 1, col: 1 }));
        // flagging an open cell is a no-op
        assert!(!dispatch(&mut game, Command::Flag { row: 1, col: 1 }));
    }
}
