use std::fmt::Write;

use demina_core::{Coord2, Game, Visibility};

/// The glyph printed for mines once the game has ended.
const MINE: char = '*';
/// The glyph printed for flagged cells.
const FLAGGED: char = 'F';
/// The glyph printed for concealed cells.
const CONCEALED: char = '.';

/// Glyph precedence: an ended game shows every mine through `is_mine`,
/// overriding whatever visibility the cell holds. The detonated cell is
/// still `Closed` in the engine, this is where it becomes visible.
pub fn cell_glyph(game: &Game, coords: Coord2) -> char {
    let cell = game.cell_at(coords);

    if game.is_finished() && cell.is_mine {
        return MINE;
    }

    match cell.visibility {
        Visibility::Open if cell.adjacent_mines == 0 => ' ',
        Visibility::Open => char::from_digit(cell.adjacent_mines.into(), 10).unwrap_or('?'),
        Visibility::Flagged => FLAGGED,
        Visibility::Closed => CONCEALED,
    }
}

/// Full board with row/column headers and a mines-left line.
pub fn draw(game: &Game) -> String {
    let (rows, cols) = game.size();
    let mut out = String::new();

    let _ = write!(out, "   ");
    for col in 0..cols {
        let _ = write!(out, " {}", col % 10);
    }
    let _ = writeln!(out);

    for row in 0..rows {
        let _ = write!(out, "{row:>3}");
        for col in 0..cols {
            let _ = write!(out, " {}", cell_glyph(game, (row, col)));
        }
        let _ = writeln!(out);
    }

    let _ = write!(out, "mines left: {}", game.mines_left());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use demina_core::Board;

    fn corner_mine_game() -> Game {
        Game::new(Board::from_mine_coords((3, 3), &[(0, 0)]).unwrap())
    }

    #[test]
    fn closed_and_flagged_cells_use_their_markers() {
        let mut game = corner_mine_game();
        game.toggle_flag((1, 1)).unwrap();

        assert_eq!(cell_glyph(&game, (0, 0)), CONCEALED);
        assert_eq!(cell_glyph(&game, (1, 1)), FLAGGED);
    }

    #[test]
    fn open_cells_show_blank_or_their_digit() {
        let mut game = corner_mine_game();
        game.open((1, 1)).unwrap();
        game.open((2, 2)).unwrap();

        assert_eq!(cell_glyph(&game, (1, 1)), '1');
        assert_eq!(cell_glyph(&game, (2, 2)), ' ');
    }

    #[test]
    fn ended_game_reveals_mines_over_any_visibility() {
        let mut game = corner_mine_game();
        game.toggle_flag((0, 0)).unwrap();
        game.toggle_flag((0, 0)).unwrap();

        // detonate: the engine keeps the cell closed, the renderer shows it
        game.open((0, 0)).unwrap();
        assert_eq!(game.cell_at((0, 0)).visibility, Visibility::Closed);
        assert_eq!(cell_glyph(&game, (0, 0)), MINE);
    }

    #[test]
    fn won_game_also_reveals_the_mines() {
        let mut game = corner_mine_game();
        game.open((2, 2)).unwrap();

        assert_eq!(cell_glyph(&game, (0, 0)), MINE);
    }

    #[test]
    fn draw_includes_headers_and_mine_counter() {
        let game = corner_mine_game();
        let drawn = draw(&game);

        assert!(drawn.starts_with("    0 1 2\n"));
        assert!(drawn.contains("\n  0 . . .\n"));
        assert!(drawn.ends_with("mines left: 1"));
    }
}
