use crate::game::Game;
use crate::term::TermManager;
use crate::TermInt;

use anyhow::Result;
use crossterm::style::Color;

const BORDER_CHAR: char = '█';
const BODY_CHAR: char = '█';
const FOOD_CHAR: char = '●';

const SNAKE_COLOR: Color = Color::Green;
const FOOD_COLOR: Color = Color::Red;
const BORDER_COLOR: Color = Color::Yellow;
const TEXT_COLOR: Color = Color::White;

const CONTROLS: &str = "W/↑ up  A/← left  S/↓ down  D/→ right  P pause  Q quit";

/// Redraws the whole frame from the current game state.
pub fn draw(term: &mut TermManager, game: &Game) -> Result<()> {
    term.clear()?;

    let (w, h) = (game.width(), game.height());

    for x in 0..w {
        term.print_at((x, 0), BORDER_CHAR, BORDER_COLOR)?;
        term.print_at((x, h - 1), BORDER_CHAR, BORDER_COLOR)?;
    }
    for y in 0..h {
        term.print_at((0, y), BORDER_CHAR, BORDER_COLOR)?;
        term.print_at((w - 1, y), BORDER_CHAR, BORDER_COLOR)?;
    }

    let head = game.snake().head();
    for &pos in game.snake().body() {
        let ch = if pos == head {
            game.snake().head_glyph()
        } else {
            BODY_CHAR
        };
        term.print_at(pos, ch, SNAKE_COLOR)?;
    }

    term.print_at(game.food(), FOOD_CHAR, FOOD_COLOR)?;

    term.print_text((2, h + 1), &format!("Score: {}", game.score()), TEXT_COLOR)?;
    let level = format!("Level: {}", game.tier().name());
    let level_x = w.saturating_sub(level.len() as TermInt + 2);
    term.print_text((level_x, h + 1), &level, TEXT_COLOR)?;
    term.print_text((2, h + 3), CONTROLS, TEXT_COLOR)?;

    if game.is_paused() {
        let msg = "PAUSED - press P to resume";
        term.print_text((centered(w, msg), h / 2), msg, Color::Yellow)?;
    }

    if game.is_game_over() {
        let crash = "GAME OVER! The snake crashed!";
        let score = format!("Final score: {}", game.score());
        let prompt = "Press ENTER to play again or Q to quit";
        term.print_text((centered(w, crash), h / 2 - 2), crash, Color::Red)?;
        term.print_text((centered(w, &score), h / 2), &score, Color::Yellow)?;
        term.print_text((centered(w, prompt), h / 2 + 2), prompt, TEXT_COLOR)?;
    }

    term.flush()
}

pub fn centered(width: TermInt, text: &str) -> TermInt {
    let len = text.chars().count() as TermInt;
    (width / 2).saturating_sub(len / 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_text_never_underflows() {
        assert_eq!(centered(80, "1234"), 38);
        assert_eq!(centered(4, "a very long line of text"), 0);
    }
}
