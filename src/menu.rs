use crate::difficulty::Difficulty;
use crate::game::is_ctrl_c;
use crate::render::centered;
use crate::term::TermManager;

use anyhow::Result;
use crossterm::event::KeyCode;
use crossterm::style::Color;

const TITLE: &str = "S N A K E";
const SUBTITLE: &str = "Choose a difficulty:";
const INSTRUCTIONS: &str = "↑/↓ to select, ENTER to confirm, Q to quit";

/// Difficulty selection loop. Runs before the game exists and owns the
/// keyboard directly; returns None if the player quits from here.
pub fn select_difficulty(term: &mut TermManager) -> Result<Option<Difficulty>> {
    let options = Difficulty::ALL;
    let mut selected = 1; // Medium is the default

    loop {
        let (w, _) = term.size();
        term.clear()?;
        term.print_text((centered(w, TITLE), 5), TITLE, Color::Green)?;
        term.print_text((centered(w, SUBTITLE), 8), SUBTITLE, Color::White)?;

        for (i, tier) in options.iter().enumerate() {
            let (prefix, color) = if i == selected {
                ("> ", Color::Green)
            } else {
                ("  ", Color::White)
            };
            let line = format!("{}{}", prefix, tier.name());
            term.print_text((centered(w, &line), 10 + 2 * i as u16), &line, color)?;
        }

        term.print_text((centered(w, INSTRUCTIONS), 20), INSTRUCTIONS, Color::Yellow)?;
        term.flush()?;

        let key = term.read_key_blocking()?;
        if is_ctrl_c(&key) {
            return Ok(None);
        }
        match key.code {
            KeyCode::Up => selected = (selected + options.len() - 1) % options.len(),
            KeyCode::Down => selected = (selected + 1) % options.len(),
            KeyCode::Enter => return Ok(Some(options[selected])),
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(None),
            _ => {}
        }
    }
}
