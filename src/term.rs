use crate::{Coords, TermInt};
use std::io::{stdout, Stdout, Write};

use anyhow::{Context, Result};
use crossterm::event::{read, Event, KeyEvent};
use crossterm::style::{Color, Print, SetForegroundColor};
use crossterm::terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};

/// Raw-mode alternate-screen drawing surface. `restore` must run on every
/// exit path, including quit and errors.
pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size().context("could not read terminal size")?;
        Ok(TermManager {
            width,
            height,
            stdout: stdout(),
        })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("could not enter alternate screen")?;
        terminal::enable_raw_mode().context("could not enable raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        Ok(())
    }

    /// Best effort; failures here must not mask the error that got us here.
    pub fn restore(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(
            self.stdout,
            cursor::Show,
            cursor::EnableBlinking,
            LeaveAlternateScreen
        );
    }

    pub fn size(&self) -> Coords {
        (self.width, self.height)
    }

    pub fn clear(&mut self) -> Result<()> {
        queue!(self.stdout, terminal::Clear(ClearType::All))?;
        Ok(())
    }

    pub fn print_at(&mut self, pos: Coords, ch: char, color: Color) -> Result<()> {
        queue!(
            self.stdout,
            cursor::MoveTo(pos.0, pos.1),
            SetForegroundColor(color),
            Print(ch)
        )?;
        Ok(())
    }

    pub fn print_text(&mut self, pos: Coords, text: &str, color: Color) -> Result<()> {
        queue!(
            self.stdout,
            cursor::MoveTo(pos.0, pos.1),
            SetForegroundColor(color),
            Print(text)
        )?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }

    /// Used by the menu, before the input thread exists.
    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }
}
