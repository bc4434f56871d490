//! Minimal raw-mode terminal wrapper over crossterm.

use std::io::{
  self,
  Stdout,
  Write,
};

use anyhow::Result;
use crossterm::{
  cursor::MoveTo,
  execute,
  queue,
  style::{
    Color,
    Print,
    ResetColor,
    SetBackgroundColor,
    SetForegroundColor,
  },
  terminal::{
    Clear,
    ClearType,
    EnterAlternateScreen,
    LeaveAlternateScreen,
    disable_raw_mode,
    enable_raw_mode,
  },
};

pub struct Terminal {
  out: Stdout,
}

impl Terminal {
  pub fn new() -> Result<Self> {
    Ok(Self { out: io::stdout() })
  }

  pub fn enter_raw_mode(&mut self) -> Result<()> {
    enable_raw_mode()?;
    execute!(self.out, EnterAlternateScreen)?;
    Ok(())
  }

  pub fn leave_raw_mode(&mut self) -> Result<()> {
    execute!(self.out, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
  }

  pub fn clear(&mut self) -> Result<()> {
    queue!(self.out, Clear(ClearType::All))?;
    Ok(())
  }

  pub fn draw_str(
    &mut self,
    row: u16,
    col: u16,
    text: &str,
    fg: Option<Color>,
    bg: Option<Color>,
  ) -> Result<()> {
    queue!(self.out, MoveTo(col, row))?;
    if let Some(fg) = fg {
      queue!(self.out, SetForegroundColor(fg))?;
    }
    if let Some(bg) = bg {
      queue!(self.out, SetBackgroundColor(bg))?;
    }
    queue!(self.out, Print(text), ResetColor)?;
    Ok(())
  }

  pub fn set_cursor(&mut self, row: u16, col: u16) -> Result<()> {
    queue!(self.out, MoveTo(col, row))?;
    Ok(())
  }

  pub fn flush(&mut self) -> Result<()> {
    self.out.flush()?;
    Ok(())
  }
}
