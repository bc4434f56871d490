//! Rendering - converts the resolved view to terminal draw calls.
//!
//! The engine only hands over `(length, seed, state)` segment descriptors;
//! everything visual happens here. Passed segments become a proportional
//! ribbon and a fragment list in their main color, possible segments a
//! suggestion list in their lighter auxiliary color.

use anyhow::Result;
use crossterm::style::Color;
use the_nav_core::{
  action::{
    SegmentState,
    VisualSegment,
  },
  color::{
    Hsl,
    aux_color,
    main_color,
  },
};

use crate::{
  ctx::Ctx,
  terminal::Terminal,
};

const PROMPT_ROW: u16 = 0;
const URL_ROW: u16 = 2;
const RIBBON_ROW: u16 = 4;
const PASSED_ROW: u16 = 6;
const POSSIBLE_ROW: u16 = 7;
const STATUS_ROW: u16 = 9;

/// Cells drawn per consumed character in the ribbon.
const RIBBON_SCALE: usize = 2;

pub fn render(ctx: &Ctx, terminal: &mut Terminal) -> Result<()> {
  terminal.clear()?;

  terminal.draw_str(PROMPT_ROW, 0, "> ", Some(Color::DarkGrey), None)?;
  terminal.draw_str(PROMPT_ROW, 2, &ctx.input, None, None)?;

  if let Some(url) = ctx.url() {
    terminal.draw_str(URL_ROW, 0, &url, Some(Color::Grey), None)?;
  }

  if let Some(view) = &ctx.view {
    draw_ribbon(terminal, &view.segments)?;
    draw_fragments(terminal, &view.segments)?;
  }

  if let Some(status) = &ctx.status {
    terminal.draw_str(STATUS_ROW, 0, status, Some(Color::Yellow), None)?;
  }

  let cursor_col = 2 + ctx.input.chars().count() as u16;
  terminal.set_cursor(PROMPT_ROW, cursor_col)?;
  terminal.flush()?;
  Ok(())
}

fn draw_ribbon(terminal: &mut Terminal, segments: &[VisualSegment]) -> Result<()> {
  let mut col = 0u16;
  for segment in segments {
    let width = ribbon_width(segment);
    if width == 0 {
      continue;
    }
    let color = to_terminal_color(main_color(&segment.seed));
    terminal.draw_str(RIBBON_ROW, col, &" ".repeat(width), None, Some(color))?;
    col += width as u16;
  }
  Ok(())
}

fn draw_fragments(terminal: &mut Terminal, segments: &[VisualSegment]) -> Result<()> {
  let mut passed_col = 0u16;
  let mut possible_col = 0u16;

  for segment in segments {
    match segment.state {
      SegmentState::Passed => {
        let color = to_terminal_color(main_color(&segment.seed));
        terminal.draw_str(
          PASSED_ROW,
          passed_col,
          &segment.seed,
          Some(Color::Black),
          Some(color),
        )?;
        passed_col += segment.seed.chars().count() as u16 + 1;
      },
      SegmentState::Possible => {
        let color = to_terminal_color(aux_color(&segment.seed));
        terminal.draw_str(
          POSSIBLE_ROW,
          possible_col,
          &segment.seed,
          Some(Color::Black),
          Some(color),
        )?;
        possible_col += segment.seed.chars().count() as u16 + 1;
      },
    }
  }
  Ok(())
}

fn ribbon_width(segment: &VisualSegment) -> usize {
  match segment.state {
    SegmentState::Passed => segment.length * RIBBON_SCALE,
    SegmentState::Possible => 0,
  }
}

fn to_terminal_color(hsl: Hsl) -> Color {
  let (r, g, b) = hsl.to_rgb();
  Color::Rgb { r, g, b }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ribbon_skips_possible_segments() {
    assert_eq!(ribbon_width(&VisualSegment::possible("gh")), 0);
    assert_eq!(ribbon_width(&VisualSegment::passed("gh", 2)), 2 * RIBBON_SCALE);
  }
}
