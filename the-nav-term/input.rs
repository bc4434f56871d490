//! Input handling - maps key events to context updates.

use crossterm::event::{
  KeyCode,
  KeyEvent,
  KeyModifiers,
};

use crate::ctx::Ctx;

pub fn handle_key(ctx: &mut Ctx, event: KeyEvent) {
  match (event.code, event.modifiers) {
    (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
      ctx.should_quit = true;
    },
    (KeyCode::Char('r'), KeyModifiers::CONTROL) => {
      ctx.reload_config();
    },
    (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
      ctx.input.push(c);
      ctx.status = None;
      ctx.refresh();
    },
    (KeyCode::Backspace, _) => {
      ctx.input.pop();
      ctx.refresh();
    },
    (KeyCode::Esc, _) => {
      if ctx.input.is_empty() {
        ctx.should_quit = true;
      } else {
        ctx.input.clear();
        ctx.refresh();
      }
    },
    (KeyCode::Enter, _) => {
      if let Some(url) = ctx.url() {
        let input = ctx.input.clone();
        ctx.history.push(&input);
        ctx.submitted = Some(url);
        ctx.should_quit = true;
      }
    },
    (KeyCode::Up, _) => {
      if let Some(entry) = ctx.history.back().map(str::to_string) {
        ctx.input = entry;
        ctx.refresh();
      }
    },
    (KeyCode::Down, _) => {
      if let Some(entry) = ctx.history.forward().map(str::to_string) {
        ctx.input = entry;
        ctx.refresh();
      }
    },
    _ => {},
  }
}
