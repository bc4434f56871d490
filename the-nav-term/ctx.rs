//! Application state for the interactive client.

use std::path::PathBuf;

use the_nav_config::CompiledConfig;
use the_nav_core::resolve::{
  ResolvedView,
  Session,
};

pub struct Ctx {
  pub session:      Session,
  pub scheme:       String,
  pub config_file:  Option<PathBuf>,
  pub input:        String,
  pub view:         Option<ResolvedView>,
  pub history:      History,
  pub status:       Option<String>,
  pub submitted:    Option<String>,
  pub should_quit:  bool,
  pub needs_render: bool,
}

impl Ctx {
  pub fn new(compiled: CompiledConfig, config_file: Option<PathBuf>) -> Self {
    let mut ctx = Self {
      session: Session::new(compiled.root),
      scheme: compiled.scheme,
      config_file,
      input: String::new(),
      view: None,
      history: History::default(),
      status: None,
      submitted: None,
      should_quit: false,
      needs_render: true,
    };
    ctx.refresh();
    ctx
  }

  /// Re-resolve the current input from scratch. Every input change goes
  /// through here; there is no incremental parser state to maintain.
  pub fn refresh(&mut self) {
    self.view = self.session.resolve(&self.input);
    self.needs_render = true;
  }

  /// Address for the current input. The compiled root is a sequence, which
  /// degenerates to pure suggestions instead of failing, so a record that
  /// never got a host means nothing actually matched.
  pub fn url(&self) -> Option<String> {
    self
      .view
      .as_ref()
      .filter(|view| !view.record.host.is_empty())
      .map(|view| view.record.to_url(&self.scheme))
  }

  /// Recompile the config file and swap the new tree in atomically. A
  /// compile error keeps the current tree and surfaces the location in the
  /// status line.
  pub fn reload_config(&mut self) {
    self.needs_render = true;

    let Some(path) = self.config_file.clone() else {
      self.status = Some("built-in shortcuts active, nothing to reload".to_string());
      return;
    };

    let source = match std::fs::read_to_string(&path) {
      Ok(source) => source,
      Err(error) => {
        log::warn!("config reload failed: {error}");
        self.status = Some(format!("cannot read {}: {error}", path.display()));
        return;
      },
    };

    match the_nav_config::compile(&source) {
      Ok(compiled) => {
        self.session.install(compiled.root);
        self.scheme = compiled.scheme;
        self.status = Some("shortcuts reloaded".to_string());
        self.refresh();
      },
      Err(error) => {
        log::warn!("config reload failed: {error}");
        self.status = Some(format!("config error at {error}"));
      },
    }
  }
}

/// In-memory ring of previously submitted inputs, most recent last.
/// Deliberately not persisted.
#[derive(Debug, Default)]
pub struct History {
  entries: Vec<String>,
  /// Walk position: 0 is the most recent entry.
  index:   Option<usize>,
}

impl History {
  const CAPACITY: usize = 10;

  pub fn push(&mut self, entry: &str) {
    self.index = None;
    if self.entries.last().is_some_and(|last| last == entry) {
      return;
    }
    if self.entries.len() >= Self::CAPACITY {
      self.entries.remove(0);
    }
    self.entries.push(entry.to_string());
  }

  /// Step towards older entries, wrapping around.
  pub fn back(&mut self) -> Option<&str> {
    if self.entries.is_empty() {
      return None;
    }
    let next = match self.index {
      None => 0,
      Some(i) => (i + 1) % self.entries.len(),
    };
    self.index = Some(next);
    self.entry_at(next)
  }

  /// Step towards newer entries, wrapping around.
  pub fn forward(&mut self) -> Option<&str> {
    if self.entries.is_empty() {
      return None;
    }
    let len = self.entries.len();
    let next = match self.index {
      None => len - 1,
      Some(i) => (i + len - 1) % len,
    };
    self.index = Some(next);
    self.entry_at(next)
  }

  fn entry_at(&self, index: usize) -> Option<&str> {
    self
      .entries
      .get(self.entries.len() - index - 1)
      .map(String::as_str)
  }
}

#[cfg(test)]
mod tests {
  use std::io::Write;

  use super::*;

  #[test]
  fn history_walks_from_most_recent_backwards() {
    let mut history = History::default();
    history.push("one");
    history.push("two");
    history.push("three");

    assert_eq!(history.back(), Some("three"));
    assert_eq!(history.back(), Some("two"));
    assert_eq!(history.back(), Some("one"));
    // Wraps around.
    assert_eq!(history.back(), Some("three"));
  }

  #[test]
  fn history_forward_reverses_the_walk() {
    let mut history = History::default();
    history.push("one");
    history.push("two");

    assert_eq!(history.back(), Some("two"));
    assert_eq!(history.back(), Some("one"));
    assert_eq!(history.forward(), Some("two"));
  }

  #[test]
  fn history_skips_duplicate_of_most_recent() {
    let mut history = History::default();
    history.push("same");
    history.push("same");
    assert_eq!(history.entries.len(), 1);
  }

  #[test]
  fn history_is_capped() {
    let mut history = History::default();
    for i in 0..15 {
      history.push(&format!("entry {i}"));
    }
    assert_eq!(history.entries.len(), History::CAPACITY);
    assert_eq!(history.back(), Some("entry 14"));
  }

  #[test]
  fn reload_swaps_tree_and_keeps_old_one_on_error() {
    let compiled = the_nav_config::compile(the_nav_config::DEFAULT_SOURCE).unwrap();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[[shortcut]]\npattern = \"$z\"\nhost = \"zulip.com\"").unwrap();

    let mut ctx = Ctx::new(compiled, Some(file.path().to_path_buf()));
    assert!(ctx.session.resolve("z").unwrap().record.host.is_empty());

    ctx.reload_config();
    assert_eq!(
      ctx.session.resolve("z").unwrap().record.host,
      "zulip.com"
    );

    // A broken config must not unseat the working tree.
    let mut broken = tempfile::NamedTempFile::new().unwrap();
    writeln!(broken, "[[shortcut]]\nhost = \"no-kind.example\"").unwrap();
    ctx.config_file = Some(broken.path().to_path_buf());
    ctx.reload_config();
    assert!(ctx.status.as_deref().unwrap_or("").contains("config error"));
    assert_eq!(
      ctx.session.resolve("z").unwrap().record.host,
      "zulip.com"
    );
  }
}
