//! Declarative shortcut definitions compiled into an immutable node tree.
//!
//! Shortcuts are authored in TOML: `[[shortcut]]` entries are the
//! alternatives of the tree, `[[prefix]]` entries are modifier commands
//! that may repeat before any shortcut, and nested `then` arrays chain
//! children in match-priority order. Each entry is either a pattern (a
//! shortcut spec with `$x` placeholder keys) or a free-text capture.
//!
//! Compilation either produces a complete tree or a structured
//! [`ConfigError`] carrying a `(row, column)` location for inline
//! diagnostics; the engine is never handed a partially-compiled tree.

use std::ops::Range;

use indexmap::IndexMap;
use serde::Deserialize;
use the_nav_core::{
  action::{
    Field,
    Mutation,
  },
  node::{
    Aggregate,
    CaptureNode,
    Node,
    PatternNode,
  },
};
use thiserror::Error;
use toml::Spanned;

/// Shortcut definitions shipped with the binary, used when no config file
/// is given.
pub const DEFAULT_SOURCE: &str = include_str!("../default.toml");

/// Structured compile error. `row` and `col` are 0-based, ready for editor
/// annotations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{row}:{col}: {message}")]
pub struct ConfigError {
  pub row:     usize,
  pub col:     usize,
  pub message: String,
}

/// A compiled tree plus the settings the host needs alongside it.
#[derive(Debug, Clone)]
pub struct CompiledConfig {
  pub scheme: String,
  pub root:   Node,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct Config {
  #[serde(default)]
  defaults: Defaults,
  #[serde(default)]
  prefix:   Vec<EntrySpec>,
  #[serde(default)]
  shortcut: Vec<EntrySpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct Defaults {
  #[serde(default = "default_scheme")]
  scheme: String,
}

impl Default for Defaults {
  fn default() -> Self {
    Self {
      scheme: default_scheme(),
    }
  }
}

fn default_scheme() -> String {
  "https".to_string()
}

/// One node of the authored tree: a pattern or a capture, the field writes
/// it performs, and its children.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct EntrySpec {
  pattern:    Option<Spanned<String>>,
  #[serde(default)]
  capture:    bool,
  terminator: Option<Spanned<String>>,
  /// Query parameter receiving the matched text.
  param:      Option<String>,
  host:       Option<String>,
  path:       Option<String>,
  anchor:     Option<String>,
  /// Literal query parameters.
  #[serde(default)]
  param_set:  IndexMap<String, String>,
  new_window: Option<bool>,
  focus:      Option<bool>,
  #[serde(default)]
  then:       Vec<EntrySpec>,
}

/// Compiles a TOML document into a resolvable tree.
///
/// The tree is shaped `Sequence(Aggregate(prefixes), Aggregate(shortcuts))`
/// so an empty input already suggests every branch, and prefixes may repeat
/// before a shortcut.
pub fn compile(source: &str) -> Result<CompiledConfig, ConfigError> {
  let config: Config = toml::from_str(source).map_err(|error| syntax_error(source, error))?;

  let mut prefixes = Aggregate::new();
  for (i, entry) in config.prefix.iter().enumerate() {
    prefixes = prefixes.child(build_entry(entry, source, &format!("prefix[{i}]"))?);
  }

  let mut shortcuts = Aggregate::new();
  for (i, entry) in config.shortcut.iter().enumerate() {
    shortcuts = shortcuts.child(build_entry(entry, source, &format!("shortcut[{i}]"))?);
  }

  log::debug!(
    "compiled shortcut tree: {} prefixes, {} shortcuts",
    config.prefix.len(),
    config.shortcut.len()
  );

  Ok(CompiledConfig {
    scheme: config.defaults.scheme,
    root:   Node::sequence(prefixes.into(), shortcuts.into()),
  })
}

fn build_entry(entry: &EntrySpec, source: &str, context: &str) -> Result<Node, ConfigError> {
  match (&entry.pattern, entry.capture) {
    (Some(pattern), true) => Err(at_span(
      source,
      pattern.span(),
      format!("{context} cannot be both a pattern and a capture"),
    )),
    (Some(pattern), false) => {
      if let Some(terminator) = &entry.terminator {
        return Err(at_span(
          source,
          terminator.span(),
          format!("{context}: a terminator is only meaningful for a capture"),
        ));
      }

      let mut node = PatternNode::from_shortcut(pattern.get_ref())
        .map_err(|error| at_span(source, pattern.span(), error.to_string()))?;
      for mutation in mutations(entry) {
        node = node.mutation(mutation);
      }
      for (i, child) in entry.then.iter().enumerate() {
        node = node.child(build_entry(child, source, &format!("{context}.then[{i}]"))?);
      }
      Ok(node.into())
    },
    (None, true) => {
      let terminator = match &entry.terminator {
        Some(terminator) => {
          let mut chars = terminator.get_ref().chars();
          match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => {
              return Err(at_span(
                source,
                terminator.span(),
                format!("{context}: terminator must be a single character"),
              ));
            },
          }
        },
        None => None,
      };

      let mut node = CaptureNode::new(terminator);
      for mutation in mutations(entry) {
        node = node.mutation(mutation);
      }
      for (i, child) in entry.then.iter().enumerate() {
        node = node.child(build_entry(child, source, &format!("{context}.then[{i}]"))?);
      }
      Ok(node.into())
    },
    (None, false) => Err(ConfigError {
      row:     0,
      col:     0,
      message: format!("{context} is neither a pattern nor a capture"),
    }),
  }
}

/// Field writes in a fixed order: address fields first, then parameters,
/// then behavior flags.
fn mutations(entry: &EntrySpec) -> Vec<Mutation> {
  let mut out = Vec::new();
  if let Some(host) = &entry.host {
    out.push(Mutation::literal(Field::Host, host));
  }
  if let Some(path) = &entry.path {
    out.push(Mutation::literal(Field::Path, path));
  }
  if let Some(anchor) = &entry.anchor {
    out.push(Mutation::literal(Field::Anchor, anchor));
  }
  for (name, value) in &entry.param_set {
    out.push(Mutation::literal(Field::Param(name.clone()), value));
  }
  if let Some(param) = &entry.param {
    out.push(Mutation::matched(Field::Param(param.clone())));
  }
  if let Some(new_window) = entry.new_window {
    out.push(Mutation::literal(Field::NewWindow, new_window.to_string()));
  }
  if let Some(focus) = entry.focus {
    out.push(Mutation::literal(Field::AutoFocus, focus.to_string()));
  }
  out
}

fn syntax_error(source: &str, error: toml::de::Error) -> ConfigError {
  let offset = error.span().map_or(0, |span| span.start);
  let (row, col) = position(source, offset);
  ConfigError {
    row,
    col,
    message: error.message().to_string(),
  }
}

fn at_span(source: &str, span: Range<usize>, message: impl Into<String>) -> ConfigError {
  let (row, col) = position(source, span.start);
  ConfigError {
    row,
    col,
    message: message.into(),
  }
}

/// 0-based row and column of a byte offset, columns counted in characters.
fn position(source: &str, offset: usize) -> (usize, usize) {
  let clamped = offset.min(source.len());
  let before = &source[..clamped];
  let row = before.matches('\n').count();
  let col = before
    .rsplit('\n')
    .next()
    .map_or(0, |line| line.chars().count());
  (row, col)
}

#[cfg(test)]
mod tests {
  use the_nav_core::resolve::resolve;

  use super::*;

  #[test]
  fn default_source_compiles() {
    let compiled = compile(DEFAULT_SOURCE).unwrap();
    assert_eq!(compiled.scheme, "https");
  }

  #[test]
  fn compiles_and_resolves_a_chain() {
    let compiled = compile(
      r#"
[[shortcut]]
pattern = "$g$ "
host = "github.com"

[[shortcut.then]]
capture = true
param = "q"
"#,
    )
    .unwrap();

    let view = resolve(&compiled.root, "g search").unwrap();
    assert_eq!(view.record.host, "github.com");
    assert_eq!(
      view.record.params.get("q").map(String::as_str),
      Some("search")
    );
  }

  #[test]
  fn prefixes_repeat_before_shortcuts() {
    let compiled = compile(
      r#"
[[prefix]]
pattern = "$!"
new-window = true

[[prefix]]
pattern = "$."
focus = true

[[shortcut]]
pattern = "$g$h"
host = "github.com"
"#,
    )
    .unwrap();

    let view = resolve(&compiled.root, "!.gh").unwrap();
    assert_eq!(view.record.host, "github.com");
    assert!(view.record.new_window);
    assert!(view.record.auto_focus);
  }

  #[test]
  fn empty_input_suggests_every_branch() {
    let compiled = compile(
      r#"
[[shortcut]]
pattern = "$g$h"
host = "github.com"

[[shortcut]]
pattern = "$y$t"
host = "youtube.com"
"#,
    )
    .unwrap();

    let view = resolve(&compiled.root, "").unwrap();
    let seeds: Vec<_> = view
      .segments
      .iter()
      .map(|segment| segment.seed.as_str())
      .collect();
    assert_eq!(seeds, ["gh", "yt"]);
  }

  #[test]
  fn declaration_order_is_match_priority() {
    let compiled = compile(
      r#"
[[shortcut]]
pattern = "$g"
host = "first.example"

[[shortcut]]
pattern = "$g"
host = "second.example"
"#,
    )
    .unwrap();

    let view = resolve(&compiled.root, "g").unwrap();
    assert_eq!(view.record.host, "first.example");
  }

  #[test]
  fn literal_params_apply_alongside_captured_ones() {
    let compiled = compile(
      r#"
[[shortcut]]
pattern = "$g$ "
host = "github.com"
path = "search"
param-set = { type = "repositories" }

[[shortcut.then]]
capture = true
param = "q"
"#,
    )
    .unwrap();

    let view = resolve(&compiled.root, "g rust").unwrap();
    assert_eq!(
      view.record.to_url("https"),
      "https://github.com/search?type=repositories&q=rust"
    );
  }

  #[test]
  fn syntax_errors_carry_a_location() {
    let error = compile("[[shortcut]\npattern = \"$g\"\n").unwrap_err();
    assert_eq!(error.row, 0);
  }

  #[test]
  fn keyless_pattern_is_reported_at_its_span() {
    let source = "[[shortcut]]\npattern = \"github\"\nhost = \"github.com\"\n";
    let error = compile(source).unwrap_err();
    assert_eq!(error.row, 1);
    assert!(error.message.contains("no key characters"));
  }

  #[test]
  fn multichar_terminator_is_rejected() {
    let source = "[[shortcut]]\ncapture = true\nterminator = \"->\"\n";
    let error = compile(source).unwrap_err();
    assert_eq!(error.row, 2);
    assert!(error.message.contains("single character"));
  }

  #[test]
  fn entry_kind_is_required() {
    let error = compile("[[shortcut]]\nhost = \"github.com\"\n").unwrap_err();
    assert!(error.message.contains("neither a pattern nor a capture"));
  }

  #[test]
  fn pattern_and_capture_are_mutually_exclusive() {
    let source = "[[shortcut]]\npattern = \"$g\"\ncapture = true\n";
    let error = compile(source).unwrap_err();
    assert!(error.message.contains("cannot be both"));
  }
}
