//! The target record assembled by one resolution pass.

use indexmap::IndexMap;
use serde::Serialize;

use crate::action::{
  Action,
  Field,
  VisualSegment,
};

/// A navigable address plus behavior flags, created fresh per resolution
/// and discarded on the next keystroke. Visual segments accumulate here
/// while actions replay and are split out by the driver.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TargetRecord {
  pub host:       String,
  pub path:       String,
  pub params:     IndexMap<String, String>,
  pub anchor:     String,
  pub new_window: bool,
  pub auto_focus: bool,
  #[serde(skip)]
  pub segments:   Vec<VisualSegment>,
}

impl TargetRecord {
  /// Interprets one action. Later actions observe earlier writes, which is
  /// what lets a parameter-setting action run before a path-setting one.
  pub fn apply(&mut self, action: &Action) {
    match action {
      Action::Set { field, value } => match field {
        Field::Host => self.host = value.clone(),
        Field::Path => self.path = value.clone(),
        Field::Param(name) => {
          self.params.insert(name.clone(), value.clone());
        },
        Field::Anchor => self.anchor = value.clone(),
        Field::NewWindow => self.new_window = value == "true",
        Field::AutoFocus => self.auto_focus = value == "true",
      },
      Action::Segment(segment) => self.segments.push(segment.clone()),
    }
  }

  /// Order-preserving concatenation `scheme://host[/path][?k=v&…][#anchor]`.
  pub fn to_url(&self, scheme: &str) -> String {
    let mut url = format!("{scheme}://{}", self.host);
    if !self.path.is_empty() {
      url.push('/');
      url.push_str(&self.path);
    }
    if !self.params.is_empty() {
      let query: Vec<String> = self
        .params
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect();
      url.push('?');
      url.push_str(&query.join("&"));
    }
    if !self.anchor.is_empty() {
      url.push('#');
      url.push_str(&self.anchor);
    }
    url
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::action::Mutation;

  #[test]
  fn applies_field_writes_in_order() {
    let mut record = TargetRecord::default();
    record.apply(&Mutation::literal(Field::Host, "github.com").bind(""));
    record.apply(&Mutation::matched(Field::Param("q".to_string())).bind("search"));
    record.apply(&Mutation::literal(Field::Path, "search").bind(""));

    assert_eq!(record.host, "github.com");
    assert_eq!(record.params.get("q").map(String::as_str), Some("search"));
    assert_eq!(record.path, "search");
  }

  #[test]
  fn later_writes_overwrite_earlier_ones() {
    let mut record = TargetRecord::default();
    record.apply(&Mutation::literal(Field::Host, "example.com").bind(""));
    record.apply(&Mutation::literal(Field::Host, "github.com").bind(""));
    assert_eq!(record.host, "github.com");
  }

  #[test]
  fn flags_parse_from_literals() {
    let mut record = TargetRecord::default();
    record.apply(&Mutation::literal(Field::NewWindow, "true").bind(""));
    record.apply(&Mutation::literal(Field::AutoFocus, "false").bind(""));
    assert!(record.new_window);
    assert!(!record.auto_focus);
  }

  #[test]
  fn flag_literals_other_than_true_are_false() {
    let mut record = TargetRecord::default();
    record.apply(&Mutation::literal(Field::NewWindow, "").bind(""));
    record.apply(&Mutation::literal(Field::AutoFocus, "yes").bind(""));
    assert!(!record.new_window);
    assert!(!record.auto_focus);
  }

  #[test]
  fn url_concatenates_in_field_order() {
    let mut record = TargetRecord::default();
    record.apply(&Mutation::literal(Field::Host, "github.com").bind(""));
    record.apply(&Mutation::literal(Field::Path, "search").bind(""));
    record.apply(&Mutation::literal(Field::Param("q".to_string()), "rust").bind(""));
    record.apply(&Mutation::literal(Field::Param("type".to_string()), "code").bind(""));
    record.apply(&Mutation::literal(Field::Anchor, "top").bind(""));

    assert_eq!(
      record.to_url("https"),
      "https://github.com/search?q=rust&type=code#top"
    );
  }

  #[test]
  fn url_skips_empty_components() {
    let mut record = TargetRecord::default();
    record.apply(&Mutation::literal(Field::Host, "github.com").bind(""));
    assert_eq!(record.to_url("https"), "https://github.com");
  }
}
