//! Node kinds and combinators of the shortcut tree.
//!
//! The tree is a closed set of variants dispatched through a single
//! [`Node::traverse`] / [`Node::as_possible`] pair:
//!
//! - [`PatternNode`] matches a fixed literal key derived from a shortcut
//!   spec with embedded `$x` placeholders.
//! - [`CaptureNode`] consumes free text up to an optional terminator.
//! - [`Alternative`], [`Sequence`], and [`Aggregate`] compose nodes without
//!   any parent-aware shared structure.
//!
//! `traverse` consumes input; `as_possible` speculatively enumerates a
//! node's continuation as a zero-consumption outcome so the host can show
//! what could legally come next. A failed branch yields `None` all the way
//! up: a literal prefix matches exactly or the branch is abandoned.
//!
//! Child dispatch is strict first-match-wins everywhere. Authoring order is
//! a contract, not a hint; overlapping keys are resolved by priority, never
//! diagnosed.

use thiserror::Error;

use crate::{
  action::{
    Action,
    Mutation,
    VisualSegment,
  },
  color::CAPTURE_SEED,
  outcome::MatchOutcome,
};

/// A shortcut spec whose `$` placeholders mark no key characters at all.
/// A pattern node with an empty literal key is meaningless.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("shortcut '{shortcut}' marks no key characters")]
pub struct EmptyKeyError {
  pub shortcut: String,
}

#[derive(Debug, Clone)]
pub enum Node {
  Pattern(PatternNode),
  Capture(CaptureNode),
  Alternative(Box<Alternative>),
  Sequence(Box<Sequence>),
  Aggregate(Aggregate),
}

impl Node {
  pub fn alternative(or_body: Node, then_body: Node) -> Self {
    Node::Alternative(Box::new(Alternative { or_body, then_body }))
  }

  pub fn sequence(and_body: Node, then_body: Node) -> Self {
    Node::Sequence(Box::new(Sequence {
      and_body,
      then_body,
    }))
  }

  /// Consume as much of `input` as this subtree can, starting exactly at
  /// `position`. `None` means the branch does not apply at all.
  pub fn traverse(&self, input: &str, position: usize) -> Option<MatchOutcome> {
    match self {
      Node::Pattern(node) => node.traverse(input, position),
      Node::Capture(node) => node.traverse(input, position),
      Node::Alternative(node) => node.traverse(input, position),
      Node::Sequence(node) => node.traverse(input, position),
      Node::Aggregate(node) => node.traverse(input, position),
    }
  }

  /// Zero-consumption outcome describing this subtree as a suggestion.
  pub fn as_possible(&self) -> MatchOutcome {
    match self {
      Node::Pattern(node) => node.as_possible(),
      Node::Capture(node) => node.as_possible(),
      Node::Alternative(node) => node.as_possible(),
      Node::Sequence(node) => node.as_possible(),
      Node::Aggregate(node) => node.as_possible(),
    }
  }
}

impl From<PatternNode> for Node {
  fn from(node: PatternNode) -> Self {
    Node::Pattern(node)
  }
}

impl From<CaptureNode> for Node {
  fn from(node: CaptureNode) -> Self {
    Node::Capture(node)
  }
}

impl From<Aggregate> for Node {
  fn from(node: Aggregate) -> Self {
    Node::Aggregate(node)
  }
}

/// Literal-key matcher. The key is fixed at construction and never empty.
#[derive(Debug, Clone)]
pub struct PatternNode {
  key:       String,
  children:  Vec<Node>,
  mutations: Vec<Mutation>,
}

impl PatternNode {
  /// Extracts the literal key from a shortcut spec: every character
  /// directly following a `$` joins the key, everything else is authoring
  /// annotation. `"$git$hub"` yields key `"gh"`.
  pub fn from_shortcut(shortcut: &str) -> Result<Self, EmptyKeyError> {
    let mut key = String::new();
    let mut chars = shortcut.chars();
    while let Some(c) = chars.next() {
      if c == '$'
        && let Some(marked) = chars.next()
      {
        key.push(marked);
      }
    }

    if key.is_empty() {
      return Err(EmptyKeyError {
        shortcut: shortcut.to_string(),
      });
    }

    Ok(Self {
      key,
      children: Vec::new(),
      mutations: Vec::new(),
    })
  }

  pub fn key(&self) -> &str {
    &self.key
  }

  /// Appends a child; earlier children win during dispatch.
  #[must_use]
  pub fn child(mut self, child: impl Into<Node>) -> Self {
    self.children.push(child.into());
    self
  }

  #[must_use]
  pub fn mutation(mut self, mutation: Mutation) -> Self {
    self.mutations.push(mutation);
    self
  }

  fn matches(&self, input: &str, position: usize) -> bool {
    input
      .get(position..)
      .is_some_and(|rest| rest.starts_with(&self.key))
  }

  /// Own consumption and actions: bound mutations plus a passed segment.
  fn own_outcome(&self) -> MatchOutcome {
    let mut actions: Vec<Action> = self
      .mutations
      .iter()
      .map(|mutation| mutation.bind(&self.key))
      .collect();
    actions.push(Action::Segment(VisualSegment::passed(
      &self.key,
      self.key.chars().count(),
    )));
    MatchOutcome::new(self.key.len(), actions)
  }

  fn traverse(&self, input: &str, position: usize) -> Option<MatchOutcome> {
    if !self.matches(input, position) {
      return None;
    }

    if self.children.is_empty() {
      return Some(self.own_outcome());
    }

    let boundary = position + self.key.len();
    if input.len() <= boundary {
      // Nothing typed past this key yet: surface every child's
      // continuation alongside the consumed key.
      let possibles = self
        .children
        .iter()
        .fold(MatchOutcome::empty(), |acc, child| {
          acc.merge(child.as_possible())
        });
      return Some(self.own_outcome().merge(possibles));
    }

    for child in &self.children {
      if let Some(result) = child.traverse(input, boundary) {
        return Some(self.own_outcome().merge(result));
      }
    }
    None
  }

  fn as_possible(&self) -> MatchOutcome {
    MatchOutcome::new(0, vec![Action::Segment(VisualSegment::possible(&self.key))])
  }
}

/// Free-text matcher: consumes everything up to an optional terminator, or
/// to end of input. Chains "parameter, then next command" patterns.
#[derive(Debug, Clone)]
pub struct CaptureNode {
  terminator: Option<char>,
  children:   Vec<Node>,
  mutations:  Vec<Mutation>,
}

impl CaptureNode {
  pub fn new(terminator: Option<char>) -> Self {
    Self {
      terminator,
      children: Vec::new(),
      mutations: Vec::new(),
    }
  }

  #[must_use]
  pub fn child(mut self, child: impl Into<Node>) -> Self {
    self.children.push(child.into());
    self
  }

  #[must_use]
  pub fn mutation(mut self, mutation: Mutation) -> Self {
    self.mutations.push(mutation);
    self
  }

  /// Captured text and the byte length of the terminator actually found.
  /// An absent or unmatched terminator contributes no length; the capture
  /// then runs to end of input.
  fn captured<'a>(&self, input: &'a str, position: usize) -> (&'a str, usize) {
    let rest = input.get(position..).unwrap_or("");
    match self.terminator {
      Some(terminator) => match rest.find(terminator) {
        Some(end) => (&rest[..end], terminator.len_utf8()),
        None => (rest, 0),
      },
      None => (rest, 0),
    }
  }

  fn own_outcome(&self, text: &str, terminator_len: usize) -> MatchOutcome {
    let mut actions: Vec<Action> = self
      .mutations
      .iter()
      .map(|mutation| mutation.bind(text))
      .collect();
    actions.push(Action::Segment(VisualSegment::passed(
      CAPTURE_SEED,
      text.chars().count(),
    )));
    MatchOutcome::new(text.len() + terminator_len, actions)
  }

  fn traverse(&self, input: &str, position: usize) -> Option<MatchOutcome> {
    let (text, terminator_len) = self.captured(input, position);

    if self.children.is_empty() {
      return Some(self.own_outcome(text, terminator_len));
    }

    let boundary = position + text.len() + terminator_len;
    if input.len() <= boundary {
      let possibles = self
        .children
        .iter()
        .fold(MatchOutcome::empty(), |acc, child| {
          acc.merge(child.as_possible())
        });
      return Some(self.own_outcome(text, terminator_len).merge(possibles));
    }

    for child in &self.children {
      if let Some(result) = child.traverse(input, boundary) {
        return Some(self.own_outcome(text, terminator_len).merge(result));
      }
    }
    None
  }

  fn as_possible(&self) -> MatchOutcome {
    MatchOutcome::new(
      0,
      vec![Action::Segment(VisualSegment::possible(CAPTURE_SEED))],
    )
  }
}

/// "This branch, then continue": `or_body` must match for the node to
/// apply at all, there is no fallback.
#[derive(Debug, Clone)]
pub struct Alternative {
  pub or_body:   Node,
  pub then_body: Node,
}

impl Alternative {
  fn traverse(&self, input: &str, position: usize) -> Option<MatchOutcome> {
    if input.len() <= position {
      return Some(self.or_body.as_possible());
    }

    let or_result = self.or_body.traverse(input, position)?;
    let boundary = position + or_result.consumed;

    if input.len() <= boundary {
      return Some(or_result.merge(self.then_body.as_possible()));
    }

    let then_result = self.then_body.traverse(input, boundary)?;
    Some(or_result.merge(then_result))
  }

  fn as_possible(&self) -> MatchOutcome {
    self.or_body.as_possible()
  }
}

/// "Zero or more of X, then Y, where Y may itself just be a suggestion."
/// Never fails: with nothing matched it degenerates to its own possibles.
#[derive(Debug, Clone)]
pub struct Sequence {
  pub and_body:  Node,
  pub then_body: Node,
}

impl Sequence {
  fn traverse(&self, input: &str, position: usize) -> Option<MatchOutcome> {
    let mut accumulated = MatchOutcome::empty();
    loop {
      // A zero-length success must terminate the repetition.
      match self.and_body.traverse(input, position + accumulated.consumed) {
        Some(result) if result.consumed > 0 => accumulated = accumulated.merge(result),
        _ => break,
      }
    }

    match self.then_body.traverse(input, position + accumulated.consumed) {
      Some(then_result) => Some(accumulated.merge(then_result)),
      None => Some(accumulated.merge(self.as_possible())),
    }
  }

  fn as_possible(&self) -> MatchOutcome {
    self
      .and_body
      .as_possible()
      .merge(self.then_body.as_possible())
  }
}

/// N-ary dispatch: the first child to match wins. Shared mutations apply
/// regardless of which child matched, ahead of the child's own actions.
#[derive(Debug, Clone, Default)]
pub struct Aggregate {
  children:  Vec<Node>,
  mutations: Vec<Mutation>,
}

impl Aggregate {
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub fn child(mut self, child: impl Into<Node>) -> Self {
    self.children.push(child.into());
    self
  }

  #[must_use]
  pub fn mutation(mut self, mutation: Mutation) -> Self {
    self.mutations.push(mutation);
    self
  }

  fn traverse(&self, input: &str, position: usize) -> Option<MatchOutcome> {
    for child in &self.children {
      if let Some(result) = child.traverse(input, position) {
        let shared: Vec<Action> = self
          .mutations
          .iter()
          .map(|mutation| mutation.bind(""))
          .collect();
        return Some(MatchOutcome::new(0, shared).merge(result));
      }
    }
    None
  }

  fn as_possible(&self) -> MatchOutcome {
    self
      .children
      .iter()
      .fold(MatchOutcome::empty(), |acc, child| {
        acc.merge(child.as_possible())
      })
  }
}
