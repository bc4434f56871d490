//! Mutation actions and visual segment descriptors.
//!
//! Actions are plain data interpreted against a target record, never
//! closures: nodes are authored with [`Mutation`]s whose value may refer to
//! the text the node eventually matches, and traversal binds them into
//! concrete [`Action`]s once that text is known. This keeps every effect of
//! a resolution inspectable and replayable.

use serde::Serialize;

/// Target-record field a mutation writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
  Host,
  Path,
  Param(String),
  Anchor,
  NewWindow,
  AutoFocus,
}

/// Where a mutation's value comes from when it is bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
  /// A literal authored alongside the node.
  Literal(String),
  /// The node's matched text: the literal key for pattern nodes, the
  /// captured free text for capture nodes.
  Matched,
}

/// Authored mutation attached to a node at tree-compile time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
  pub field: Field,
  pub value: Value,
}

impl Mutation {
  pub fn literal(field: Field, value: impl Into<String>) -> Self {
    Self {
      field,
      value: Value::Literal(value.into()),
    }
  }

  pub fn matched(field: Field) -> Self {
    Self {
      field,
      value: Value::Matched,
    }
  }

  /// Substitutes the matched text and yields a concrete action.
  pub fn bind(&self, matched: &str) -> Action {
    let value = match &self.value {
      Value::Literal(v) => v.clone(),
      Value::Matched => matched.to_string(),
    };
    Action::Set {
      field: self.field.clone(),
      value,
    }
  }
}

/// One concrete effect of a resolution, applied in merge order.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
  Set { field: Field, value: String },
  Segment(VisualSegment),
}

/// Whether a segment covers already-consumed input or suggests a legal
/// continuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentState {
  Passed,
  Possible,
}

/// Abstract descriptor handed to the host for rendering. The engine never
/// decides colors; `seed` feeds [`crate::color`] on the host side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisualSegment {
  /// Character span consumed. Always zero for possible segments.
  pub length: usize,
  pub seed:   String,
  pub state:  SegmentState,
}

impl VisualSegment {
  pub fn passed(seed: &str, length: usize) -> Self {
    Self {
      length,
      seed: seed.to_string(),
      state: SegmentState::Passed,
    }
  }

  pub fn possible(seed: &str) -> Self {
    Self {
      length: 0,
      seed: seed.to_string(),
      state: SegmentState::Possible,
    }
  }
}
