//! The resolution driver and the session owning the compiled tree.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::{
  action::VisualSegment,
  node::Node,
  outcome::MatchOutcome,
  record::TargetRecord,
};

/// What one resolution pass hands to the host: the assembled record for
/// building an address, and the ordered segments for drawing a ribbon and
/// listing matched/suggested fragments.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedView {
  pub record:   TargetRecord,
  pub segments: Vec<VisualSegment>,
}

/// Runs one matching pass over the whole tree and replays the resulting
/// actions against a fresh record. Pure in `(root, input)`; `None` means no
/// branch matched anywhere and the host should clear its display.
pub fn resolve(root: &Node, input: &str) -> Option<ResolvedView> {
  let outcome: MatchOutcome = root.traverse(input, 0)?;

  let mut record = TargetRecord::default();
  for action in &outcome.actions {
    record.apply(action);
  }

  let segments = std::mem::take(&mut record.segments);
  Some(ResolvedView { record, segments })
}

/// Owns the compiled tree across keystrokes. Recompilation swaps the root
/// atomically, so a resolution in flight always sees a consistent tree; no
/// other state crosses invocations.
pub struct Session {
  root: ArcSwap<Node>,
}

impl Session {
  pub fn new(root: Node) -> Self {
    Self {
      root: ArcSwap::from_pointee(root),
    }
  }

  pub fn resolve(&self, input: &str) -> Option<ResolvedView> {
    let root = self.root.load();
    resolve(&root, input)
  }

  /// Installs a freshly compiled tree.
  pub fn install(&self, root: Node) {
    log::debug!("installing recompiled shortcut tree");
    self.root.store(Arc::new(root));
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    action::{
      Field,
      Mutation,
      SegmentState,
    },
    node::{
      Aggregate,
      CaptureNode,
      PatternNode,
    },
  };

  /// `"$g$ "` sets the host, then a capture writes the query parameter.
  fn github_tree() -> Node {
    let capture =
      CaptureNode::new(Some(' ')).mutation(Mutation::matched(Field::Param("q".to_string())));
    let github = PatternNode::from_shortcut("$g$ ")
      .unwrap()
      .mutation(Mutation::literal(Field::Host, "github.com"))
      .child(capture);
    Aggregate::new().child(github).into()
  }

  #[test]
  fn resolves_host_and_captured_parameter() {
    let view = resolve(&github_tree(), "g search").unwrap();
    assert_eq!(view.record.host, "github.com");
    assert_eq!(
      view.record.params.get("q").map(String::as_str),
      Some("search")
    );
    assert_eq!(view.record.to_url("https"), "https://github.com?q=search");
  }

  #[test]
  fn no_match_yields_no_view() {
    assert_eq!(resolve(&github_tree(), "zzz"), None);
  }

  #[test]
  fn segments_are_split_out_of_the_record() {
    let view = resolve(&github_tree(), "g search").unwrap();
    assert!(view.record.segments.is_empty());
    assert_eq!(view.segments.len(), 2);
    assert!(
      view
        .segments
        .iter()
        .all(|segment| segment.state == SegmentState::Passed)
    );
  }

  #[test]
  fn resolution_is_pure_across_calls() {
    let tree = github_tree();
    let first = resolve(&tree, "g one").unwrap();
    let _ = resolve(&tree, "g two").unwrap();
    let again = resolve(&tree, "g one").unwrap();
    assert_eq!(first, again);
  }

  #[test]
  fn session_swaps_trees_atomically() {
    let session = Session::new(github_tree());
    assert_eq!(
      session.resolve("g x").unwrap().record.host,
      "github.com"
    );

    let youtube = PatternNode::from_shortcut("$y$t")
      .unwrap()
      .mutation(Mutation::literal(Field::Host, "youtube.com"));
    session.install(Aggregate::new().child(youtube).into());

    assert_eq!(session.resolve("g x"), None);
    assert_eq!(session.resolve("yt").unwrap().record.host, "youtube.com");
  }
}
