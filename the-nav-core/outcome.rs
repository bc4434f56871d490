//! The result algebra every traversal speaks.
//!
//! Each node traversal produces a [`MatchOutcome`]; sibling branches and
//! parent/child results are always joined through [`MatchOutcome::merge`].
//! The merge is associative with [`MatchOutcome::empty`] as a two-sided
//! identity, so traversal code can fold zero, one, or many branch results
//! without special-casing arity.

use crate::action::Action;

/// How much input one traversal consumed (a byte offset into the input)
/// and the ordered actions to replay against a fresh target record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchOutcome {
  pub consumed: usize,
  pub actions:  Vec<Action>,
}

impl MatchOutcome {
  /// The merge identity: nothing consumed, nothing to do.
  pub fn empty() -> Self {
    Self::default()
  }

  pub fn new(consumed: usize, actions: Vec<Action>) -> Self {
    Self { consumed, actions }
  }

  /// Consumed lengths add; action order is preserved left-to-right, so
  /// ancestor actions stay ahead of descendant actions.
  #[must_use]
  pub fn merge(mut self, other: Self) -> Self {
    self.consumed += other.consumed;
    self.actions.extend(other.actions);
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::action::VisualSegment;

  fn outcome((consumed, seeds): (u8, Vec<u8>)) -> MatchOutcome {
    let actions = seeds
      .into_iter()
      .map(|s| Action::Segment(VisualSegment::passed(&format!("k{s}"), s as usize)))
      .collect();
    MatchOutcome::new(consumed as usize, actions)
  }

  quickcheck::quickcheck! {
      fn merge_is_associative(a: (u8, Vec<u8>), b: (u8, Vec<u8>), c: (u8, Vec<u8>)) -> bool {
          let (a, b, c) = (outcome(a), outcome(b), outcome(c));
          let left = a.clone().merge(b.clone()).merge(c.clone());
          let right = a.merge(b.merge(c));
          left == right
      }

      fn empty_is_two_sided_identity(x: (u8, Vec<u8>)) -> bool {
          let x = outcome(x);
          MatchOutcome::empty().merge(x.clone()) == x
              && x.clone().merge(MatchOutcome::empty()) == x
      }
  }

  #[test]
  fn merge_adds_lengths_and_concatenates_in_order() {
    let a = outcome((2, vec![1]));
    let b = outcome((3, vec![2, 3]));
    let merged = a.merge(b);
    assert_eq!(merged.consumed, 5);
    let seeds: Vec<_> = merged
      .actions
      .iter()
      .map(|action| match action {
        Action::Segment(segment) => segment.seed.clone(),
        Action::Set { .. } => unreachable!(),
      })
      .collect();
    assert_eq!(seeds, ["k1", "k2", "k3"]);
  }
}
