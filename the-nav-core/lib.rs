//! Incremental shortcut-to-address matching engine.
//!
//! A compiled tree of pattern, capture, and combinator nodes is traversed on
//! every input change: once to consume as much of the typed string as
//! possible, once (for the unconsumed tail) to enumerate legal continuations.
//! The traversal yields a [`outcome::MatchOutcome`] whose actions are
//! replayed, in order, against a fresh [`record::TargetRecord`]; the host
//! receives the record plus abstract visual segment descriptors and decides
//! how to draw them.
//!
//! The engine performs no I/O and keeps no state across invocations other
//! than the immutable tree owned by a [`resolve::Session`].

pub mod action;
pub mod color;
pub mod node;
pub mod outcome;
pub mod record;
pub mod resolve;
