//! Construction-time errors.
//!
//! Evaluation failure is never an error: a failing child or decorator is
//! the ordinary [`Status::Failure`](crate::Status::Failure) outcome. The
//! variants here cover the invariants a tree must satisfy before its first
//! tick; they are reported from the `build` entry points, so a malformed
//! tree never reaches evaluation.

/// An invariant violation detected while building a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// A sequence was finalized with no children.
    #[error("sequence requires at least one child")]
    EmptySequence,

    /// A selector was finalized with no children.
    #[error("selector requires at least one child")]
    EmptySelector,

    /// A multiplexer was finalized with no children.
    #[error("multiplexer requires at least one child")]
    EmptyMultiplexer,
}
