//! The tree handle and tick entry point.

use crate::Status;
use crate::builder::{
    BranchBuilder, MultiplexerBuilder, build_leaf, build_multiplexer, build_multiplexer_with,
    build_selector, build_sequence,
};
use crate::error::BuildError;
use crate::node::Node;

/// A fully built behavior tree.
///
/// Construction and evaluation never overlap: the tree is assembled once
/// through the builder entry points below, and from then on only `tick`
/// touches it. All per-node memory slots were allocated during the build,
/// so a tick performs no allocation of its own.
pub struct Tree<C, LM = (), DM = ()> {
    root: Node<C, LM, DM>,
}

impl<C, LM: Default, DM: Default> Tree<C, LM, DM> {
    /// Wraps a previously built root node.
    pub fn new(root: Node<C, LM, DM>) -> Self {
        Self { root }
    }

    /// Builds a tree whose root is a sequence.
    pub fn sequence(build: impl FnOnce(&mut BranchBuilder<C, LM, DM>)) -> Result<Self, BuildError> {
        build_sequence(build).map(Self::new)
    }

    /// Builds a tree whose root is a selector.
    pub fn selector(build: impl FnOnce(&mut BranchBuilder<C, LM, DM>)) -> Result<Self, BuildError> {
        build_selector(build).map(Self::new)
    }

    /// Builds a tree whose root is a multiplexer.
    pub fn multiplexer(
        build: impl FnOnce(&mut MultiplexerBuilder<C, LM, DM>),
    ) -> Result<Self, BuildError> {
        build_multiplexer(build).map(Self::new)
    }

    /// Builds a tree whose root is a multiplexer with the given selection
    /// callback.
    pub fn multiplexer_with<S, F>(
        selection: F,
        build: impl FnOnce(&mut MultiplexerBuilder<C, LM, DM>),
    ) -> Result<Self, BuildError>
    where
        S: Into<Status>,
        F: Fn(&mut C, &mut LM) -> S + Send + Sync + 'static,
    {
        build_multiplexer_with(selection, build).map(Self::new)
    }

    /// Builds a tree whose root is a single leaf.
    pub fn leaf<S, F>(callback: F) -> Self
    where
        S: Into<Status>,
        F: Fn(&mut C, &mut LM) -> S + Send + Sync + 'static,
    {
        Self::new(build_leaf(callback))
    }

    /// Runs one evaluation pass from the root.
    ///
    /// A tick is a single synchronous depth-first traversal: the context is
    /// threaded mutably through every callback that runs, and the root's
    /// status is returned. The evaluator itself keeps no state between
    /// ticks beyond the nodes' memory slots.
    pub fn tick(&mut self, ctx: &mut C) -> Status {
        let status = self.root.evaluate(ctx);
        tracing::trace!(code = status.code(), "tick complete");
        status
    }
}
