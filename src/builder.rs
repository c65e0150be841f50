//! Fluent tree construction.
//!
//! Trees are assembled through builder objects passed by exclusive mutable
//! reference to synchronous configuration callbacks:
//!
//! ```rust
//! use behavior_tree::{Node, Status, build_sequence};
//!
//! let root: Node<Vec<u32>> = build_sequence(|b| {
//!     b.add_leaf(|ctx: &mut Vec<u32>, _: &mut ()| {
//!         ctx.push(0);
//!         Status::Success
//!     })
//!     .add_selector(|b| {
//!         b.add_leaf(|_: &mut Vec<u32>, _: &mut ()| Status::Failure)
//!             .add_leaf(|ctx: &mut Vec<u32>, _: &mut ()| {
//!                 ctx.push(1);
//!                 Status::Success
//!             });
//!     });
//! })
//! .unwrap();
//! # let _ = root;
//! ```
//!
//! Configuration callbacks return no value; all configuration happens as a
//! side effect on the builder. Construction is single-threaded, and every
//! invariant violation (an empty branch, an empty multiplexer) is collected
//! and reported as a [`BuildError`] from the outermost `build_*` call, so a
//! malformed tree is rejected before it can ever be ticked.
//!
//! Callbacks may return a [`Status`] or any `i32` (converted through
//! `Status::from`), matching the callback contract of the evaluation side.

use crate::Status;
use crate::composite::{Branch, BranchPolicy, Multiplexer};
use crate::decorator::{DecoratorCallback, DecoratorChain};
use crate::error::BuildError;
use crate::node::{Leaf, LeafCallback, Node, NodeKind};

/// Boxes a callback, adapting its return type into [`Status`].
fn boxed<C, M, S, F>(callback: F) -> Box<dyn Fn(&mut C, &mut M) -> Status + Send + Sync>
where
    S: Into<Status>,
    F: Fn(&mut C, &mut M) -> S + Send + Sync + 'static,
{
    Box::new(move |ctx, memory| callback(ctx, memory).into())
}

/// Builds a detached sequence node for later attachment via `add_node`.
pub fn build_sequence<C, LM, DM>(
    build: impl FnOnce(&mut BranchBuilder<C, LM, DM>),
) -> Result<Node<C, LM, DM>, BuildError>
where
    LM: Default,
    DM: Default,
{
    let mut builder = BranchBuilder::new(BranchPolicy::Sequence);
    build(&mut builder);
    builder.finish()
}

/// Builds a detached selector node for later attachment via `add_node`.
pub fn build_selector<C, LM, DM>(
    build: impl FnOnce(&mut BranchBuilder<C, LM, DM>),
) -> Result<Node<C, LM, DM>, BuildError>
where
    LM: Default,
    DM: Default,
{
    let mut builder = BranchBuilder::new(BranchPolicy::Selector);
    build(&mut builder);
    builder.finish()
}

/// Builds a detached multiplexer node without a selection callback.
///
/// The selection callback can still be supplied inside `build` via
/// [`MultiplexerBuilder::set_selection`]; a multiplexer that reaches
/// evaluation without one reports `Failure` on every tick.
pub fn build_multiplexer<C, LM, DM>(
    build: impl FnOnce(&mut MultiplexerBuilder<C, LM, DM>),
) -> Result<Node<C, LM, DM>, BuildError>
where
    LM: Default,
    DM: Default,
{
    let mut builder = MultiplexerBuilder::new(None);
    build(&mut builder);
    builder.finish()
}

/// Builds a detached multiplexer node with its selection callback.
pub fn build_multiplexer_with<C, LM, DM, S, F>(
    selection: F,
    build: impl FnOnce(&mut MultiplexerBuilder<C, LM, DM>),
) -> Result<Node<C, LM, DM>, BuildError>
where
    LM: Default,
    DM: Default,
    S: Into<Status>,
    F: Fn(&mut C, &mut LM) -> S + Send + Sync + 'static,
{
    let mut builder = MultiplexerBuilder::new(Some(boxed(selection)));
    build(&mut builder);
    builder.finish()
}

/// Builds a detached leaf node.
///
/// A leaf has no structural invariants, so this cannot fail.
pub fn build_leaf<C, LM, DM, S, F>(callback: F) -> Node<C, LM, DM>
where
    LM: Default,
    DM: Default,
    S: Into<Status>,
    F: Fn(&mut C, &mut LM) -> S + Send + Sync + 'static,
{
    Node::new(NodeKind::Leaf(Leaf::new(boxed(callback))))
}

/// Builds a detached leaf node, configuring it (decorators) via `build`.
pub fn build_leaf_with<C, LM, DM, S, F>(
    callback: F,
    build: impl FnOnce(&mut LeafBuilder<C, LM, DM>),
) -> Node<C, LM, DM>
where
    LM: Default,
    DM: Default,
    S: Into<Status>,
    F: Fn(&mut C, &mut LM) -> S + Send + Sync + 'static,
{
    let mut builder = LeafBuilder::new(boxed(callback));
    build(&mut builder);
    builder.finish()
}

/// Builder for a branch node (sequence or selector).
///
/// All methods return `&mut Self` for chaining. Child order is the order of
/// `add_*` calls and is fixed once the builder finishes.
pub struct BranchBuilder<C, LM = (), DM = ()> {
    branch: Branch<C, LM, DM>,
    decorators: DecoratorChain<C, DM>,
    errors: Vec<BuildError>,
}

impl<C, LM: Default, DM: Default> BranchBuilder<C, LM, DM> {
    fn new(policy: BranchPolicy) -> Self {
        Self {
            branch: Branch::new(policy),
            decorators: DecoratorChain::new(),
            errors: Vec::new(),
        }
    }

    /// Appends a leaf wrapping `callback`.
    pub fn add_leaf<S, F>(&mut self, callback: F) -> &mut Self
    where
        S: Into<Status>,
        F: Fn(&mut C, &mut LM) -> S + Send + Sync + 'static,
    {
        self.branch.push(build_leaf(callback));
        self
    }

    /// Appends a leaf, configuring it via a builder callback before control
    /// returns to this branch.
    pub fn add_leaf_with<S, F>(
        &mut self,
        callback: F,
        build: impl FnOnce(&mut LeafBuilder<C, LM, DM>),
    ) -> &mut Self
    where
        S: Into<Status>,
        F: Fn(&mut C, &mut LM) -> S + Send + Sync + 'static,
    {
        self.branch.push(build_leaf_with(callback, build));
        self
    }

    /// Appends a nested sequence, configured recursively by `build`.
    pub fn add_sequence(&mut self, build: impl FnOnce(&mut BranchBuilder<C, LM, DM>)) -> &mut Self {
        let mut child = BranchBuilder::new(BranchPolicy::Sequence);
        build(&mut child);
        self.absorb(child.finish())
    }

    /// Appends a nested selector, configured recursively by `build`.
    pub fn add_selector(&mut self, build: impl FnOnce(&mut BranchBuilder<C, LM, DM>)) -> &mut Self {
        let mut child = BranchBuilder::new(BranchPolicy::Selector);
        build(&mut child);
        self.absorb(child.finish())
    }

    /// Appends a nested multiplexer without a selection callback.
    pub fn add_multiplexer(
        &mut self,
        build: impl FnOnce(&mut MultiplexerBuilder<C, LM, DM>),
    ) -> &mut Self {
        let mut child = MultiplexerBuilder::new(None);
        build(&mut child);
        self.absorb(child.finish())
    }

    /// Appends a nested multiplexer with its selection callback.
    pub fn add_multiplexer_with<S, F>(
        &mut self,
        selection: F,
        build: impl FnOnce(&mut MultiplexerBuilder<C, LM, DM>),
    ) -> &mut Self
    where
        S: Into<Status>,
        F: Fn(&mut C, &mut LM) -> S + Send + Sync + 'static,
    {
        let mut child = MultiplexerBuilder::new(Some(boxed(selection)));
        build(&mut child);
        self.absorb(child.finish())
    }

    /// Appends a previously built node.
    ///
    /// The node is moved in, so a subtree built once can be composed into
    /// exactly one tree position; sharing a node under two parents is
    /// unrepresentable.
    pub fn add_node(&mut self, node: Node<C, LM, DM>) -> &mut Self {
        self.branch.push(node);
        self
    }

    /// Appends a decorator to this branch.
    pub fn decorate<S, F>(&mut self, callback: F) -> &mut Self
    where
        S: Into<Status>,
        F: Fn(&mut C, &mut DM) -> S + Send + Sync + 'static,
    {
        self.decorators.push(boxed(callback));
        self
    }

    /// Appends a batch of decorators, preserving the given order.
    pub fn decorate_all(&mut self, callbacks: Vec<DecoratorCallback<C, DM>>) -> &mut Self {
        self.decorators.extend(callbacks);
        self
    }

    /// Repeats the branch's child pass up to `loops` times per tick, while
    /// passes keep completing without failure. `0` means run once.
    pub fn set_loops(&mut self, loops: u32) -> &mut Self {
        self.branch.set_loops(loops);
        self
    }

    /// Retries a failing pass up to `attempts` times per tick. `0` means a
    /// single attempt.
    pub fn set_attempts(&mut self, attempts: u32) -> &mut Self {
        self.branch.set_attempts(attempts);
        self
    }

    fn absorb(&mut self, child: Result<Node<C, LM, DM>, BuildError>) -> &mut Self {
        match child {
            Ok(node) => self.branch.push(node),
            Err(err) => self.errors.push(err),
        }
        self
    }

    fn finish(mut self) -> Result<Node<C, LM, DM>, BuildError> {
        if self.branch.is_empty() {
            self.errors.push(match self.branch.policy() {
                BranchPolicy::Sequence => BuildError::EmptySequence,
                BranchPolicy::Selector => BuildError::EmptySelector,
            });
        }
        // The earliest recorded error wins, so a nested failure is reported
        // ahead of the emptiness it caused in its parent.
        if let Some(err) = self.errors.first() {
            return Err(*err);
        }
        Ok(Node {
            decorators: self.decorators,
            kind: NodeKind::Branch(self.branch),
        })
    }
}

/// Builder for a multiplexer node.
///
/// Mirrors [`BranchBuilder`] for child construction; a multiplexer has no
/// loop/attempt controls and instead carries an optional selection callback.
pub struct MultiplexerBuilder<C, LM = (), DM = ()> {
    multiplexer: Multiplexer<C, LM, DM>,
    decorators: DecoratorChain<C, DM>,
    errors: Vec<BuildError>,
}

impl<C, LM: Default, DM: Default> MultiplexerBuilder<C, LM, DM> {
    fn new(selection: Option<LeafCallback<C, LM>>) -> Self {
        Self {
            multiplexer: Multiplexer::new(selection),
            decorators: DecoratorChain::new(),
            errors: Vec::new(),
        }
    }

    /// Sets (or replaces) the selection callback.
    pub fn set_selection<S, F>(&mut self, selection: F) -> &mut Self
    where
        S: Into<Status>,
        F: Fn(&mut C, &mut LM) -> S + Send + Sync + 'static,
    {
        self.multiplexer.set_selection(boxed(selection));
        self
    }

    /// Appends a leaf wrapping `callback`.
    pub fn add_leaf<S, F>(&mut self, callback: F) -> &mut Self
    where
        S: Into<Status>,
        F: Fn(&mut C, &mut LM) -> S + Send + Sync + 'static,
    {
        self.multiplexer.push(build_leaf(callback));
        self
    }

    /// Appends a leaf, configuring it via a builder callback.
    pub fn add_leaf_with<S, F>(
        &mut self,
        callback: F,
        build: impl FnOnce(&mut LeafBuilder<C, LM, DM>),
    ) -> &mut Self
    where
        S: Into<Status>,
        F: Fn(&mut C, &mut LM) -> S + Send + Sync + 'static,
    {
        self.multiplexer.push(build_leaf_with(callback, build));
        self
    }

    /// Appends a nested sequence, configured recursively by `build`.
    pub fn add_sequence(&mut self, build: impl FnOnce(&mut BranchBuilder<C, LM, DM>)) -> &mut Self {
        let mut child = BranchBuilder::new(BranchPolicy::Sequence);
        build(&mut child);
        self.absorb(child.finish())
    }

    /// Appends a nested selector, configured recursively by `build`.
    pub fn add_selector(&mut self, build: impl FnOnce(&mut BranchBuilder<C, LM, DM>)) -> &mut Self {
        let mut child = BranchBuilder::new(BranchPolicy::Selector);
        build(&mut child);
        self.absorb(child.finish())
    }

    /// Appends a nested multiplexer without a selection callback.
    pub fn add_multiplexer(
        &mut self,
        build: impl FnOnce(&mut MultiplexerBuilder<C, LM, DM>),
    ) -> &mut Self {
        let mut child = MultiplexerBuilder::new(None);
        build(&mut child);
        self.absorb(child.finish())
    }

    /// Appends a nested multiplexer with its selection callback.
    pub fn add_multiplexer_with<S, F>(
        &mut self,
        selection: F,
        build: impl FnOnce(&mut MultiplexerBuilder<C, LM, DM>),
    ) -> &mut Self
    where
        S: Into<Status>,
        F: Fn(&mut C, &mut LM) -> S + Send + Sync + 'static,
    {
        let mut child = MultiplexerBuilder::new(Some(boxed(selection)));
        build(&mut child);
        self.absorb(child.finish())
    }

    /// Appends a previously built node (moved in; see
    /// [`BranchBuilder::add_node`]).
    pub fn add_node(&mut self, node: Node<C, LM, DM>) -> &mut Self {
        self.multiplexer.push(node);
        self
    }

    /// Appends a decorator to this multiplexer.
    pub fn decorate<S, F>(&mut self, callback: F) -> &mut Self
    where
        S: Into<Status>,
        F: Fn(&mut C, &mut DM) -> S + Send + Sync + 'static,
    {
        self.decorators.push(boxed(callback));
        self
    }

    /// Appends a batch of decorators, preserving the given order.
    pub fn decorate_all(&mut self, callbacks: Vec<DecoratorCallback<C, DM>>) -> &mut Self {
        self.decorators.extend(callbacks);
        self
    }

    fn absorb(&mut self, child: Result<Node<C, LM, DM>, BuildError>) -> &mut Self {
        match child {
            Ok(node) => self.multiplexer.push(node),
            Err(err) => self.errors.push(err),
        }
        self
    }

    fn finish(mut self) -> Result<Node<C, LM, DM>, BuildError> {
        if self.multiplexer.is_empty() {
            self.errors.push(BuildError::EmptyMultiplexer);
        }
        if let Some(err) = self.errors.first() {
            return Err(*err);
        }
        Ok(Node {
            decorators: self.decorators,
            kind: NodeKind::Multiplexer(self.multiplexer),
        })
    }
}

/// Builder for a leaf node. Only decoration is configurable.
pub struct LeafBuilder<C, LM = (), DM = ()> {
    node: Node<C, LM, DM>,
}

impl<C, LM: Default, DM: Default> LeafBuilder<C, LM, DM> {
    fn new(callback: LeafCallback<C, LM>) -> Self {
        Self {
            node: Node::new(NodeKind::Leaf(Leaf::new(callback))),
        }
    }

    /// Appends a decorator to this leaf.
    pub fn decorate<S, F>(&mut self, callback: F) -> &mut Self
    where
        S: Into<Status>,
        F: Fn(&mut C, &mut DM) -> S + Send + Sync + 'static,
    {
        self.node.decorators.push(boxed(callback));
        self
    }

    /// Appends a batch of decorators, preserving the given order.
    pub fn decorate_all(&mut self, callbacks: Vec<DecoratorCallback<C, DM>>) -> &mut Self {
        self.node.decorators.extend(callbacks);
        self
    }

    fn finish(self) -> Node<C, LM, DM> {
        self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sequence_is_a_build_error() {
        let result: Result<Node<()>, _> = build_sequence(|_| {});
        assert_eq!(result.err(), Some(BuildError::EmptySequence));
    }

    #[test]
    fn empty_selector_is_a_build_error() {
        let result: Result<Node<()>, _> = build_selector(|_| {});
        assert_eq!(result.err(), Some(BuildError::EmptySelector));
    }

    #[test]
    fn empty_multiplexer_is_a_build_error() {
        let result: Result<Node<()>, _> = build_multiplexer(|_| {});
        assert_eq!(result.err(), Some(BuildError::EmptyMultiplexer));
    }

    #[test]
    fn nested_emptiness_surfaces_from_the_outermost_build() {
        let result: Result<Node<()>, _> = build_sequence(|b| {
            b.add_leaf(|_: &mut (), _: &mut ()| Status::Success)
                .add_selector(|_| {});
        });
        assert_eq!(result.err(), Some(BuildError::EmptySelector));
    }

    #[test]
    fn nested_error_reported_ahead_of_the_emptiness_it_caused() {
        let result: Result<Node<()>, _> = build_sequence(|b| {
            b.add_selector(|_| {});
        });
        assert_eq!(result.err(), Some(BuildError::EmptySelector));
    }

    #[test]
    fn callbacks_may_return_raw_codes() {
        let mut node: Node<()> = build_leaf(|_: &mut (), _: &mut ()| 7);
        assert_eq!(node.evaluate(&mut ()), Status::Custom(7));
    }

    #[test]
    fn add_node_composes_a_prebuilt_subtree() {
        let shared: Node<Vec<u32>> = build_leaf(|ctx: &mut Vec<u32>, _: &mut ()| {
            ctx.push(9);
            Status::Success
        });

        let mut root = build_sequence(|b| {
            b.add_leaf(|ctx: &mut Vec<u32>, _: &mut ()| {
                ctx.push(0);
                Status::Success
            })
            .add_node(shared);
        })
        .unwrap();

        let mut ctx = Vec::new();
        assert_eq!(root.evaluate(&mut ctx), Status::Success);
        assert_eq!(ctx, vec![0, 9]);
    }

    #[test]
    fn leaf_builder_attaches_decorators() {
        let mut node: Node<Vec<u32>> = build_leaf_with(
            |ctx: &mut Vec<u32>, _: &mut ()| {
                ctx.push(0);
                Status::Success
            },
            |leaf| {
                leaf.decorate(|ctx: &mut Vec<u32>, _: &mut ()| {
                    ctx.push(1);
                    Status::Instant
                });
            },
        );

        let mut ctx = Vec::new();
        assert_eq!(node.evaluate(&mut ctx), Status::Success);
        assert_eq!(ctx, vec![1, 0]);
    }

    #[test]
    fn selection_can_be_set_inside_the_builder() {
        let mut node: Node<()> = build_multiplexer(|m| {
            m.set_selection(|_: &mut (), _: &mut ()| 1)
                .add_leaf(|_: &mut (), _: &mut ()| Status::Failure)
                .add_leaf(|_: &mut (), _: &mut ()| Status::Success);
        })
        .unwrap();
        assert_eq!(node.evaluate(&mut ()), Status::Success);
    }
}
