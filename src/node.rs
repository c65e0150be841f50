//! The node model: a closed set of tree node variants.
//!
//! Every node in a tree is a [`Node`], a tagged variant over the three node
//! kinds (leaf, branch, multiplexer) plus the decorator chain all of them
//! share. The tree is generic over three caller-owned types:
//!
//! - `C`: the context threaded mutably through every callback in a tick
//! - `LM`: the memory type for leaf and selection callbacks
//! - `DM`: the memory type for decorator callbacks
//!
//! Memory slots are allocated once when the node is built and are never
//! reallocated; evaluation only mutates their contents.

use crate::Status;
use crate::composite::{Branch, Multiplexer};
use crate::decorator::DecoratorChain;

/// A leaf or selection callback.
///
/// Receives the shared context and the node's own memory slot, and returns
/// a [`Status`] (or any `i32` via `Status::from`).
pub type LeafCallback<C, M> = Box<dyn Fn(&mut C, &mut M) -> Status + Send + Sync>;

/// A node of a behavior tree.
///
/// `Node` is the opaque handle every builder produces and every parent
/// owns. Ownership is exclusive: attaching a node to a parent moves it, so
/// a subtree can never appear under two parents and the tree topology can
/// never contain a cycle.
pub struct Node<C, LM = (), DM = ()> {
    pub(crate) decorators: DecoratorChain<C, DM>,
    pub(crate) kind: NodeKind<C, LM, DM>,
}

/// The closed set of node variants.
pub(crate) enum NodeKind<C, LM, DM> {
    Leaf(Leaf<C, LM>),
    Branch(Branch<C, LM, DM>),
    Multiplexer(Multiplexer<C, LM, DM>),
}

/// A terminal node wrapping a single callback and its memory slot.
pub(crate) struct Leaf<C, LM> {
    callback: LeafCallback<C, LM>,
    memory: LM,
}

impl<C, LM: Default> Leaf<C, LM> {
    pub(crate) fn new(callback: LeafCallback<C, LM>) -> Self {
        Self {
            callback,
            memory: LM::default(),
        }
    }

    fn evaluate(&mut self, ctx: &mut C) -> Status {
        let status = (self.callback)(ctx, &mut self.memory);
        if status.is_terminal() {
            self.memory = LM::default();
        }
        status
    }
}

impl<C, LM: Default, DM: Default> Node<C, LM, DM> {
    pub(crate) fn new(kind: NodeKind<C, LM, DM>) -> Self {
        Self {
            decorators: DecoratorChain::new(),
            kind,
        }
    }

    /// Evaluates this node against the context.
    ///
    /// # Semantics
    ///
    /// The decorator chain runs first; a veto skips the node body entirely
    /// and the node reports `Failure`. Otherwise the variant's own logic
    /// runs: the leaf callback, the branch controller, or the multiplexer
    /// selection.
    pub fn evaluate(&mut self, ctx: &mut C) -> Status {
        if self.decorators.evaluate(ctx).is_failure() {
            return Status::Failure;
        }
        match &mut self.kind {
            NodeKind::Leaf(leaf) => leaf.evaluate(ctx),
            NodeKind::Branch(branch) => branch.evaluate(ctx),
            NodeKind::Multiplexer(mux) => mux.evaluate(ctx),
        }
    }
}
