//! Composite nodes: branches (sequence/selector) and multiplexers.
//!
//! Branches control the flow across an ordered child list, with optional
//! loop and attempt repetition. Multiplexers pick exactly one child per
//! evaluation through a selection callback.

use crate::Status;
use crate::node::{LeafCallback, Node};

/// Evaluation policy of a [`Branch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BranchPolicy {
    /// Run children in order until one fails (logical AND).
    Sequence,
    /// Run children in order until one does not fail (logical OR).
    Selector,
}

/// An ordered-children node with repetition controls.
///
/// # Semantics
///
/// A single **pass** runs the children once under the branch policy:
///
/// - `Sequence` stops with `Failure` at the first failing child and
///   otherwise returns the last child's status, preserving `Instant` and
///   custom codes.
/// - `Selector` returns the first non-failing child's status and `Failure`
///   only when every child failed. Children past the short-circuit point
///   are not evaluated.
///
/// `loops` repeats the pass while it keeps completing without failure;
/// `attempts` retries the whole looped pass after a failure. Attempts wrap
/// loops: one failed looped pass consumes one attempt. Both counters treat
/// `0` and `1` as "once", and both run to completion within a single tick.
pub(crate) struct Branch<C, LM, DM> {
    policy: BranchPolicy,
    children: Vec<Node<C, LM, DM>>,
    loops: u32,
    attempts: u32,
}

impl<C, LM: Default, DM: Default> Branch<C, LM, DM> {
    pub(crate) fn new(policy: BranchPolicy) -> Self {
        Self {
            policy,
            children: Vec::new(),
            loops: 1,
            attempts: 1,
        }
    }

    pub(crate) fn policy(&self) -> BranchPolicy {
        self.policy
    }

    pub(crate) fn push(&mut self, child: Node<C, LM, DM>) {
        self.children.push(child);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn set_loops(&mut self, loops: u32) {
        self.loops = loops;
    }

    pub(crate) fn set_attempts(&mut self, attempts: u32) {
        self.attempts = attempts;
    }

    pub(crate) fn evaluate(&mut self, ctx: &mut C) -> Status {
        let attempts = self.attempts.max(1);
        let mut result = Status::Failure;
        for _ in 0..attempts {
            result = self.looped_pass(ctx);
            if !result.is_failure() {
                break;
            }
        }
        result
    }

    fn looped_pass(&mut self, ctx: &mut C) -> Status {
        let loops = self.loops.max(1);
        let mut result = Status::Instant;
        for _ in 0..loops {
            result = self.pass(ctx);
            if result.is_failure() {
                break;
            }
        }
        result
    }

    fn pass(&mut self, ctx: &mut C) -> Status {
        match self.policy {
            BranchPolicy::Sequence => {
                // Empty branches are rejected at build time, so `last` is
                // always overwritten.
                let mut last = Status::Instant;
                for child in &mut self.children {
                    last = child.evaluate(ctx);
                    if last.is_failure() {
                        return Status::Failure;
                    }
                }
                last
            }
            BranchPolicy::Selector => {
                for child in &mut self.children {
                    let status = child.evaluate(ctx);
                    if !status.is_failure() {
                        return status;
                    }
                }
                Status::Failure
            }
        }
    }
}

/// A node that evaluates exactly one child per tick.
///
/// The selection callback runs each evaluation with its own memory slot
/// (same lifecycle as a leaf slot). Its returned code is the child index:
/// a code in `0..children.len()` selects that child, whose status is
/// returned unmodified. Any other code, or a missing callback, is a
/// selection miss and the multiplexer reports `Failure` without touching
/// any child.
pub(crate) struct Multiplexer<C, LM, DM> {
    selection: Option<Selection<C, LM>>,
    children: Vec<Node<C, LM, DM>>,
}

struct Selection<C, LM> {
    callback: LeafCallback<C, LM>,
    memory: LM,
}

impl<C, LM: Default, DM: Default> Multiplexer<C, LM, DM> {
    pub(crate) fn new(selection: Option<LeafCallback<C, LM>>) -> Self {
        Self {
            selection: selection.map(|callback| Selection {
                callback,
                memory: LM::default(),
            }),
            children: Vec::new(),
        }
    }

    pub(crate) fn set_selection(&mut self, callback: LeafCallback<C, LM>) {
        self.selection = Some(Selection {
            callback,
            memory: LM::default(),
        });
    }

    pub(crate) fn push(&mut self, child: Node<C, LM, DM>) {
        self.children.push(child);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn evaluate(&mut self, ctx: &mut C) -> Status {
        let Some(selection) = &mut self.selection else {
            tracing::trace!("multiplexer has no selection callback");
            return Status::Failure;
        };

        let status = (selection.callback)(ctx, &mut selection.memory);
        if status.is_terminal() {
            selection.memory = LM::default();
        }

        let code = status.code();
        let index = usize::try_from(code)
            .ok()
            .filter(|index| *index < self.children.len());
        match index {
            Some(index) => self.children[index].evaluate(ctx),
            None => {
                tracing::trace!(code, "multiplexer selection miss");
                Status::Failure
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Leaf, NodeKind};

    struct Trace {
        calls: Vec<u32>,
    }

    fn leaf(id: u32, status: Status) -> Node<Trace> {
        Node::new(NodeKind::Leaf(Leaf::new(Box::new(
            move |ctx: &mut Trace, _: &mut ()| {
                ctx.calls.push(id);
                status
            },
        ))))
    }

    fn branch(policy: BranchPolicy, children: Vec<Node<Trace>>) -> Branch<Trace, (), ()> {
        let mut branch = Branch::new(policy);
        for child in children {
            branch.push(child);
        }
        branch
    }

    #[test]
    fn sequence_returns_last_status_when_all_pass() {
        let mut seq = branch(
            BranchPolicy::Sequence,
            vec![leaf(0, Status::Success), leaf(1, Status::Instant)],
        );
        let mut ctx = Trace { calls: Vec::new() };
        assert_eq!(seq.evaluate(&mut ctx), Status::Instant);
        assert_eq!(ctx.calls, vec![0, 1]);
    }

    #[test]
    fn sequence_stops_at_first_failure() {
        let mut seq = branch(
            BranchPolicy::Sequence,
            vec![
                leaf(0, Status::Success),
                leaf(1, Status::Failure),
                leaf(2, Status::Success),
            ],
        );
        let mut ctx = Trace { calls: Vec::new() };
        assert_eq!(seq.evaluate(&mut ctx), Status::Failure);
        assert_eq!(ctx.calls, vec![0, 1]);
    }

    #[test]
    fn sequence_continues_through_custom_codes() {
        let mut seq = branch(
            BranchPolicy::Sequence,
            vec![leaf(0, Status::Custom(5)), leaf(1, Status::Custom(9))],
        );
        let mut ctx = Trace { calls: Vec::new() };
        assert_eq!(seq.evaluate(&mut ctx), Status::Custom(9));
        assert_eq!(ctx.calls, vec![0, 1]);
    }

    #[test]
    fn selector_short_circuits_on_first_non_failure() {
        let mut sel = branch(
            BranchPolicy::Selector,
            vec![
                leaf(0, Status::Failure),
                leaf(1, Status::Instant),
                leaf(2, Status::Success),
            ],
        );
        let mut ctx = Trace { calls: Vec::new() };
        assert_eq!(sel.evaluate(&mut ctx), Status::Instant);
        assert_eq!(ctx.calls, vec![0, 1]);
    }

    #[test]
    fn selector_fails_when_all_children_fail() {
        let mut sel = branch(
            BranchPolicy::Selector,
            vec![leaf(0, Status::Failure), leaf(1, Status::Failure)],
        );
        let mut ctx = Trace { calls: Vec::new() };
        assert_eq!(sel.evaluate(&mut ctx), Status::Failure);
        assert_eq!(ctx.calls, vec![0, 1]);
    }

    #[test]
    fn loops_rerun_successful_passes() {
        let mut seq = branch(BranchPolicy::Sequence, vec![leaf(0, Status::Success)]);
        seq.set_loops(2);
        let mut ctx = Trace { calls: Vec::new() };
        assert_eq!(seq.evaluate(&mut ctx), Status::Success);
        assert_eq!(ctx.calls, vec![0, 0]);
    }

    #[test]
    fn loops_stop_early_on_failure() {
        let mut seq = branch(BranchPolicy::Sequence, vec![leaf(0, Status::Failure)]);
        seq.set_loops(10);
        let mut ctx = Trace { calls: Vec::new() };
        assert_eq!(seq.evaluate(&mut ctx), Status::Failure);
        assert_eq!(ctx.calls, vec![0]);
    }

    #[test]
    fn attempts_retry_failing_passes() {
        let mut seq = branch(BranchPolicy::Sequence, vec![leaf(0, Status::Failure)]);
        seq.set_attempts(3);
        let mut ctx = Trace { calls: Vec::new() };
        assert_eq!(seq.evaluate(&mut ctx), Status::Failure);
        assert_eq!(ctx.calls, vec![0, 0, 0]);
    }

    #[test]
    fn success_short_circuits_remaining_attempts() {
        let mut seq = branch(BranchPolicy::Sequence, vec![leaf(0, Status::Success)]);
        seq.set_attempts(3);
        let mut ctx = Trace { calls: Vec::new() };
        assert_eq!(seq.evaluate(&mut ctx), Status::Success);
        assert_eq!(ctx.calls, vec![0]);
    }

    #[test]
    fn attempts_wrap_loops() {
        // Each attempt is a full looped pass: 2 loops x 2 attempts on a
        // child that always fails would be 2 passes, but a failing pass
        // stops its loop, so we see one child run per attempt.
        let mut seq = branch(BranchPolicy::Sequence, vec![leaf(0, Status::Failure)]);
        seq.set_loops(2);
        seq.set_attempts(2);
        let mut ctx = Trace { calls: Vec::new() };
        assert_eq!(seq.evaluate(&mut ctx), Status::Failure);
        assert_eq!(ctx.calls, vec![0, 0]);
    }

    #[test]
    fn zero_counters_mean_run_once() {
        let mut seq = branch(BranchPolicy::Sequence, vec![leaf(0, Status::Success)]);
        seq.set_loops(0);
        seq.set_attempts(0);
        let mut ctx = Trace { calls: Vec::new() };
        assert_eq!(seq.evaluate(&mut ctx), Status::Success);
        assert_eq!(ctx.calls, vec![0]);
    }

    fn mux(
        selection: Option<LeafCallback<Trace, ()>>,
        children: Vec<Node<Trace>>,
    ) -> Multiplexer<Trace, (), ()> {
        let mut mux = Multiplexer::new(selection);
        for child in children {
            mux.push(child);
        }
        mux
    }

    #[test]
    fn multiplexer_evaluates_only_the_selected_child() {
        let mut mux = mux(
            Some(Box::new(|_: &mut Trace, _: &mut ()| Status::from(1))),
            vec![leaf(0, Status::Success), leaf(1, Status::Custom(7))],
        );
        let mut ctx = Trace { calls: Vec::new() };
        assert_eq!(mux.evaluate(&mut ctx), Status::Custom(7));
        assert_eq!(ctx.calls, vec![1]);
    }

    #[test]
    fn multiplexer_instant_selects_child_zero() {
        let mut mux = mux(
            Some(Box::new(|_: &mut Trace, _: &mut ()| Status::Instant)),
            vec![leaf(0, Status::Success), leaf(1, Status::Success)],
        );
        let mut ctx = Trace { calls: Vec::new() };
        assert_eq!(mux.evaluate(&mut ctx), Status::Success);
        assert_eq!(ctx.calls, vec![0]);
    }

    #[test]
    fn multiplexer_out_of_range_selection_fails_without_children() {
        let mut mux = mux(
            Some(Box::new(|_: &mut Trace, _: &mut ()| Status::from(5))),
            vec![leaf(0, Status::Success), leaf(1, Status::Success)],
        );
        let mut ctx = Trace { calls: Vec::new() };
        assert_eq!(mux.evaluate(&mut ctx), Status::Failure);
        assert!(ctx.calls.is_empty());
    }

    #[test]
    fn multiplexer_negative_selection_fails() {
        let mut mux = mux(
            Some(Box::new(|_: &mut Trace, _: &mut ()| Status::Failure)),
            vec![leaf(0, Status::Success)],
        );
        let mut ctx = Trace { calls: Vec::new() };
        assert_eq!(mux.evaluate(&mut ctx), Status::Failure);
        assert!(ctx.calls.is_empty());
    }

    #[test]
    fn multiplexer_without_selection_fails() {
        let mut mux = mux(None, vec![leaf(0, Status::Success)]);
        let mut ctx = Trace { calls: Vec::new() };
        assert_eq!(mux.evaluate(&mut ctx), Status::Failure);
        assert!(ctx.calls.is_empty());
    }
}
