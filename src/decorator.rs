//! Decorator chains: per-node guard callbacks.
//!
//! Every node carries an ordered, append-only list of decorators. They run
//! before the node's own logic, in attachment order, and the first one that
//! returns [`Status::Failure`] vetoes the node for this tick. Any other
//! status — including custom codes — means "no objection, continue".

use crate::Status;

/// A guard callback attached to a node.
///
/// Receives the shared context and the decorator's own memory slot, and
/// returns a [`Status`] (or any `i32` via `Status::from`).
pub type DecoratorCallback<C, M> = Box<dyn Fn(&mut C, &mut M) -> Status + Send + Sync>;

/// One attached decorator together with its private memory slot.
pub(crate) struct Decorator<C, DM> {
    callback: DecoratorCallback<C, DM>,
    memory: DM,
}

impl<C, DM: Default> Decorator<C, DM> {
    fn new(callback: DecoratorCallback<C, DM>) -> Self {
        Self {
            callback,
            memory: DM::default(),
        }
    }

    /// Runs the callback against its memory slot.
    ///
    /// A terminal status resets the slot; a custom code keeps it for the
    /// next tick.
    fn run(&mut self, ctx: &mut C) -> Status {
        let status = (self.callback)(ctx, &mut self.memory);
        if status.is_terminal() {
            self.memory = DM::default();
        }
        status
    }
}

/// Ordered decorator list owned by a node.
///
/// Append-only: there is no removal operation, and the list is fixed once
/// evaluation begins for a tick.
pub(crate) struct DecoratorChain<C, DM> {
    decorators: Vec<Decorator<C, DM>>,
}

impl<C, DM: Default> DecoratorChain<C, DM> {
    pub(crate) fn new() -> Self {
        Self {
            decorators: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, callback: DecoratorCallback<C, DM>) {
        self.decorators.push(Decorator::new(callback));
    }

    /// Appends a batch of callbacks, preserving the given order.
    pub(crate) fn extend(&mut self, callbacks: Vec<DecoratorCallback<C, DM>>) {
        for callback in callbacks {
            self.push(callback);
        }
    }

    /// Runs the chain in attachment order.
    ///
    /// Returns `Failure` as soon as one decorator vetoes; decorators after
    /// the veto point are not invoked. Returns `Instant` when the whole
    /// chain passes (or is empty).
    pub(crate) fn evaluate(&mut self, ctx: &mut C) -> Status {
        for decorator in &mut self.decorators {
            if decorator.run(ctx).is_failure() {
                return Status::Failure;
            }
        }
        Status::Instant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Trace {
        calls: Vec<u32>,
    }

    fn recording(id: u32, status: Status) -> DecoratorCallback<Trace, ()> {
        Box::new(move |ctx: &mut Trace, _: &mut ()| {
            ctx.calls.push(id);
            status
        })
    }

    #[test]
    fn runs_in_attachment_order() {
        let mut chain = DecoratorChain::new();
        chain.push(recording(1, Status::Instant));
        chain.push(recording(2, Status::Success));
        chain.push(recording(3, Status::Custom(9)));

        let mut ctx = Trace { calls: Vec::new() };
        assert_eq!(chain.evaluate(&mut ctx), Status::Instant);
        assert_eq!(ctx.calls, vec![1, 2, 3]);
    }

    #[test]
    fn failure_vetoes_and_skips_rest() {
        let mut chain = DecoratorChain::new();
        chain.push(recording(1, Status::Failure));
        chain.push(recording(2, Status::Success));

        let mut ctx = Trace { calls: Vec::new() };
        assert_eq!(chain.evaluate(&mut ctx), Status::Failure);
        assert_eq!(ctx.calls, vec![1]);
    }

    #[test]
    fn batch_extend_preserves_order() {
        let mut chain = DecoratorChain::new();
        chain.extend(vec![
            recording(1, Status::Instant),
            recording(2, Status::Instant),
        ]);
        chain.push(recording(3, Status::Instant));

        let mut ctx = Trace { calls: Vec::new() };
        chain.evaluate(&mut ctx);
        assert_eq!(ctx.calls, vec![1, 2, 3]);
    }

    #[test]
    fn memory_resets_on_terminal_and_persists_on_custom() {
        let mut terminal: DecoratorChain<Vec<i32>, i32> = DecoratorChain::new();
        terminal.push(Box::new(|ctx: &mut Vec<i32>, m: &mut i32| {
            ctx.push(*m);
            *m += 1;
            Status::Success
        }));

        let mut seen = Vec::new();
        terminal.evaluate(&mut seen);
        terminal.evaluate(&mut seen);
        assert_eq!(seen, vec![0, 0]);

        let mut sticky: DecoratorChain<Vec<i32>, i32> = DecoratorChain::new();
        sticky.push(Box::new(|ctx: &mut Vec<i32>, m: &mut i32| {
            ctx.push(*m);
            *m += 1;
            Status::Custom(1)
        }));

        let mut seen = Vec::new();
        sticky.evaluate(&mut seen);
        sticky.evaluate(&mut seen);
        assert_eq!(seen, vec![0, 1]);
    }
}
