//! Synchronous behavior tree library with fluent builders and per-node memory.
//!
//! Trees are built once through callback-driven builders and then ticked
//! against a caller-owned context. Every tick is a single deterministic
//! depth-first traversal that runs to completion; there is no scheduler and
//! no suspended state between ticks.
//!
//! - **Closed node model**: leaf, branch (sequence/selector), multiplexer —
//!   no open trait hierarchy to implement
//! - **Decorators**: per-node guard callbacks that can veto a node before
//!   its own logic runs
//! - **Repetition controls**: per-branch loop and attempt counters
//! - **Per-node memory**: generic leaf/decorator memory slots allocated at
//!   build time
//!
//! # Architecture
//!
//! - [`Status`]: evaluation outcome (`Instant`, `Success`, `Failure`, or a
//!   custom integer code)
//! - [`Node`]: the opaque, exclusively owned tree node
//! - [`Tree`]: the root handle driving [`Tree::tick`]
//! - [`BranchBuilder`] / [`MultiplexerBuilder`] / [`LeafBuilder`]: the
//!   fluent construction API, entered via [`Tree`]'s constructors or the
//!   free `build_*` functions
//! - [`BuildError`]: construction-time invariant violations
//!
//! # Example
//!
//! ```rust
//! use behavior_tree::{Status, Tree};
//!
//! struct Patrol {
//!     at_waypoint: bool,
//!     moved: u32,
//! }
//!
//! let mut tree: Tree<Patrol> = Tree::selector(|b| {
//!     b.add_sequence(|b| {
//!         b.add_leaf(|ctx: &mut Patrol, _: &mut ()| {
//!             if ctx.at_waypoint {
//!                 Status::Success
//!             } else {
//!                 Status::Failure
//!             }
//!         })
//!         .add_leaf(|ctx: &mut Patrol, _: &mut ()| {
//!             ctx.at_waypoint = false;
//!             Status::Success
//!         });
//!     })
//!     .add_leaf(|ctx: &mut Patrol, _: &mut ()| {
//!         ctx.moved += 1;
//!         Status::Success
//!     });
//! })
//! .expect("patrol tree is well formed");
//!
//! let mut ctx = Patrol { at_waypoint: false, moved: 0 };
//! assert_eq!(tree.tick(&mut ctx), Status::Success);
//! assert_eq!(ctx.moved, 1);
//! ```

pub mod builder;
pub mod composite;
pub mod decorator;
pub mod error;
pub mod node;
pub mod status;
pub mod tree;

// Re-export core types for ergonomic API
pub use builder::{
    BranchBuilder, LeafBuilder, MultiplexerBuilder, build_leaf, build_leaf_with, build_multiplexer,
    build_multiplexer_with, build_selector, build_sequence,
};
pub use decorator::DecoratorCallback;
pub use error::BuildError;
pub use node::{LeafCallback, Node};
pub use status::Status;
pub use tree::Tree;
