//! Status returned by tree nodes and callbacks.

/// The outcome of evaluating a node or running a callback.
///
/// # Semantics
///
/// Three built-in outcomes cover the usual control flow:
/// - [`Status::Instant`]: the node finished this tick without implying
///   success or failure beyond "done now".
/// - [`Status::Success`]: the node finished and succeeded.
/// - [`Status::Failure`]: the node finished and failed.
///
/// Callbacks may also return arbitrary integer codes outside the reserved
/// set. These surface as [`Status::Custom`] and pass through the engine
/// opaquely: branches treat them as non-failing, and a node that returns one
/// keeps its memory slot for the next tick (see [`Status::is_terminal`]).
///
/// # Wire codes
///
/// The reserved codes match the callback convention: `Instant` is `0`,
/// `Success` is `-1`, `Failure` is `-2`. Every other `i32` is a custom code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Completed this tick; no success/failure judgement.
    Instant,

    /// Completed successfully.
    Success,

    /// Completed with failure.
    ///
    /// This is the only status that vetoes a decorator chain, stops a
    /// sequence, or lets a selector move on to its next child.
    Failure,

    /// An application-defined code outside the reserved set.
    Custom(i32),
}

/// Reserved code for [`Status::Instant`].
pub const INSTANT: i32 = 0;
/// Reserved code for [`Status::Success`].
pub const SUCCESS: i32 = -1;
/// Reserved code for [`Status::Failure`].
pub const FAILURE: i32 = -2;

impl Status {
    /// Converts a raw callback code into a status.
    ///
    /// Reserved codes map to their built-in variant, so a `Custom` carrying
    /// a reserved code is never constructed.
    #[inline]
    pub fn from_code(code: i32) -> Self {
        match code {
            INSTANT => Status::Instant,
            SUCCESS => Status::Success,
            FAILURE => Status::Failure,
            other => Status::Custom(other),
        }
    }

    /// Returns the raw code for this status.
    #[inline]
    pub fn code(self) -> i32 {
        match self {
            Status::Instant => INSTANT,
            Status::Success => SUCCESS,
            Status::Failure => FAILURE,
            Status::Custom(code) => code,
        }
    }

    /// Returns `true` if this status is `Failure`.
    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }

    /// Returns `true` if this status is `Success`.
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    /// Returns `true` for the built-in outcomes (`Instant`, `Success`,
    /// `Failure`).
    ///
    /// A terminal status resets the memory slot of the callback that
    /// produced it; a custom code leaves the slot intact so state can carry
    /// across ticks.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::Custom(_))
    }
}

impl From<i32> for Status {
    #[inline]
    fn from(code: i32) -> Self {
        Status::from_code(code)
    }
}
