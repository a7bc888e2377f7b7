//! Error taxonomy shared across the crate.
//!
//! Every fallible core operation returns [`Error`]; none of them panic or
//! abort. Exhaustion and invalid-argument failures are recoverable — the
//! caller decides whether a failed widget creation is fatal.

use thiserror::Error;

/// Errors produced by the toolkit core.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The node arena is at capacity; no further nodes can be created until
    /// one is destroyed.
    #[error("node arena is full")]
    ArenaFull,

    /// The referenced node no longer exists (destroyed, or the id was never
    /// valid). Detected via the arena's generation check.
    #[error("node no longer exists")]
    NodeGone,

    /// The given parent id is stale or absent. Non-window nodes must be
    /// created under a live parent.
    #[error("invalid parent node")]
    InvalidParent,

    /// The node is live but carries a different payload kind than the
    /// operation expects (e.g. setting label text on a button).
    #[error("node payload is of a different kind")]
    WrongKind,

    /// A timer was requested with a period of zero milliseconds.
    #[error("timer period must be non-zero")]
    ZeroPeriod,

    /// The timer table has no free slots.
    #[error("timer table is full")]
    TimerTableFull,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
