use thiserror::Error;

use crate::ast::{ExpressionKind, Slot};

/// Faults raised by `walk`.
///
/// These indicate a bug in a visitor, not bad input. The walk is aborted and the error returned.
/// Data-dependent findings belong to the visitors themselves.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum WalkError {
    /// A back-reference write tried to put a node into a slot that cannot hold its kind.
    /// The slot is left unchanged.
    #[error("invalid replacement: {slot} cannot hold a {found} node")]
    InvalidReplacement { slot: Slot, found: ExpressionKind },
}
