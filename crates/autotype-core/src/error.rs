//! Error taxonomy for auto-type operations.

use thiserror::Error;

use crate::modifier::Modifier;

/// Error type shared by every auto-type operation.
///
/// Emission failures abort the remaining steps of the enclosing composite
/// operation, but the engine always attempts to release any modifiers it
/// pressed before surfacing the error. Nothing is retried internally.
#[derive(Debug, Error)]
pub enum AutoTypeError {
    /// The caller supplied nothing usable: an empty text sequence, or a
    /// key press with neither a character nor a key code.
    #[error("bad argument: {0}")]
    BadArg(&'static str),

    /// After releasing every modifier the engine had pressed, the OS still
    /// reports one held. This distinguishes an engine bug or race from the
    /// user physically holding a key; the latter is unrecoverable and is
    /// reported rather than retried.
    #[error("modifier still pressed after release: {0:?}")]
    ModifierNotReleased(Modifier),

    /// The requested emission or query has no implementation on this
    /// platform.
    #[error("not supported: {0}")]
    NotSupported(&'static str),

    /// An OS call failed.
    #[error("platform error: {0}")]
    Platform(String),
}

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, AutoTypeError>;
