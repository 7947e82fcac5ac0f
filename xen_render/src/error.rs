//! Error types for the Xen render core
//!
//! Every error in this crate is a programming error surfaced at the API
//! boundary: mutating a camera that is in use, unbalanced stacks,
//! degenerate camera bases, non-finite projections. Nothing is retried.

use std::fmt;

/// Result type for Xen render operations
pub type Result<T> = std::result::Result<T, Error>;

/// Xen render errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A camera or projection was mutated while an active pass is using it
    InUse(String),

    /// Pop on an empty camera or culler stack
    StackUnderflow(String),

    /// Push beyond the fixed capacity of a culler stack
    StackOverflow(String),

    /// Stack height at the end of a pass differs from the height at its start
    UnbalancedStack(String),

    /// LookAt with coincident target/position (or up parallel to the view direction)
    DegenerateLookAt(String),

    /// Projection matrix contains infinite or NaN terms
    NonFiniteProjection(String),

    /// Argument rejected by a precondition
    InvalidArgument(String),

    /// A shared camera's lock was poisoned by a panicking holder
    LockPoisoned(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InUse(msg) => write!(f, "Object in use: {}", msg),
            Error::StackUnderflow(msg) => write!(f, "Stack underflow: {}", msg),
            Error::StackOverflow(msg) => write!(f, "Stack overflow: {}", msg),
            Error::UnbalancedStack(msg) => write!(f, "Unbalanced stack: {}", msg),
            Error::DegenerateLookAt(msg) => write!(f, "Degenerate look-at: {}", msg),
            Error::NonFiniteProjection(msg) => write!(f, "Non-finite projection: {}", msg),
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::LockPoisoned(msg) => write!(f, "Lock poisoned: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
