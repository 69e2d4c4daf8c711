//! Dispatch error types.

use thiserror::Error;

use crate::conapi::ApiError;

/// Why a dispatched command was refused or abandoned.
///
/// A failed command has no user-visible effect; the caller is expected to
/// drop it silently, the way real terminals swallow sequences they cannot
/// honor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// A parameter was outside the range the command accepts. Detected
    /// before any capability call, so nothing was mutated.
    #[error("parameter out of range")]
    InvalidParameter,
    /// Coordinate math left the signed 16-bit range. Also detected before
    /// any mutation.
    #[error("coordinate arithmetic overflowed")]
    Overflow,
    /// The console declined a get/set call mid-operation. Multi-step
    /// commands may have partially run.
    #[error(transparent)]
    Api(#[from] ApiError),
}

pub type DispatchResult = Result<(), DispatchError>;
