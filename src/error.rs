//! Error types for lanemath operations.
//!
//! Floating point edge cases (NaN, infinities, division by zero) are never
//! errors here: they propagate through the kernels as IEEE-754 values. The
//! variants below cover the few conditions a caller can actually act on.

use thiserror::Error;

/// Errors that can occur during lanemath operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaneError {
    /// The operation has no native implementation for the requested element kind.
    #[error("Operation not implemented: {operation} has no hardware accelerated path")]
    NotImplemented {
        /// Name of the operation that was requested.
        operation: &'static str,
    },
    /// The running hardware lacks an instruction set the operation requires
    /// and no software emulation exists for it.
    #[error("{message}")]
    PlatformNotSupported {
        /// Human-readable error message.
        message: String,
    },
    /// An explicitly checked memory access did not meet its alignment contract.
    #[error("Access violation at {address:#x}: {message}")]
    AccessViolation {
        /// The offending address.
        address: usize,
        /// Human-readable error message.
        message: String,
    },
    /// The process-wide dispatcher was configured twice with different options.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Human-readable error message.
        message: String,
    },
}

/// Result type alias for lanemath operations.
pub type Result<T> = std::result::Result<T, LaneError>;

/// Message used by every fused variant that cannot be emulated in software.
pub const FMA_NOT_SUPPORTED: &str =
    "Platform not supported for operation as it does not support FMA instructions";

/// Creates a not-implemented error.
pub fn not_implemented(operation: &'static str) -> LaneError {
    LaneError::NotImplemented { operation }
}

/// Creates a platform-not-supported error.
pub fn platform_not_supported(message: impl Into<String>) -> LaneError {
    LaneError::PlatformNotSupported {
        message: message.into(),
    }
}

/// Creates an access violation error for `ptr`.
pub fn access_violation<T>(ptr: *const T, message: impl Into<String>) -> LaneError {
    LaneError::AccessViolation {
        address: ptr as usize,
        message: message.into(),
    }
}

/// Creates a configuration error.
pub fn configuration_error(message: impl Into<String>) -> LaneError {
    LaneError::Configuration {
        message: message.into(),
    }
}
