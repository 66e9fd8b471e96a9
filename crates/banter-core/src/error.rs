//! Unified error types for the Banter core contracts.
//!
//! One enum per concern, mirroring how the platform behaves: a message send
//! can fail because the target vanished mid-flight, a cache can be
//! unreachable. Timeouts are *not* errors anywhere in this workspace; they
//! are an expected outcome and travel as [`WaitOutcome::TimedOut`](crate::channel::WaitOutcome).

use thiserror::Error;

// =============================================================================
// Platform Errors
// =============================================================================

/// Errors that can occur when talking to the chat platform.
#[derive(Debug, Clone, Error)]
pub enum PlatformError {
    /// Sending a message failed.
    #[error("failed to send message: {reason}")]
    SendFailed {
        /// Reason for failure.
        reason: String,
    },

    /// The target of an operation (message, channel) no longer exists.
    #[error("{target} no longer exists")]
    TargetVanished {
        /// What vanished.
        target: &'static str,
    },

    /// A direct channel to the user could not be opened.
    #[error("direct channel unavailable: {reason}")]
    DirectUnavailable {
        /// Reason for failure.
        reason: String,
    },

    /// Other platform error.
    #[error("platform error: {0}")]
    Other(String),
}

// =============================================================================
// Cache Errors
// =============================================================================

/// Errors that can occur in TTL cache operations.
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    /// The cache backend could not be reached.
    #[error("cache unavailable: {reason}")]
    Unavailable {
        /// Reason for failure.
        reason: String,
    },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for platform operations.
pub type PlatformResult<T> = Result<T, PlatformError>;

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;
