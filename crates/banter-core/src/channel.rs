//! The [`Channel`] contract and the bounded-wait outcome type.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::PlatformResult;
use crate::message::BoxedMessage;
use crate::types::{ChannelId, IncomingMessage, MessageFilter};

// =============================================================================
// WaitOutcome
// =============================================================================

/// The outcome of a bounded wait for one qualifying event.
///
/// Keeps "nobody responded in time" distinct from a platform failure.
/// Platform waits return `PlatformResult<WaitOutcome<T>>`: a qualifying
/// event and a timeout are both values, anything on the `Err` side is a
/// genuine failure. Callers never have to infer a timeout from an error
/// shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitOutcome<T> {
    /// One qualifying event arrived within the bound.
    Event(T),
    /// The bound elapsed without a qualifying event.
    TimedOut,
}

impl<T> WaitOutcome<T> {
    /// Returns `true` if the wait timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::TimedOut)
    }

    /// Converts the outcome into an `Option`, discarding the timeout case.
    pub fn into_event(self) -> Option<T> {
        match self {
            Self::Event(event) => Some(event),
            Self::TimedOut => None,
        }
    }
}

// =============================================================================
// Channel Trait
// =============================================================================

/// A channel messages can be sent to and awaited from.
///
/// This is the read/write surface the interactive components use: an intake
/// form sends prompts and awaits replies on the requester's direct channel;
/// a result selector sends its notices to whichever channel hosted the
/// results. Implementations wrap a platform connection; see
/// [`testing::FakeChannel`](crate::testing::FakeChannel) for the
/// deterministic in-memory version used in tests.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Returns the channel's platform identifier.
    fn id(&self) -> &ChannelId;

    /// Sends a message to the channel, returning a handle to it.
    async fn send(&self, content: &str) -> PlatformResult<BoxedMessage>;

    /// Waits up to `timeout` for one message matching `filter`.
    ///
    /// Non-qualifying messages do not resolve the wait. The timeout is
    /// reported as [`WaitOutcome::TimedOut`], never as an error.
    async fn next_message(
        &self,
        filter: &MessageFilter,
        timeout: Duration,
    ) -> PlatformResult<WaitOutcome<IncomingMessage>>;
}

/// A boxed channel trait object.
pub type BoxedChannel = Arc<dyn Channel>;
