//! Staff-facing alert contract.

use std::sync::Arc;

use async_trait::async_trait;

/// Sink for moderation alerts raised by interactive flows.
///
/// The form engine reports the requester and the offending raw input;
/// rendering (including any suggested moderation command) belongs to the
/// implementation, which knows its staff channel and command syntax.
/// Delivery is best-effort by contract: implementations log their own
/// failures and never fail the session.
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Reports a submission that failed validation badly enough to warrant
    /// staff attention. `raw_input` is the unmodified user input.
    async fn invalid_submission(&self, requester_tag: &str, raw_input: &str);
}

/// A boxed alert sink trait object.
pub type BoxedAlertSink = Arc<dyn AlertSink>;

/// An alert sink that discards everything, for flows without moderation.
pub struct NullAlertSink;

#[async_trait]
impl AlertSink for NullAlertSink {
    async fn invalid_submission(&self, _requester_tag: &str, _raw_input: &str) {}
}
