//! The bounded response waiter.
//!
//! Every suspension in this crate goes through one of the two functions
//! here: [`await_reply`] for the message shape, [`await_reaction`] for the
//! reaction shape. Both share the same contract: wait up to the bound for
//! one qualifying event; on timeout, tell the user they timed out
//! (best-effort) and report the timeout as a value. Platform failures stay
//! on the `Err` side and are never conflated with silence.

use std::time::Duration;

use tracing::debug;

use banter_core::{
    Channel, Message, MessageFilter, PlatformResult, Reaction, ReactionFilter, WaitOutcome,
};

/// The literal token a user sends to abort an interactive flow.
///
/// Matched case-insensitively against the trimmed reply.
pub const CANCEL_TOKEN: &str = "cancel";

/// Notice sent to the user when a wait elapses without a response.
pub const TIMED_OUT_NOTICE: &str = "You have timed out. Please try again.";

/// A reply collected from a bounded message wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// The user answered; content is trimmed.
    Content(String),
    /// The user sent the cancel token.
    Cancelled,
    /// The wait elapsed; the user has been notified.
    NoResponse,
}

/// Waits up to `timeout` for one qualifying message on `channel`.
///
/// The reply content is trimmed; the literal case-insensitive
/// [`CANCEL_TOKEN`] becomes [`Reply::Cancelled`]. On timeout the user is
/// notified on the same channel and [`Reply::NoResponse`] is returned; a
/// timeout is never an error.
pub async fn await_reply(
    channel: &dyn Channel,
    filter: &MessageFilter,
    timeout: Duration,
) -> PlatformResult<Reply> {
    match channel.next_message(filter, timeout).await? {
        WaitOutcome::Event(message) => {
            let content = message.content.trim().to_owned();
            if content.eq_ignore_ascii_case(CANCEL_TOKEN) {
                Ok(Reply::Cancelled)
            } else {
                Ok(Reply::Content(content))
            }
        }
        WaitOutcome::TimedOut => {
            notify_timed_out(channel).await;
            Ok(Reply::NoResponse)
        }
    }
}

/// Waits up to `timeout` for one qualifying reaction on `message`.
///
/// On timeout the user is notified on `notice_channel` and
/// [`WaitOutcome::TimedOut`] is returned; a timeout is never an error.
pub async fn await_reaction(
    message: &dyn Message,
    notice_channel: &dyn Channel,
    filter: &ReactionFilter,
    timeout: Duration,
) -> PlatformResult<WaitOutcome<Reaction>> {
    let outcome = message.next_reaction(filter, timeout).await?;
    if outcome.is_timeout() {
        notify_timed_out(notice_channel).await;
    }
    Ok(outcome)
}

/// Best-effort timeout notice; a vanished channel is not worth failing over.
async fn notify_timed_out(channel: &dyn Channel) {
    if let Err(error) = channel.send(TIMED_OUT_NOTICE).await {
        debug!(%error, "Could not deliver the timeout notice");
    }
}
