//! The [`Message`] contract: reactions, edits, deferred deletion.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::channel::WaitOutcome;
use crate::error::PlatformResult;
use crate::types::{ChannelId, Emoji, MessageId, Reaction, ReactionFilter, UserId};

/// A message the bot has sent, as a handle for follow-up operations.
///
/// The reaction surface distinguishes the two halves of the selector's
/// early-vs-live race:
///
/// - [`reaction_by`](Message::reaction_by) inspects the *current* reaction
///   state (a reaction that existed before the bot started watching), and
/// - [`next_reaction`](Message::next_reaction) waits for a *forthcoming*
///   reaction event.
///
/// Both report through the same [`Reaction`] type so either source resolves
/// through the same mapping logic downstream.
#[async_trait]
pub trait Message: Send + Sync {
    /// Returns the message's platform identifier.
    fn id(&self) -> &MessageId;

    /// Returns the id of the channel the message lives in.
    fn channel_id(&self) -> &ChannelId;

    /// Adds a reaction to the message.
    ///
    /// Fails if the message was deleted in the meantime.
    async fn react(&self, emoji: &Emoji) -> PlatformResult<()>;

    /// Returns a reaction by `user` among the `among` emoji set, if one is
    /// already present on the message.
    async fn reaction_by(&self, user: &UserId, among: &[Emoji])
    -> PlatformResult<Option<Reaction>>;

    /// Waits up to `timeout` for one reaction matching `filter`.
    ///
    /// The timeout is reported as [`WaitOutcome::TimedOut`], never as an
    /// error.
    async fn next_reaction(
        &self,
        filter: &ReactionFilter,
        timeout: Duration,
    ) -> PlatformResult<WaitOutcome<Reaction>>;

    /// Removes all reactions from the message.
    async fn clear_reactions(&self) -> PlatformResult<()>;

    /// Replaces the message content.
    async fn edit(&self, content: &str) -> PlatformResult<()>;

    /// Schedules the message for deletion after `after`.
    ///
    /// Fire-and-forget: the deletion happens in the background and its
    /// failure (message already gone) is the implementation's to log.
    fn schedule_deletion(&self, after: Duration);
}

/// A boxed message trait object.
pub type BoxedMessage = Arc<dyn Message>;
