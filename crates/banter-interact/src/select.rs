//! The reaction-driven result selector.
//!
//! Turns a list of results into reaction affordances on a message: one
//! numbered emoji per result (capped at the platform limit) plus a trailing
//! delete emoji. The selector resolves whichever comes first: a reaction
//! the requester placed *before* the bot started watching (an early
//! reaction, typically on a leftover affordance from a previous render), or
//! one observed live afterward. Both paths map through the same affordance
//! ordering, so the source of the reaction never changes the selected
//! index.

use std::time::Duration;

use tracing::{error, info, warn};

use banter_core::{
    Channel, Emoji, Message, PlatformResult, Reaction, ReactionFilter, UserId, WaitOutcome,
};

use crate::wait;

/// Index affordances in order. The platform renders at most this many
/// numbered markers on one message; results beyond the ninth are reachable
/// only by other means.
pub const INDEX_EMOJI: [&str; 9] = [
    "1️⃣", "2️⃣", "3️⃣", "4️⃣", "5️⃣", "6️⃣", "7️⃣", "8️⃣", "9️⃣",
];

/// The delete affordance, always last in the set.
pub const DELETE_EMOJI: &str = "❌";

/// Fallback notice edited into the result message when selection fails for
/// a reason other than silence.
pub const FAILURE_NOTICE: &str = "Something went wrong here. Please try again later.";

/// The outcome of one selection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The requester picked the result at this zero-based index.
    Picked(usize),
    /// The requester asked for the result message to be deleted; deletion
    /// has been scheduled.
    DeleteRequested,
    /// Nobody made a qualifying selection in time, or the message vanished
    /// before the affordances were in place.
    NoResponse,
}

/// Builds the affordance set for `result_count` results: index emoji capped
/// at the platform limit, plus the delete emoji.
pub fn affordance_set(result_count: usize) -> Vec<Emoji> {
    INDEX_EMOJI[..result_count.min(INDEX_EMOJI.len())]
        .iter()
        .copied()
        .chain(std::iter::once(DELETE_EMOJI))
        .map(Emoji::from)
        .collect()
}

/// Resolves one selection from the requester's reactions on a message.
pub struct ReactionSelector {
    reaction_timeout: Duration,
    deletion_delay: Duration,
}

impl ReactionSelector {
    /// Creates a selector with the given reaction timeout and a one-second
    /// deferred-deletion delay.
    pub fn new(reaction_timeout: Duration) -> Self {
        Self {
            reaction_timeout,
            deletion_delay: Duration::from_secs(1),
        }
    }

    /// Sets the delay used when the delete affordance schedules deletion.
    pub fn deletion_delay(mut self, delay: Duration) -> Self {
        self.deletion_delay = delay;
        self
    }

    /// Resolves the requester's selection among `result_count` results
    /// presented on `message`.
    ///
    /// Timeouts and a concurrently deleted message resolve to
    /// [`Selection::NoResponse`]; any other platform failure is logged, a
    /// generic failure notice is best-effort edited into the message, and
    /// the error propagates.
    pub async fn resolve(
        &self,
        message: &dyn Message,
        notice_channel: &dyn Channel,
        requester: &UserId,
        result_count: usize,
    ) -> PlatformResult<Selection> {
        match self
            .try_resolve(message, notice_channel, requester, result_count)
            .await
        {
            Ok(selection) => Ok(selection),
            Err(failure) => {
                error!(%failure, "Result selection failed for a reason other than silence");
                attempt_edit(message, FAILURE_NOTICE).await;
                Err(failure)
            }
        }
    }

    async fn try_resolve(
        &self,
        message: &dyn Message,
        notice_channel: &dyn Channel,
        requester: &UserId,
        result_count: usize,
    ) -> PlatformResult<Selection> {
        let affordances = affordance_set(result_count);

        // Attach affordances one by one, checking before each attach
        // whether the requester already reacted. A hit stops the loop
        // early, so a selection that is already available renders as few
        // affordances as detection required.
        let mut early = None;
        for emoji in &affordances {
            if let Some(reaction) = message.reaction_by(requester, &affordances).await? {
                early = Some(reaction);
                break;
            }
            if let Err(failure) = message.react(emoji).await {
                info!(%failure, "Could not attach an affordance; message is probably gone");
                return Ok(Selection::NoResponse);
            }
        }

        let reaction = match early {
            Some(reaction) => reaction,
            None => {
                let filter = ReactionFilter::new(requester.clone(), affordances);
                match wait::await_reaction(message, notice_channel, &filter, self.reaction_timeout)
                    .await?
                {
                    WaitOutcome::Event(reaction) => reaction,
                    WaitOutcome::TimedOut => return Ok(Selection::NoResponse),
                }
            }
        };

        Ok(self.resolve_reaction(message, &reaction).await)
    }

    /// Maps a qualifying reaction (early or live) onto a selection.
    async fn resolve_reaction(&self, message: &dyn Message, reaction: &Reaction) -> Selection {
        if reaction.emoji.as_str() == DELETE_EMOJI {
            message.schedule_deletion(self.deletion_delay);
            return Selection::DeleteRequested;
        }

        let Some(index) = INDEX_EMOJI
            .iter()
            .position(|emoji| *emoji == reaction.emoji.as_str())
        else {
            warn!(emoji = %reaction.emoji, "Qualifying reaction maps to no affordance");
            return Selection::NoResponse;
        };

        if let Err(failure) = message.clear_reactions().await {
            info!(%failure, "Could not clear reactions; message gone or missing rights");
        }

        Selection::Picked(index)
    }
}

/// Best-effort edit; a deleted message is logged, not escalated.
pub async fn attempt_edit(message: &dyn Message, content: &str) {
    if let Err(failure) = message.edit(content).await {
        info!(%failure, "Could not edit the message; it was probably deleted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use banter_core::testing::{FakeChannel, FakeMessage};

    const TIMEOUT: Duration = Duration::from_secs(180);

    fn selector() -> ReactionSelector {
        ReactionSelector::new(TIMEOUT)
    }

    fn requester() -> UserId {
        UserId::from("alice")
    }

    #[tokio::test]
    async fn affordance_set_is_capped_with_trailing_delete() {
        let three = affordance_set(3);
        assert_eq!(three.len(), 4);
        assert_eq!(three[0].as_str(), "1️⃣");
        assert_eq!(three[3].as_str(), DELETE_EMOJI);

        let many = affordance_set(25);
        assert_eq!(many.len(), INDEX_EMOJI.len() + 1);
        assert_eq!(many.last().unwrap().as_str(), DELETE_EMOJI);
    }

    #[tokio::test]
    async fn live_reaction_picks_an_index() {
        let message = FakeMessage::new("m1", "results");
        let channel = FakeChannel::new("results");
        message.queue_live_reaction("alice", "3️⃣");

        let selection = selector()
            .resolve(&message, &channel, &requester(), 3)
            .await
            .unwrap();

        assert_eq!(selection, Selection::Picked(2));
        assert_eq!(message.attached().len(), 4);
        assert!(message.reactions_cleared());
    }

    #[tokio::test]
    async fn early_reaction_short_circuits_attachment() {
        let message = FakeMessage::new("m1", "results");
        let channel = FakeChannel::new("results");
        message.seed_early_reaction("alice", "2️⃣");

        let selection = selector()
            .resolve(&message, &channel, &requester(), 3)
            .await
            .unwrap();

        assert_eq!(selection, Selection::Picked(1));
        // Detected on the first check, before any affordance went up.
        assert!(message.attached().is_empty());
    }

    #[tokio::test]
    async fn early_and_live_reactions_map_to_the_same_index() {
        let early_message = FakeMessage::new("m1", "results");
        early_message.seed_early_reaction("alice", "2️⃣");
        let live_message = FakeMessage::new("m2", "results");
        live_message.queue_live_reaction("alice", "2️⃣");
        let channel = FakeChannel::new("results");

        let early = selector()
            .resolve(&early_message, &channel, &requester(), 5)
            .await
            .unwrap();
        let live = selector()
            .resolve(&live_message, &channel, &requester(), 5)
            .await
            .unwrap();

        assert_eq!(early, live);
        assert_eq!(early, Selection::Picked(1));
    }

    #[tokio::test]
    async fn delete_affordance_schedules_deferred_deletion() {
        let message = FakeMessage::new("m1", "results");
        let channel = FakeChannel::new("results");
        message.queue_live_reaction("alice", DELETE_EMOJI);

        let selection = selector()
            .deletion_delay(Duration::from_secs(1))
            .resolve(&message, &channel, &requester(), 3)
            .await
            .unwrap();

        assert_eq!(selection, Selection::DeleteRequested);
        assert_eq!(message.scheduled_deletion(), Some(Duration::from_secs(1)));
        assert!(!message.reactions_cleared());
    }

    #[tokio::test]
    async fn early_delete_reaction_also_requests_deletion() {
        let message = FakeMessage::new("m1", "results");
        let channel = FakeChannel::new("results");
        message.seed_early_reaction("alice", DELETE_EMOJI);

        let selection = selector()
            .resolve(&message, &channel, &requester(), 3)
            .await
            .unwrap();

        assert_eq!(selection, Selection::DeleteRequested);
        assert!(message.scheduled_deletion().is_some());
    }

    #[tokio::test]
    async fn vanished_message_resolves_to_no_response() {
        let message = FakeMessage::new("m1", "results");
        let channel = FakeChannel::new("results");
        message.fail_reacts();

        let selection = selector()
            .resolve(&message, &channel, &requester(), 3)
            .await
            .unwrap();

        assert_eq!(selection, Selection::NoResponse);
    }

    #[tokio::test]
    async fn timeout_resolves_to_no_response() {
        let message = FakeMessage::new("m1", "results");
        let channel = FakeChannel::new("results");

        let selection = selector()
            .resolve(&message, &channel, &requester(), 3)
            .await
            .unwrap();

        assert_eq!(selection, Selection::NoResponse);
        assert_eq!(message.attached().len(), 4);
    }

    #[tokio::test]
    async fn other_users_reactions_never_resolve() {
        let message = FakeMessage::new("m1", "results");
        let channel = FakeChannel::new("results");
        message.seed_early_reaction("mallory", "1️⃣");
        message.queue_live_reaction("mallory", "2️⃣");

        let selection = selector()
            .resolve(&message, &channel, &requester(), 3)
            .await
            .unwrap();

        assert_eq!(selection, Selection::NoResponse);
    }

    #[tokio::test]
    async fn unexpected_failure_edits_a_notice_and_propagates() {
        let message = FakeMessage::new("m1", "results");
        let channel = FakeChannel::new("results");
        message.fail_reaction_reads();

        let outcome = selector()
            .resolve(&message, &channel, &requester(), 3)
            .await;

        assert!(outcome.is_err());
        assert_eq!(message.edits(), vec![FAILURE_NOTICE.to_owned()]);
    }

    #[tokio::test]
    async fn clear_failure_does_not_change_the_pick() {
        let message = FakeMessage::new("m1", "results");
        let channel = FakeChannel::new("results");
        message.queue_live_reaction("alice", "1️⃣");
        message.fail_clears();

        let selection = selector()
            .resolve(&message, &channel, &requester(), 3)
            .await
            .unwrap();

        assert_eq!(selection, Selection::Picked(0));
    }
}
