//! Deterministic in-memory platform doubles.
//!
//! Interactive flows are tested against these fakes instead of a live chat
//! platform: replies and reactions are scripted up front, waits resolve
//! immediately (an empty script means a timeout), and every side effect the
//! bot performs (sends, attached reactions, edits, scheduled deletions) is
//! recorded for assertion. The module is part of the public API so
//! downstream crates can drive their own flows the same way.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::cache::Clock;
use crate::channel::{BoxedChannel, Channel, WaitOutcome};
use crate::community::Community;
use crate::error::{PlatformError, PlatformResult};
use crate::message::{BoxedMessage, Message};
use crate::types::{
    ChannelId, Emoji, IncomingMessage, MessageFilter, MessageId, Reaction, ReactionFilter, UserId,
};

// =============================================================================
// FakeClock
// =============================================================================

/// A manually advanced [`Clock`].
pub struct FakeClock {
    now: Mutex<Instant>,
}

impl FakeClock {
    /// Creates a clock frozen at the current instant.
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    /// Advances the clock by `by`.
    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }
}

// =============================================================================
// FakeMessage
// =============================================================================

/// A recorded message with scripted reaction state.
///
/// Early reactions (present before anyone starts watching) are seeded with
/// [`seed_early_reaction`](FakeMessage::seed_early_reaction); live reactions
/// are queued with [`queue_live_reaction`](FakeMessage::queue_live_reaction)
/// and surface one per [`next_reaction`](Message::next_reaction) wait. An
/// empty live queue resolves the wait as a timeout.
pub struct FakeMessage {
    id: MessageId,
    channel_id: ChannelId,
    early: Mutex<Vec<Reaction>>,
    live: Mutex<VecDeque<Reaction>>,
    attached: Mutex<Vec<Emoji>>,
    edits: Mutex<Vec<String>>,
    cleared: AtomicBool,
    deletion: Mutex<Option<Duration>>,
    fail_reacts: AtomicBool,
    fail_edits: AtomicBool,
    fail_clears: AtomicBool,
    fail_reaction_reads: AtomicBool,
}

impl FakeMessage {
    /// Creates a message in the given channel.
    pub fn new(id: impl Into<MessageId>, channel_id: impl Into<ChannelId>) -> Self {
        Self {
            id: id.into(),
            channel_id: channel_id.into(),
            early: Mutex::new(Vec::new()),
            live: Mutex::new(VecDeque::new()),
            attached: Mutex::new(Vec::new()),
            edits: Mutex::new(Vec::new()),
            cleared: AtomicBool::new(false),
            deletion: Mutex::new(None),
            fail_reacts: AtomicBool::new(false),
            fail_edits: AtomicBool::new(false),
            fail_clears: AtomicBool::new(false),
            fail_reaction_reads: AtomicBool::new(false),
        }
    }

    /// Seeds a reaction that exists before any watcher starts.
    pub fn seed_early_reaction(&self, user: impl Into<UserId>, emoji: impl Into<Emoji>) {
        self.early.lock().push(Reaction {
            emoji: emoji.into(),
            user: user.into(),
        });
    }

    /// Queues a reaction to be observed by a forthcoming wait.
    pub fn queue_live_reaction(&self, user: impl Into<UserId>, emoji: impl Into<Emoji>) {
        self.live.lock().push_back(Reaction {
            emoji: emoji.into(),
            user: user.into(),
        });
    }

    /// Makes every [`react`](Message::react) call fail, as if the message
    /// had been deleted.
    pub fn fail_reacts(&self) {
        self.fail_reacts.store(true, Ordering::SeqCst);
    }

    /// Makes every [`edit`](Message::edit) call fail.
    pub fn fail_edits(&self) {
        self.fail_edits.store(true, Ordering::SeqCst);
    }

    /// Makes every [`clear_reactions`](Message::clear_reactions) call fail.
    pub fn fail_clears(&self) {
        self.fail_clears.store(true, Ordering::SeqCst);
    }

    /// Makes every reaction read ([`reaction_by`](Message::reaction_by) and
    /// [`next_reaction`](Message::next_reaction)) fail with a platform
    /// error, for exercising unexpected-failure paths.
    pub fn fail_reaction_reads(&self) {
        self.fail_reaction_reads.store(true, Ordering::SeqCst);
    }

    /// Returns the emoji the bot attached, in order.
    pub fn attached(&self) -> Vec<Emoji> {
        self.attached.lock().clone()
    }

    /// Returns the edits applied to the message, in order.
    pub fn edits(&self) -> Vec<String> {
        self.edits.lock().clone()
    }

    /// Returns `true` if the reactions were cleared.
    pub fn reactions_cleared(&self) -> bool {
        self.cleared.load(Ordering::SeqCst)
    }

    /// Returns the deferred-deletion delay, if one was scheduled.
    pub fn scheduled_deletion(&self) -> Option<Duration> {
        *self.deletion.lock()
    }
}

#[async_trait]
impl Message for FakeMessage {
    fn id(&self) -> &MessageId {
        &self.id
    }

    fn channel_id(&self) -> &ChannelId {
        &self.channel_id
    }

    async fn react(&self, emoji: &Emoji) -> PlatformResult<()> {
        if self.fail_reacts.load(Ordering::SeqCst) {
            return Err(PlatformError::TargetVanished { target: "message" });
        }
        self.attached.lock().push(emoji.clone());
        Ok(())
    }

    async fn reaction_by(
        &self,
        user: &UserId,
        among: &[Emoji],
    ) -> PlatformResult<Option<Reaction>> {
        if self.fail_reaction_reads.load(Ordering::SeqCst) {
            return Err(PlatformError::Other("reaction state unreadable".to_owned()));
        }
        Ok(self
            .early
            .lock()
            .iter()
            .find(|reaction| &reaction.user == user && among.contains(&reaction.emoji))
            .cloned())
    }

    async fn next_reaction(
        &self,
        filter: &ReactionFilter,
        _timeout: Duration,
    ) -> PlatformResult<WaitOutcome<Reaction>> {
        if self.fail_reaction_reads.load(Ordering::SeqCst) {
            return Err(PlatformError::Other("reaction state unreadable".to_owned()));
        }
        let mut live = self.live.lock();
        while let Some(reaction) = live.pop_front() {
            if filter.matches(&reaction) {
                return Ok(WaitOutcome::Event(reaction));
            }
        }
        Ok(WaitOutcome::TimedOut)
    }

    async fn clear_reactions(&self) -> PlatformResult<()> {
        if self.fail_clears.load(Ordering::SeqCst) {
            return Err(PlatformError::TargetVanished { target: "message" });
        }
        self.cleared.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn edit(&self, content: &str) -> PlatformResult<()> {
        if self.fail_edits.load(Ordering::SeqCst) {
            return Err(PlatformError::TargetVanished { target: "message" });
        }
        self.edits.lock().push(content.to_owned());
        Ok(())
    }

    fn schedule_deletion(&self, after: Duration) {
        *self.deletion.lock() = Some(after);
    }
}

// =============================================================================
// FakeChannel
// =============================================================================

/// A channel with a scripted reply queue and recorded sends.
///
/// [`next_message`](Channel::next_message) pops the first qualifying queued
/// reply; an exhausted queue resolves as a timeout. Every
/// [`send`](Channel::send) is recorded and produces a fresh [`FakeMessage`]
/// that stays reachable through [`sent_messages`](FakeChannel::sent_messages).
pub struct FakeChannel {
    id: ChannelId,
    replies: Mutex<VecDeque<IncomingMessage>>,
    sent: Mutex<Vec<String>>,
    sent_messages: Mutex<Vec<Arc<FakeMessage>>>,
    next_message_id: AtomicU64,
    fail_sends: AtomicBool,
}

impl FakeChannel {
    /// Creates a channel with the given id.
    pub fn new(id: impl Into<ChannelId>) -> Self {
        Self {
            id: id.into(),
            replies: Mutex::new(VecDeque::new()),
            sent: Mutex::new(Vec::new()),
            sent_messages: Mutex::new(Vec::new()),
            next_message_id: AtomicU64::new(1),
            fail_sends: AtomicBool::new(false),
        }
    }

    /// Queues a reply to be observed by a forthcoming wait.
    pub fn queue_reply(&self, author: impl Into<UserId>, content: impl Into<String>) {
        let author = author.into();
        let sequence = self.next_message_id.fetch_add(1, Ordering::SeqCst);
        self.replies.lock().push_back(IncomingMessage {
            id: MessageId::from(format!("{}-in-{sequence}", self.id)),
            author_tag: format!("{author}#0001"),
            author,
            content: content.into(),
        });
    }

    /// Makes every [`send`](Channel::send) call fail, as if the channel had
    /// vanished.
    pub fn fail_sends(&self) {
        self.fail_sends.store(true, Ordering::SeqCst);
    }

    /// Returns the contents sent to this channel, in order.
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().clone()
    }

    /// Returns the message handles produced by sends, in order.
    pub fn sent_messages(&self) -> Vec<Arc<FakeMessage>> {
        self.sent_messages.lock().clone()
    }

    /// Returns the handle of the most recent send.
    pub fn last_sent_message(&self) -> Option<Arc<FakeMessage>> {
        self.sent_messages.lock().last().cloned()
    }
}

#[async_trait]
impl Channel for FakeChannel {
    fn id(&self) -> &ChannelId {
        &self.id
    }

    async fn send(&self, content: &str) -> PlatformResult<BoxedMessage> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(PlatformError::SendFailed {
                reason: "channel vanished".to_owned(),
            });
        }
        let sequence = self.next_message_id.fetch_add(1, Ordering::SeqCst);
        let message = Arc::new(FakeMessage::new(
            format!("{}-out-{sequence}", self.id),
            self.id.clone(),
        ));
        self.sent.lock().push(content.to_owned());
        self.sent_messages.lock().push(message.clone());
        Ok(message)
    }

    async fn next_message(
        &self,
        filter: &MessageFilter,
        _timeout: Duration,
    ) -> PlatformResult<WaitOutcome<IncomingMessage>> {
        let mut replies = self.replies.lock();
        while let Some(message) = replies.pop_front() {
            if filter.matches(&message) {
                return Ok(WaitOutcome::Event(message));
            }
        }
        Ok(WaitOutcome::TimedOut)
    }
}

// =============================================================================
// FakeCommunity
// =============================================================================

/// A community with registered named channels and on-demand direct channels.
pub struct FakeCommunity {
    id: String,
    named: Mutex<HashMap<String, Arc<FakeChannel>>>,
    direct: Mutex<HashMap<UserId, Arc<FakeChannel>>>,
    refuse_direct: AtomicBool,
}

impl FakeCommunity {
    /// Creates a community with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            named: Mutex::new(HashMap::new()),
            direct: Mutex::new(HashMap::new()),
            refuse_direct: AtomicBool::new(false),
        }
    }

    /// Registers a named channel.
    pub fn add_channel(&self, name: impl Into<String>, channel: Arc<FakeChannel>) {
        self.named.lock().insert(name.into(), channel);
    }

    /// Makes every direct-channel request fail, as if the user had direct
    /// messages disabled.
    pub fn refuse_direct_messages(&self) {
        self.refuse_direct.store(true, Ordering::SeqCst);
    }

    /// Returns the direct channel opened for `user`, if any.
    pub fn direct(&self, user: &UserId) -> Option<Arc<FakeChannel>> {
        self.direct.lock().get(user).cloned()
    }
}

#[async_trait]
impl Community for FakeCommunity {
    fn id(&self) -> &str {
        &self.id
    }

    async fn channel(&self, name: &str) -> Option<BoxedChannel> {
        self.named
            .lock()
            .get(name)
            .cloned()
            .map(|channel| channel as BoxedChannel)
    }

    async fn direct_channel(&self, user: &UserId) -> PlatformResult<BoxedChannel> {
        if self.refuse_direct.load(Ordering::SeqCst) {
            return Err(PlatformError::DirectUnavailable {
                reason: "user declines direct messages".to_owned(),
            });
        }
        let channel = self
            .direct
            .lock()
            .entry(user.clone())
            .or_insert_with(|| Arc::new(FakeChannel::new(format!("dm-{user}"))))
            .clone();
        Ok(channel)
    }
}
