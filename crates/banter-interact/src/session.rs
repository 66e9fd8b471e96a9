//! Per-run session context.

use banter_core::{ChannelId, MessageFilter, MessageId, UserId};

/// Attribution context for one interactive run.
///
/// Carried through the whole form lifecycle so side effects (moderation
/// alerts, the published post) can name the requester and link back to the
/// message that started it all. Lives only for the duration of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    /// The requesting user.
    pub requester: UserId,
    /// The requester's human-readable tag, for staff-facing output.
    pub requester_tag: String,
    /// The channel the triggering message arrived on.
    pub source_channel: ChannelId,
    /// The triggering message.
    pub source_message: MessageId,
}

impl SessionContext {
    /// Returns the qualifying-message filter for this session's requester.
    pub fn message_filter(&self) -> MessageFilter {
        MessageFilter::from_author(self.requester.clone())
    }
}
