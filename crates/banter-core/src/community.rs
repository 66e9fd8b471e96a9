//! The [`Community`] contract: named channels and direct-channel access.

use std::sync::Arc;

use async_trait::async_trait;

use crate::channel::BoxedChannel;
use crate::error::PlatformResult;
use crate::types::UserId;

/// A community (server/guild/workspace) the bot is a member of.
///
/// The intake flow uses this in two ways: configured channels (the staff
/// channel for moderation alerts, the postings channel for published posts)
/// are looked up by name, and the requester's private conversation is opened
/// as a direct channel.
#[async_trait]
pub trait Community: Send + Sync {
    /// Returns the community's platform identifier.
    fn id(&self) -> &str;

    /// Looks up a channel by its configured name.
    ///
    /// Returns `None` if no such channel exists in this community; callers
    /// treat that as a configuration gap, not an error.
    async fn channel(&self, name: &str) -> Option<BoxedChannel>;

    /// Opens (or returns) the direct channel to `user`.
    ///
    /// Fails when the user does not accept direct messages.
    async fn direct_channel(&self, user: &UserId) -> PlatformResult<BoxedChannel>;
}

/// A boxed community trait object.
pub type BoxedCommunity = Arc<dyn Community>;
