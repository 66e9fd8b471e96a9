//! # Banter Core
//!
//! Platform contracts and shared types for the Banter bot toolkit.
//!
//! Banter's interactive components (the intake form and the reaction-driven
//! result selector in `banter-interact`) never talk to a chat platform
//! directly. They are written against the small set of collaborator traits
//! defined here:
//!
//! - [`Channel`] — a place messages can be sent to and awaited from
//! - [`Message`] — a sent message that can carry reactions, be edited, or
//!   be scheduled for deletion
//! - [`Community`] — a named-channel directory plus direct-channel access
//! - [`TtlCache`] — a key-value store whose entries expire on their own
//!
//! A platform adapter implements these traits over its connection layer; the
//! [`testing`] module provides deterministic in-memory implementations so
//! every interactive flow can be exercised without a live platform.
//!
//! Waiting for a user response is the one suspension point in the whole
//! toolkit. Platform waits return [`WaitOutcome`], which keeps "nobody
//! responded" distinct from a genuine platform failure: timeouts are a
//! value, failures are an `Err`.

pub mod cache;
pub mod channel;
pub mod community;
pub mod error;
pub mod message;
pub mod testing;
pub mod types;

pub use cache::{Clock, MemoryTtlCache, SystemClock, TtlCache};
pub use channel::{BoxedChannel, Channel, WaitOutcome};
pub use community::{BoxedCommunity, Community};
pub use error::{CacheError, CacheResult, PlatformError, PlatformResult};
pub use message::{BoxedMessage, Message};
pub use types::{
    ChannelId, Emoji, IncomingMessage, MessageFilter, MessageId, Reaction, ReactionFilter, UserId,
};

/// Prelude for common imports.
pub mod prelude {
    pub use super::cache::{Clock, TtlCache};
    pub use super::channel::{BoxedChannel, Channel, WaitOutcome};
    pub use super::community::{BoxedCommunity, Community};
    pub use super::error::{CacheError, CacheResult, PlatformError, PlatformResult};
    pub use super::message::{BoxedMessage, Message};
    pub use super::types::{
        ChannelId, Emoji, IncomingMessage, MessageFilter, MessageId, Reaction, ReactionFilter,
        UserId,
    };
}
