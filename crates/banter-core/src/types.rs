//! Identifier newtypes, event payloads, and qualifying-event filters.
//!
//! Identifiers are opaque platform strings wrapped in newtypes so a user id
//! can never be passed where a channel id is expected. They serialize
//! transparently, the way adapter payloads carry them on the wire.
//!
//! Filters describe a *qualifying event*: the identity (which user) and
//! shape (which content or emoji) an event must match before a wait
//! resolves. They are plain data rather than closures so the platform
//! traits in [`channel`](crate::channel) and [`message`](crate::message)
//! stay object-safe.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

// =============================================================================
// Identifier newtypes
// =============================================================================

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier from a platform string.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

id_type! {
    /// A platform user identifier.
    UserId
}

id_type! {
    /// A platform channel identifier.
    ChannelId
}

id_type! {
    /// A platform message identifier.
    MessageId
}

id_type! {
    /// A reaction emoji, identified by its rendered form (e.g. `1️⃣`, `❌`).
    Emoji
}

// =============================================================================
// Event payloads
// =============================================================================

/// A message received from a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    /// The platform message id.
    pub id: MessageId,
    /// The author's user id.
    pub author: UserId,
    /// The author's human-readable tag (e.g. `someone#1234`).
    pub author_tag: String,
    /// The raw message content, untrimmed.
    pub content: String,
}

/// A reaction observed on a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    /// The emoji that was added.
    pub emoji: Emoji,
    /// The user who added it.
    pub user: UserId,
}

// =============================================================================
// Qualifying-event filters
// =============================================================================

/// Identity filter for message waits: only messages authored by one user
/// qualify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageFilter {
    author: UserId,
}

impl MessageFilter {
    /// Creates a filter matching messages authored by `author`.
    pub fn from_author(author: UserId) -> Self {
        Self { author }
    }

    /// Returns the author this filter matches.
    pub fn author(&self) -> &UserId {
        &self.author
    }

    /// Returns `true` if the message qualifies.
    pub fn matches(&self, message: &IncomingMessage) -> bool {
        message.author == self.author
    }
}

/// Identity + shape filter for reaction waits: only reactions by one user,
/// drawn from an allowed emoji set, qualify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionFilter {
    user: UserId,
    emoji: Vec<Emoji>,
}

impl ReactionFilter {
    /// Creates a filter matching reactions by `user` among `emoji`.
    pub fn new(user: UserId, emoji: Vec<Emoji>) -> Self {
        Self { user, emoji }
    }

    /// Returns the user this filter matches.
    pub fn user(&self) -> &UserId {
        &self.user
    }

    /// Returns the allowed emoji set.
    pub fn emoji(&self) -> &[Emoji] {
        &self.emoji
    }

    /// Returns `true` if the reaction qualifies.
    pub fn matches(&self, reaction: &Reaction) -> bool {
        reaction.user == self.user && self.emoji.contains(&reaction.emoji)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(author: &str, content: &str) -> IncomingMessage {
        IncomingMessage {
            id: MessageId::from("m1"),
            author: UserId::from(author),
            author_tag: format!("{author}#0001"),
            content: content.to_owned(),
        }
    }

    #[test]
    fn message_filter_matches_author_only() {
        let filter = MessageFilter::from_author(UserId::from("alice"));
        assert!(filter.matches(&message("alice", "hi")));
        assert!(!filter.matches(&message("bob", "hi")));
    }

    #[test]
    fn reaction_filter_requires_identity_and_shape() {
        let filter = ReactionFilter::new(
            UserId::from("alice"),
            vec![Emoji::from("1️⃣"), Emoji::from("❌")],
        );

        let qualifying = Reaction {
            emoji: Emoji::from("1️⃣"),
            user: UserId::from("alice"),
        };
        let wrong_user = Reaction {
            emoji: Emoji::from("1️⃣"),
            user: UserId::from("bob"),
        };
        let wrong_emoji = Reaction {
            emoji: Emoji::from("2️⃣"),
            user: UserId::from("alice"),
        };

        assert!(filter.matches(&qualifying));
        assert!(!filter.matches(&wrong_user));
        assert!(!filter.matches(&wrong_emoji));
    }
}
