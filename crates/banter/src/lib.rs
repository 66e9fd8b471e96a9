//! # Banter
//!
//! A conversational intake and selection toolkit for chat-platform bots.
//!
//! ## Overview
//!
//! Banter covers the interactive middle of a bot: collecting structured
//! answers from one user over direct messages, and resolving a pick from a
//! result list via reaction affordances. Everything is written against
//! small platform traits, so the same flows run on any chat platform an
//! adapter covers, and on the in-memory fakes in tests.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌─────────────────┐     ┌───────────────────────┐
//! │   Adapter    │────▶│  banter-core    │◀────│  banter-interact      │
//! │ (platform)   │     │  Channel/Message│     │  form / select / wait │
//! └──────────────┘     └─────────────────┘     └───────────┬───────────┘
//!                                                          │
//!                                              ┌───────────▼───────────┐
//!                                              │  banter-intake        │
//!                                              │  job-post flow        │
//!                                              └───────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use banter::prelude::*;
//!
//! async fn on_trigger(
//!     flow: &IntakeFlow,
//!     origin: &dyn Channel,
//!     request: &IncomingMessage,
//! ) -> CacheResult<()> {
//!     flow.handle_request(origin, request).await
//! }
//! ```

pub use banter_core as core;
pub use banter_intake as intake;
pub use banter_interact as interact;
pub use banter_runtime as runtime;

/// Prelude module for convenient imports.
pub mod prelude {
    // Platform contracts
    pub use banter_core::{
        BoxedChannel, BoxedCommunity, BoxedMessage, CacheResult, Channel, Community, Emoji,
        IncomingMessage, Message, PlatformResult, TtlCache, UserId, WaitOutcome,
    };

    // Interactive components
    pub use banter_interact::{
        Answers, FormEngine, Question, ReactionSelector, Selection, SessionContext,
        SubmissionLimiter,
    };

    // The intake flow
    pub use banter_intake::{IntakeConfig, IntakeFlow};

    // Runtime plumbing
    pub use banter_runtime::{BanterConfig, ConfigLoader};
}
