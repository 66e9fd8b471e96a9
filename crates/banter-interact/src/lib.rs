//! # Banter Interact
//!
//! The interactive components of the Banter bot toolkit.
//!
//! Two user-facing flows live here, both built on the same primitive of
//! waiting a bounded amount of time for exactly one qualifying response:
//!
//! - the **conversational form engine** ([`form`]) walks a script of
//!   questions over a user's direct channel, with declared skip rules,
//!   validation, cancellation, and per-step timeouts, and
//! - the **reaction result selector** ([`select`]) turns a result list into
//!   reaction affordances on a message and resolves the user's pick, racing
//!   safely against reactions that existed before it started watching.
//!
//! Supporting pieces: the bounded response waiter ([`wait`]), the TTL-gated
//! submission limiter ([`limiter`]), the session context threaded through a
//! run ([`session`]), and the collaborator contracts a flow reports into
//! ([`alert`], [`publish`]).
//!
//! Everything is written against the platform traits in [`banter_core`];
//! nothing here knows which chat platform is on the other side.

pub mod alert;
pub mod form;
pub mod limiter;
pub mod publish;
pub mod select;
pub mod session;
pub mod wait;

pub use alert::{AlertSink, BoxedAlertSink, NullAlertSink};
pub use form::{Answers, FormEngine, Question};
pub use limiter::SubmissionLimiter;
pub use publish::{BoxedPublisher, Publisher};
pub use select::{ReactionSelector, Selection, affordance_set};
pub use session::SessionContext;
pub use wait::{Reply, await_reaction, await_reply};
