//! # Banter Intake
//!
//! The job-post intake flow: a rate-limited direct-message form that
//! collects a posting from a community member, escalates suspicious
//! compensation answers to the moderation team, and publishes accepted
//! posts to the community's job board.
//!
//! The flow is a thin orchestration over `banter-interact`:
//!
//! ```text
//! trigger message ──▶ rate gate ──▶ heads-up + proceed ──▶ form engine
//!                                                             │
//!                staff channel ◀── moderation alerts ◀────────┤
//!                                                             ▼
//!                 job board ◀── publisher ◀── completed answer set
//! ```
//!
//! Entry point: [`IntakeFlow::handle_request`].

pub mod alert;
pub mod config;
pub mod intake;
pub mod publish;
pub mod render;
pub mod script;
pub mod validate;

pub use alert::ModerationAlerts;
pub use config::IntakeConfig;
pub use intake::IntakeFlow;
pub use publish::JobBoardPublisher;
pub use script::standard_script;
