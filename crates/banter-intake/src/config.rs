//! Intake configuration schema.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the intake flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeConfig {
    /// How long to wait for each reply, in seconds.
    #[serde(default = "default_reply_timeout_secs")]
    pub reply_timeout_secs: u64,

    /// Cooldown between intake sessions per user, in hours.
    #[serde(default = "default_cooldown_hours")]
    pub cooldown_hours: u64,

    /// The lowest acceptable compensation amount.
    #[serde(default = "default_minimal_compensation")]
    pub minimal_compensation: u64,

    /// Name of the channel moderation alerts are sent to.
    #[serde(default = "default_staff_channel")]
    pub staff_channel: String,

    /// Name of the channel accepted posts are published to.
    #[serde(default = "default_postings_channel")]
    pub postings_channel: String,
}

impl IntakeConfig {
    /// Returns the per-reply timeout as a duration.
    pub fn reply_timeout(&self) -> Duration {
        Duration::from_secs(self.reply_timeout_secs)
    }

    /// Returns the per-user cooldown as a duration.
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_hours * 60 * 60)
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            reply_timeout_secs: default_reply_timeout_secs(),
            cooldown_hours: default_cooldown_hours(),
            minimal_compensation: default_minimal_compensation(),
            staff_channel: default_staff_channel(),
            postings_channel: default_postings_channel(),
        }
    }
}

fn default_reply_timeout_secs() -> u64 {
    60
}

fn default_cooldown_hours() -> u64 {
    12
}

fn default_minimal_compensation() -> u64 {
    500
}

fn default_staff_channel() -> String {
    "moderation".to_string()
}

fn default_postings_channel() -> String {
    "job-postings".to_string()
}
