//! Moderation alerts for invalid intake submissions.

use async_trait::async_trait;
use tracing::{error, warn};

use banter_core::{BoxedCommunity, Channel, Community};
use banter_interact::AlertSink;

use crate::render::code_block;

/// [`AlertSink`] that posts invalid-compensation alerts to the community's
/// staff channel.
///
/// A missing staff channel is a configuration gap and only warns; delivery
/// failures are logged and swallowed. Neither ever fails the intake
/// session.
pub struct ModerationAlerts {
    community: BoxedCommunity,
    staff_channel: String,
}

impl ModerationAlerts {
    /// Creates an alert sink targeting `staff_channel` in `community`.
    pub fn new(community: BoxedCommunity, staff_channel: impl Into<String>) -> Self {
        Self {
            community,
            staff_channel: staff_channel.into(),
        }
    }
}

#[async_trait]
impl AlertSink for ModerationAlerts {
    async fn invalid_submission(&self, requester_tag: &str, raw_input: &str) {
        let Some(channel) = self.community.channel(&self.staff_channel).await else {
            warn!(
                channel = %self.staff_channel,
                "Configured staff channel does not exist; dropping the alert"
            );
            return;
        };

        if let Err(failure) = channel.send(&alert_text(requester_tag, raw_input)).await {
            error!(%failure, "Failed to deliver a moderation alert");
        }
    }
}

/// Renders the staff-facing alert, including the suggested moderation
/// command. The raw input is passed through unmodified.
fn alert_text(requester_tag: &str, raw_input: &str) -> String {
    let command = format!(
        "?ban {requester_tag} Attempting to create a job post with invalid compensation."
    );
    format!(
        "**Alert!**\n\
         A user tried creating a job post whilst providing invalid compensation.\n\
         \n\
         User: {requester_tag}\n\
         User input:\n{}\n\
         Command:\n{}\n\
         Message link: DM channel - not applicable",
        code_block(raw_input),
        code_block(&command),
    )
}
