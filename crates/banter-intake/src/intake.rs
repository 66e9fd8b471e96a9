//! The end-to-end intake request handler.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use banter_core::{
    BoxedCommunity, CacheError, CacheResult, Channel, Community, IncomingMessage, PlatformError,
    TtlCache,
};
use banter_interact::{
    BoxedPublisher, FormEngine, Question, Reply, SessionContext, SubmissionLimiter, wait,
};

use crate::alert::ModerationAlerts;
use crate::config::IntakeConfig;
use crate::publish::JobBoardPublisher;
use crate::script::standard_script;

/// Notice sent to a user whose cooldown entry is still live.
pub const RATE_LIMITED_NOTICE: &str =
    "You cannot create a job posting right now. Please try again later.";

/// Notice sent when the user backs out at the heads-up step.
pub const PROCEED_CANCELLED_NOTICE: &str = "Canceled.";

/// Hint posted on the originating channel when the requester's direct
/// channel cannot be reached.
pub const DIRECT_MESSAGES_HINT: &str =
    "Please temporarily enable direct messages; the intake conversation happens in private.";

/// Internal error plumbing: cache trouble is fatal for the request, platform
/// trouble degrades to the direct-messages hint.
#[derive(Debug, Error)]
enum SessionError {
    #[error(transparent)]
    Cache(#[from] CacheError),
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/// The rate-limited, direct-message job-post intake flow.
///
/// One instance serves a community; each
/// [`handle_request`](IntakeFlow::handle_request) call runs one session.
/// Sessions for different users run fully concurrently; the TTL cache is
/// the only state they share.
pub struct IntakeFlow {
    community: BoxedCommunity,
    limiter: SubmissionLimiter,
    engine: FormEngine,
    publisher: BoxedPublisher,
    script: Vec<Question>,
    reply_timeout: Duration,
    minimal_compensation: u64,
}

impl IntakeFlow {
    /// Wires the flow for `community`: moderation alerts and the job-board
    /// publisher target the configured channels, the cooldown gate runs
    /// over `cache`.
    pub fn new(community: BoxedCommunity, cache: Arc<dyn TtlCache>, config: &IntakeConfig) -> Self {
        let alerts = Arc::new(ModerationAlerts::new(
            community.clone(),
            config.staff_channel.clone(),
        ));
        let publisher = Arc::new(JobBoardPublisher::new(
            community.clone(),
            config.postings_channel.clone(),
        ));
        Self {
            community,
            limiter: SubmissionLimiter::new(cache, config.cooldown()),
            engine: FormEngine::new(config.reply_timeout()).with_alerts(alerts),
            publisher,
            script: standard_script(config.minimal_compensation),
            reply_timeout: config.reply_timeout(),
            minimal_compensation: config.minimal_compensation,
        }
    }

    /// Replaces the publisher, for boards that live somewhere else.
    pub fn with_publisher(mut self, publisher: BoxedPublisher) -> Self {
        self.publisher = publisher;
        self
    }

    /// Handles one intake trigger message.
    ///
    /// Platform trouble mid-session (most commonly a requester who does not
    /// accept direct messages) degrades to a hint on the originating
    /// channel. An unreachable cooldown cache is the one fatal case: the
    /// session never starts and the error surfaces to the caller.
    pub async fn handle_request(
        &self,
        origin: &dyn Channel,
        request: &IncomingMessage,
    ) -> CacheResult<()> {
        match self.run_session(origin, request).await {
            Ok(()) => Ok(()),
            Err(SessionError::Cache(failure)) => Err(failure),
            Err(SessionError::Platform(failure)) => {
                warn!(
                    requester = %request.author,
                    %failure,
                    "Intake session ended on a platform failure; nudging the requester"
                );
                if let Err(failure) = origin.send(DIRECT_MESSAGES_HINT).await {
                    debug!(%failure, "Could not deliver the direct-messages hint");
                }
                Ok(())
            }
        }
    }

    async fn run_session(
        &self,
        origin: &dyn Channel,
        request: &IncomingMessage,
    ) -> Result<(), SessionError> {
        // The gate is checked (and the cooldown started) before anything is
        // sent, so an abandoned session still counts.
        if !self.limiter.try_acquire(&request.author).await? {
            let dm = self.community.direct_channel(&request.author).await?;
            dm.send(RATE_LIMITED_NOTICE).await?;
            return Ok(());
        }

        let dm = self.community.direct_channel(&request.author).await?;
        let session = SessionContext {
            requester: request.author.clone(),
            requester_tag: format!("@{}", request.author_tag),
            source_channel: origin.id().clone(),
            source_message: request.id.clone(),
        };

        dm.send(&heads_up(self.minimal_compensation)).await?;
        let filter = session.message_filter();
        match wait::await_reply(dm.as_ref(), &filter, self.reply_timeout).await? {
            // Anything but the cancel token proceeds.
            Reply::Content(_) => {}
            Reply::Cancelled | Reply::NoResponse => {
                dm.send(PROCEED_CANCELLED_NOTICE).await?;
                return Ok(());
            }
        }

        let Some(answers) = self.engine.run(&self.script, &session, dm.as_ref()).await? else {
            // The engine already told the user why.
            return Ok(());
        };

        let permalink = self.publisher.publish(&answers, &session).await?;
        info!(requester = %session.requester, "Job post intake completed");
        dm.send(&success_notice(permalink.as_deref())).await?;
        Ok(())
    }
}

fn heads_up(minimal_compensation: u64) -> String {
    format!(
        "Heads up!\n\
         Posts without financial compensation are not allowed.\n\
         Attempting to create a post with compensation lower than `${minimal_compensation}` is not allowed either.\n\
         Trying to circumvent these rules in any way will result in a ban.\n\
         If you are not willing to continue, type `cancel`.\n\
         Otherwise, reply with anything else to continue."
    )
}

fn success_notice(permalink: Option<&str>) -> String {
    match permalink {
        Some(url) => format!("Your job posting has been created! - {url}"),
        None => "Your job posting has been created!".to_owned(),
    }
}
