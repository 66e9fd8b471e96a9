//! Downstream publisher contract.

use std::sync::Arc;

use async_trait::async_trait;

use banter_core::PlatformResult;

use crate::form::Answers;
use crate::session::SessionContext;

/// Renders and posts the final artifact of a completed form run.
///
/// The engine hands over the answer set as a single unit together with the
/// session context for attribution. On success the publisher returns a
/// durable reference (a permalink) for display to the requester, or `None`
/// when the post could not be placed (a configuration gap the publisher has
/// already logged).
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Publishes `answers` on behalf of the session's requester.
    async fn publish(
        &self,
        answers: &Answers,
        session: &SessionContext,
    ) -> PlatformResult<Option<String>>;
}

/// A boxed publisher trait object.
pub type BoxedPublisher = Arc<dyn Publisher>;
