//! Publishing accepted posts to the community's job board.

use async_trait::async_trait;
use tracing::{error, warn};

use banter_core::{BoxedCommunity, Channel, Community, Message, PlatformResult};
use banter_interact::{Answers, Publisher, SessionContext};

use crate::render::{answer_fields, current_date, markdown_link, message_permalink};

/// [`Publisher`] that renders a completed answer set into a job post on the
/// community's postings channel.
///
/// Placement failures are logged and yield no permalink; they never fail
/// the intake session, which degrades to a linkless confirmation.
pub struct JobBoardPublisher {
    community: BoxedCommunity,
    postings_channel: String,
}

impl JobBoardPublisher {
    /// Creates a publisher targeting `postings_channel` in `community`.
    pub fn new(community: BoxedCommunity, postings_channel: impl Into<String>) -> Self {
        Self {
            community,
            postings_channel: postings_channel.into(),
        }
    }
}

#[async_trait]
impl Publisher for JobBoardPublisher {
    async fn publish(
        &self,
        answers: &Answers,
        session: &SessionContext,
    ) -> PlatformResult<Option<String>> {
        let Some(channel) = self.community.channel(&self.postings_channel).await else {
            warn!(
                channel = %self.postings_channel,
                "Configured postings channel does not exist; dropping the post"
            );
            return Ok(None);
        };

        let content = render_post(answers, session, self.community.id());
        match channel.send(&content).await {
            Ok(message) => Ok(Some(message_permalink(
                self.community.id(),
                message.channel_id(),
                message.id(),
            ))),
            Err(failure) => {
                error!(%failure, "Failed to place a job post");
                Ok(None)
            }
        }
    }
}

fn render_post(answers: &Answers, session: &SessionContext, community_id: &str) -> String {
    let source = message_permalink(community_id, &session.source_channel, &session.source_message);
    let mut post = format!(
        "**New Job Posting!**\n\
         A user has created a new job post!\n\
         \n\
         User: {}\n\
         Created at: {}\n\
         Source: {}\n",
        session.requester_tag,
        current_date(),
        markdown_link("original request", &source),
    );
    for field in answer_fields(answers) {
        post.push_str(&format!("\n**{}**\n{}\n", field.name, field.value));
    }
    post
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use banter_core::testing::{FakeChannel, FakeCommunity};
    use banter_core::{ChannelId, MessageId, UserId};

    fn session() -> SessionContext {
        SessionContext {
            requester: UserId::from("alice"),
            requester_tag: "@alice#0001".to_owned(),
            source_channel: ChannelId::from("general"),
            source_message: MessageId::from("m1"),
        }
    }

    fn answers() -> Answers {
        let mut answers = Answers::new();
        answers.insert("remote", "no");
        answers.insert("location", "Berlin");
        answers.insert("compensation", "5000");
        answers
    }

    #[tokio::test]
    async fn publishing_returns_the_posted_message_permalink() {
        let community = Arc::new(FakeCommunity::new("g1"));
        let board = Arc::new(FakeChannel::new("job-postings"));
        community.add_channel("job-postings", board.clone());

        let publisher = JobBoardPublisher::new(community, "job-postings");
        let permalink = publisher
            .publish(&answers(), &session())
            .await
            .unwrap()
            .unwrap();

        let posted = board.last_sent_message().unwrap();
        assert_eq!(
            permalink,
            format!("https://discordapp.com/channels/g1/job-postings/{}", posted.id())
        );

        let content = &board.sent()[0];
        assert!(content.contains("New Job Posting!"));
        assert!(content.contains("@alice#0001"));
        assert!(content.contains("Berlin"));
        assert!(content.contains("5000$"));
        assert!(
            content.contains("[original request](https://discordapp.com/channels/g1/general/m1)")
        );
    }

    #[tokio::test]
    async fn missing_postings_channel_yields_no_permalink() {
        let community = Arc::new(FakeCommunity::new("g1"));

        let publisher = JobBoardPublisher::new(community, "job-postings");
        let permalink = publisher.publish(&answers(), &session()).await.unwrap();

        assert!(permalink.is_none());
    }

    #[tokio::test]
    async fn placement_failure_yields_no_permalink() {
        let community = Arc::new(FakeCommunity::new("g1"));
        let board = Arc::new(FakeChannel::new("job-postings"));
        board.fail_sends();
        community.add_channel("job-postings", board);

        let publisher = JobBoardPublisher::new(community, "job-postings");
        let permalink = publisher.publish(&answers(), &session()).await.unwrap();

        assert!(permalink.is_none());
    }
}
