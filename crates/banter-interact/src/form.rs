//! The conversational form engine.
//!
//! Drives an ordered script of [`Question`]s over a channel: send the
//! prompt, wait (bounded) for the requester's reply, validate, store, move
//! on. A cancel token or a timeout aborts the entire remaining script, not
//! just the current question; a failed validation likewise ends the run.
//! The engine produces either a complete [`Answers`] set or nothing; no
//! partial state ever escapes.
//!
//! Inter-question coupling is declared, not hardcoded: a question may carry
//! a [`skip rule`](Question::skip_if) evaluated against the answers
//! collected so far, and a question whose invalid answers should reach the
//! moderation team marks itself with
//! [`escalate_invalid`](Question::escalate_invalid).

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use banter_core::{Channel, PlatformResult};

use crate::alert::{BoxedAlertSink, NullAlertSink};
use crate::session::SessionContext;
use crate::wait::{self, Reply};

/// Notice sent when the user cancels or stops responding mid-form.
pub const CANCELLED_NOTICE: &str = "Cancelled the form. Exiting.";

/// Notice sent when an answer fails its question's validation.
pub const INVALID_NOTICE: &str = "Invalid input. Cancelling the form.";

/// A validation predicate over a trimmed answer.
pub type Validator = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// A skip rule evaluated against the answers collected so far.
pub type SkipRule = Arc<dyn Fn(&Answers) -> bool + Send + Sync>;

// =============================================================================
// Question
// =============================================================================

/// One step of a form script.
///
/// Built in the builder style:
///
/// ```rust,ignore
/// let question = Question::new("location", "Where is the position located?")
///     .skip_if(|answers| {
///         answers.get("remote").is_some_and(|v| v.eq_ignore_ascii_case("yes"))
///     });
/// ```
#[derive(Clone)]
pub struct Question {
    key: String,
    prompt: String,
    validate: Option<Validator>,
    skip_if: Option<SkipRule>,
    escalate_invalid: bool,
}

impl Question {
    /// Creates a question with no validation and no skip rule.
    pub fn new(key: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            prompt: prompt.into(),
            validate: None,
            skip_if: None,
            escalate_invalid: false,
        }
    }

    /// Attaches a validation predicate; an answer it rejects aborts the
    /// form.
    pub fn validate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.validate = Some(Arc::new(predicate));
        self
    }

    /// Attaches a skip rule; when it returns `true` against the answers so
    /// far, the question is not asked.
    pub fn skip_if<F>(mut self, rule: F) -> Self
    where
        F: Fn(&Answers) -> bool + Send + Sync + 'static,
    {
        self.skip_if = Some(Arc::new(rule));
        self
    }

    /// Marks invalid answers to this question for escalation to the
    /// moderation alert sink before the form aborts.
    pub fn escalate_invalid(mut self) -> Self {
        self.escalate_invalid = true;
        self
    }

    /// Returns the answer key this question stores under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Evaluates the skip rule against the answers collected so far.
    pub fn should_skip(&self, answers: &Answers) -> bool {
        self.skip_if.as_ref().is_some_and(|skip| skip(answers))
    }

    /// Returns the prompt text.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

impl fmt::Debug for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Question")
            .field("key", &self.key)
            .field("has_validator", &self.validate.is_some())
            .field("has_skip_rule", &self.skip_if.is_some())
            .field("escalate_invalid", &self.escalate_invalid)
            .finish()
    }
}

// =============================================================================
// Answers
// =============================================================================

/// The ordered answer set produced by a completed form run.
///
/// Keys appear in script order; each question runs at most once, so keys
/// are unique. Discarded wholesale when a run aborts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    entries: Vec<(String, String)>,
}

impl Answers {
    /// Creates an empty answer set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the answer stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` if an answer is stored under `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Stores an answer under `key`, preserving insertion order.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Returns the number of stored answers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no answers are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the answers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

// =============================================================================
// FormEngine
// =============================================================================

/// Drives a form script to completion or abort.
pub struct FormEngine {
    reply_timeout: Duration,
    alerts: BoxedAlertSink,
}

impl FormEngine {
    /// Creates an engine with the given per-step reply timeout and no
    /// moderation sink.
    pub fn new(reply_timeout: Duration) -> Self {
        Self {
            reply_timeout,
            alerts: Arc::new(NullAlertSink),
        }
    }

    /// Attaches a moderation alert sink for escalating questions.
    pub fn with_alerts(mut self, alerts: BoxedAlertSink) -> Self {
        self.alerts = alerts;
        self
    }

    /// Runs `script` against the session's requester on `channel`.
    ///
    /// Returns `Some(answers)` when every question was answered (or
    /// skipped), `None` when the run was cancelled, timed out, or failed
    /// validation; the user has already been told which. Errors are
    /// platform failures only.
    pub async fn run(
        &self,
        script: &[Question],
        session: &SessionContext,
        channel: &dyn Channel,
    ) -> PlatformResult<Option<Answers>> {
        let filter = session.message_filter();
        let mut answers = Answers::new();

        for question in script {
            if question.should_skip(&answers) {
                debug!(key = %question.key, "Question skipped by its declared rule");
                continue;
            }

            channel.send(&question.prompt).await?;

            let content = match wait::await_reply(channel, &filter, self.reply_timeout).await? {
                Reply::Content(content) => content,
                Reply::Cancelled | Reply::NoResponse => {
                    channel.send(CANCELLED_NOTICE).await?;
                    return Ok(None);
                }
            };

            if let Some(validate) = &question.validate {
                if !validate(&content) {
                    if question.escalate_invalid {
                        self.alerts
                            .invalid_submission(&session.requester_tag, &content)
                            .await;
                    }
                    channel.send(INVALID_NOTICE).await?;
                    return Ok(None);
                }
            }

            answers.insert(question.key.clone(), content);
        }

        Ok(Some(answers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use banter_core::testing::FakeChannel;
    use banter_core::{ChannelId, MessageId, UserId};
    use parking_lot::Mutex;

    use crate::alert::AlertSink;
    use crate::wait::TIMED_OUT_NOTICE;

    const TIMEOUT: Duration = Duration::from_secs(60);

    /// Records every alert it receives.
    #[derive(Default)]
    struct CollectingAlerts {
        alerts: Mutex<Vec<(String, String)>>,
    }

    impl CollectingAlerts {
        fn received(&self) -> Vec<(String, String)> {
            self.alerts.lock().clone()
        }
    }

    #[async_trait]
    impl AlertSink for CollectingAlerts {
        async fn invalid_submission(&self, requester_tag: &str, raw_input: &str) {
            self.alerts
                .lock()
                .push((requester_tag.to_owned(), raw_input.to_owned()));
        }
    }

    fn session() -> SessionContext {
        SessionContext {
            requester: UserId::from("alice"),
            requester_tag: "@alice#0001".to_owned(),
            source_channel: ChannelId::from("general"),
            source_message: MessageId::from("m1"),
        }
    }

    /// The reference script: remote, location (skipped when remote is
    /// "yes"), compensation (validated, escalating).
    fn script(minimum: u64) -> Vec<Question> {
        vec![
            Question::new("remote", "Remote?"),
            Question::new("location", "Where?").skip_if(|answers| {
                answers
                    .get("remote")
                    .is_some_and(|v| v.eq_ignore_ascii_case("yes"))
            }),
            Question::new("compensation", "Pay?")
                .validate(move |input| {
                    input
                        .trim_matches('$')
                        .parse::<u64>()
                        .is_ok_and(|amount| amount >= minimum)
                })
                .escalate_invalid(),
        ]
    }

    async fn run(
        engine: &FormEngine,
        questions: &[Question],
        channel: &FakeChannel,
    ) -> Option<Answers> {
        engine.run(questions, &session(), channel).await.unwrap()
    }

    #[tokio::test]
    async fn remote_yes_skips_location() {
        let channel = FakeChannel::new("dm");
        channel.queue_reply("alice", "yes");
        channel.queue_reply("alice", "5000");

        let engine = FormEngine::new(TIMEOUT);
        let answers = run(&engine, &script(1000), &channel).await.unwrap();

        assert_eq!(answers.get("remote"), Some("yes"));
        assert_eq!(answers.get("compensation"), Some("5000"));
        assert!(!answers.contains_key("location"));
        assert_eq!(answers.len(), 2);
    }

    #[tokio::test]
    async fn remote_yes_is_case_insensitive() {
        let channel = FakeChannel::new("dm");
        channel.queue_reply("alice", "YES");
        channel.queue_reply("alice", "5000");

        let engine = FormEngine::new(TIMEOUT);
        let answers = run(&engine, &script(1000), &channel).await.unwrap();

        assert!(!answers.contains_key("location"));
    }

    #[tokio::test]
    async fn remote_no_asks_location() {
        let channel = FakeChannel::new("dm");
        channel.queue_reply("alice", "no");
        channel.queue_reply("alice", "Berlin");
        channel.queue_reply("alice", "5000");

        let engine = FormEngine::new(TIMEOUT);
        let answers = run(&engine, &script(1000), &channel).await.unwrap();

        assert_eq!(answers.get("location"), Some("Berlin"));
        assert_eq!(answers.len(), 3);
    }

    #[tokio::test]
    async fn cancel_aborts_the_whole_form() {
        let channel = FakeChannel::new("dm");
        channel.queue_reply("alice", "no");
        channel.queue_reply("alice", "Berlin");
        channel.queue_reply("alice", "cancel");

        let alerts = Arc::new(CollectingAlerts::default());
        let engine = FormEngine::new(TIMEOUT).with_alerts(alerts.clone());
        let outcome = run(&engine, &script(1000), &channel).await;

        assert!(outcome.is_none());
        assert!(alerts.received().is_empty());
        assert!(
            channel
                .sent()
                .contains(&CANCELLED_NOTICE.to_owned())
        );
    }

    #[tokio::test]
    async fn timeout_aborts_with_both_notices() {
        let channel = FakeChannel::new("dm");
        channel.queue_reply("alice", "no");
        // No further replies: the location question times out.

        let engine = FormEngine::new(TIMEOUT);
        let outcome = run(&engine, &script(1000), &channel).await;

        assert!(outcome.is_none());
        let sent = channel.sent();
        assert!(sent.contains(&TIMED_OUT_NOTICE.to_owned()));
        assert_eq!(sent.last(), Some(&CANCELLED_NOTICE.to_owned()));
    }

    #[tokio::test]
    async fn invalid_escalating_answer_fires_exactly_one_alert() {
        let channel = FakeChannel::new("dm");
        channel.queue_reply("alice", "no");
        channel.queue_reply("alice", "Berlin");
        channel.queue_reply("alice", "negotiable");

        let alerts = Arc::new(CollectingAlerts::default());
        let engine = FormEngine::new(TIMEOUT).with_alerts(alerts.clone());
        let outcome = run(&engine, &script(1000), &channel).await;

        assert!(outcome.is_none());
        assert_eq!(
            alerts.received(),
            vec![("@alice#0001".to_owned(), "negotiable".to_owned())]
        );
        assert_eq!(channel.sent().last(), Some(&INVALID_NOTICE.to_owned()));
    }

    #[tokio::test]
    async fn invalid_non_escalating_answer_stays_quiet() {
        let channel = FakeChannel::new("dm");
        channel.queue_reply("alice", "loud");

        let questions = vec![
            Question::new("volume", "How loud?").validate(|input| input == "quiet"),
        ];
        let alerts = Arc::new(CollectingAlerts::default());
        let engine = FormEngine::new(TIMEOUT).with_alerts(alerts.clone());
        let outcome = run(&engine, &questions, &channel).await;

        assert!(outcome.is_none());
        assert!(alerts.received().is_empty());
    }

    #[tokio::test]
    async fn answers_are_stored_trimmed_in_script_order() {
        let channel = FakeChannel::new("dm");
        channel.queue_reply("alice", "  no ");
        channel.queue_reply("alice", " Berlin");
        channel.queue_reply("alice", "5000 ");

        let engine = FormEngine::new(TIMEOUT);
        let answers = run(&engine, &script(1000), &channel).await.unwrap();

        let keys: Vec<&str> = answers.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["remote", "location", "compensation"]);
        assert_eq!(answers.get("remote"), Some("no"));
        assert_eq!(answers.get("location"), Some("Berlin"));
    }

    #[tokio::test]
    async fn replies_from_other_users_never_qualify() {
        let channel = FakeChannel::new("dm");
        channel.queue_reply("mallory", "yes");
        channel.queue_reply("alice", "no");
        channel.queue_reply("alice", "Berlin");
        channel.queue_reply("alice", "5000");

        let engine = FormEngine::new(TIMEOUT);
        let answers = run(&engine, &script(1000), &channel).await.unwrap();

        assert_eq!(answers.get("remote"), Some("no"));
    }
}
