//! Text shaping for published posts and alerts.

use banter_interact::Answers;
use banter_core::{ChannelId, MessageId};

/// Capitalizes the first character and lowercases the rest.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Wraps `value` in a fenced code block.
pub fn code_block(value: &str) -> String {
    format!("```\n{value}\n```")
}

/// Builds a markdown link, escaping closing parentheses in the URL.
pub fn markdown_link(title: &str, url: &str) -> String {
    format!("[{title}]({})", url.replace(')', "\\)"))
}

/// Builds the permalink for a message in a community channel.
pub fn message_permalink(community_id: &str, channel_id: &ChannelId, message_id: &MessageId) -> String {
    format!("https://discordapp.com/channels/{community_id}/{channel_id}/{message_id}")
}

/// Returns today's date in long form, e.g. `Tuesday, August 4, 2026`.
pub fn current_date() -> String {
    chrono::Utc::now().format("%A, %B %-d, %Y").to_string()
}

/// One rendered field of a published post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostField {
    /// Display name (capitalized answer key).
    pub name: String,
    /// Display value, already code-blocked.
    pub value: String,
}

/// Renders the answer set into display fields, in script order.
///
/// Normalization:
/// - a bare compensation amount gets a `$` marker appended,
/// - a literal "no" outside the `remote` field reads as "Not provided."
pub fn answer_fields(answers: &Answers) -> Vec<PostField> {
    answers
        .iter()
        .map(|(key, value)| {
            let mut value = value.to_owned();
            if key == "compensation" && !value.contains('$') {
                value.push('$');
            }
            if key != "remote" && value == "no" {
                value = "Not provided.".to_owned();
            }
            PostField {
                name: capitalize(key),
                value: code_block(&value),
            }
        })
        .collect()
}
