//! The standard intake question script.

use banter_interact::Question;

use crate::validate;

/// Builds the standard job-post script.
///
/// Order matters: the `location` skip rule reads the `remote` answer, so
/// `remote` comes first. Compensation is the one validated question, and
/// the one whose invalid answers are escalated to moderation.
pub fn standard_script(minimal_compensation: u64) -> Vec<Question> {
    vec![
        Question::new(
            "remote",
            "Is this a remote position? Please answer with `yes` or `no`.",
        ),
        Question::new("location", "Where is the position located?").skip_if(|answers| {
            answers
                .get("remote")
                .is_some_and(|value| value.eq_ignore_ascii_case("yes"))
        }),
        Question::new(
            "description",
            "Please describe the position: responsibilities, stack, expectations.",
        ),
        Question::new(
            "compensation",
            format!(
                "What does the position pay? Amounts below ${minimal_compensation} are not accepted."
            ),
        )
        .validate(move |input| validate::compensation(input, minimal_compensation))
        .escalate_invalid(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use banter_interact::Answers;

    #[test]
    fn remote_precedes_location() {
        let script = standard_script(500);
        let remote = script.iter().position(|q| q.key() == "remote").unwrap();
        let location = script.iter().position(|q| q.key() == "location").unwrap();
        assert!(remote < location);
    }

    #[test]
    fn location_skip_rule_reads_the_remote_answer() {
        let script = standard_script(500);
        let location = script.iter().find(|q| q.key() == "location").unwrap();

        let mut yes = Answers::new();
        yes.insert("remote", "Yes");
        let mut no = Answers::new();
        no.insert("remote", "no");

        assert!(location.should_skip(&yes));
        assert!(!location.should_skip(&no));
        assert!(!location.should_skip(&Answers::new()));
    }

    #[test]
    fn compensation_is_the_only_validated_question() {
        let script = standard_script(500);
        assert_eq!(script.len(), 4);
        assert_eq!(script.last().unwrap().key(), "compensation");
    }
}
