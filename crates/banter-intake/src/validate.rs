//! Answer validation for the intake script.

/// Returns `true` if `input` names a compensation amount at or above
/// `minimum`.
///
/// Accepts plain amounts with an optional currency marker and thousands
/// separators (`5000`, `$5000`, `5,000$`). Anything non-numeric fails.
pub fn compensation(input: &str, minimum: u64) -> bool {
    parse_amount(input).is_some_and(|amount| amount >= minimum)
}

fn parse_amount(input: &str) -> Option<u64> {
    let digits: String = input
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ','))
        .collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
