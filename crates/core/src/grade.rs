use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Grade;

// A token boundary is text start/end or anything that is not a word character
// or a grade modifier, so "b+" is never read as "b" and "law" never yields "a".
static MODIFIED_GRADE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^\w+-])(a-|[bcd][+-])(?:$|[^\w+-])").expect("valid modified grade regex")
});

static PLAIN_GRADE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^\w+-])([a-e])(?:$|[^\w+-])").expect("valid plain grade regex"));

/// Finds the grade a message submits, if any.
///
/// Modified symbols (`A-`, `B+`, ...) anywhere in the message win over bare
/// letters, so "I got a B+" yields `B+` rather than the article "a".
pub fn extract_grade(text: &str) -> Option<Grade> {
    let lower = text.to_lowercase();

    [&*MODIFIED_GRADE, &*PLAIN_GRADE]
        .into_iter()
        .find_map(|pattern| first_capture(pattern, &lower))
        .and_then(|symbol| symbol.parse().ok())
}

fn first_capture<'a>(pattern: &Regex, text: &'a str) -> Option<&'a str> {
    pattern
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|token| token.as_str())
}
