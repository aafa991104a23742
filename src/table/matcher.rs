//! Text match predicate for the search controls.

use regex::Regex;
use tracing::warn;

/// Compiled match predicate for one refresh pass.
///
/// Substring mode uses plain containment, so the empty query matches
/// every candidate. Regex mode compiles the query once per refresh; a
/// malformed pattern degrades to matching nothing rather than failing
/// the refresh.
#[derive(Debug)]
pub enum TextMatcher {
    /// Plain substring containment.
    Substring(String),
    /// Compiled regular expression.
    Regex(Regex),
    /// Malformed regex; matches no candidate.
    MatchNothing,
}

impl TextMatcher {
    /// Build the predicate for the current query and regex toggle.
    pub fn new(query: &str, use_regex: bool) -> Self {
        if !use_regex {
            return TextMatcher::Substring(query.to_string());
        }
        match Regex::new(query) {
            Ok(re) => TextMatcher::Regex(re),
            Err(err) => {
                warn!(query, %err, "invalid regex in search box; matching nothing");
                TextMatcher::MatchNothing
            }
        }
    }

    /// Test one candidate string.
    pub fn is_match(&self, text: &str) -> bool {
        match self {
            TextMatcher::Substring(needle) => text.contains(needle.as_str()),
            TextMatcher::Regex(re) => re.is_match(text),
            TextMatcher::MatchNothing => false,
        }
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_mode_matches_containment() {
        let matcher = TextMatcher::new("ober_1xn", false);
        assert!(matcher.is_match("clobber_1xn:XOXO"));
        assert!(!matcher.is_match("nim:3 5"));
    }

    #[test]
    fn empty_substring_matches_everything() {
        let matcher = TextMatcher::new("", false);
        assert!(matcher.is_match(""));
        assert!(matcher.is_match("anything at all"));
    }

    #[test]
    fn regex_mode_compiles_and_matches() {
        let matcher = TextMatcher::new(r"^clobber_\d*1xn", true);
        assert!(matcher.is_match("clobber_1xn:XO"));
        assert!(!matcher.is_match("elephants:XO"));
    }

    #[test]
    fn regex_metacharacters_are_literal_in_substring_mode() {
        let matcher = TextMatcher::new(r"(COL0)", false);
        assert!(matcher.is_match("(COL0)autotests.test"));
        assert!(!matcher.is_match("autotests.test"));
    }

    #[test]
    fn malformed_regex_matches_nothing() {
        let matcher = TextMatcher::new("(unclosed", true);
        assert!(!matcher.is_match("(unclosed"));
        assert!(!matcher.is_match("anything"));
    }

    #[test]
    fn empty_regex_matches_everything() {
        let matcher = TextMatcher::new("", true);
        assert!(matcher.is_match("anything"));
    }
}
