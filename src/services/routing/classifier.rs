use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Classified purpose of an inbound text message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Joke,
    More,
    Help,
    Reset,
    Other,
}

/// Punctuation stripped before keyword matching
const PUNCTUATION: &[char] = &[
    '.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '?', '-', '_', '`',
    '~', '(', ')',
];

/// Tokens that count as a joke request ("jokes" matched accidentally in the
/// original through a truthy indexOf check; here it is deliberate)
static JOKE_WORDS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["joke", "jokes"].into_iter().collect());

/// Classify a message by keyword, priority joke > more > help > reset.
pub fn classify(text: &str) -> Intent {
    let cleaned = text
        .to_lowercase()
        .replace(PUNCTUATION, " ");
    let words: Vec<&str> = cleaned.split_whitespace().collect();

    if words.iter().any(|w| JOKE_WORDS.contains(w)) {
        Intent::Joke
    } else if words.contains(&"more") {
        Intent::More
    } else if words.contains(&"help") {
        Intent::Help
    } else if words.contains(&"reset") {
        Intent::Reset
    } else {
        Intent::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_plain_keywords() {
        assert_eq!(classify("joke"), Intent::Joke);
        assert_eq!(classify("more"), Intent::More);
        assert_eq!(classify("help"), Intent::Help);
        assert_eq!(classify("reset"), Intent::Reset);
        assert_eq!(classify("what's up"), Intent::Other);
    }

    #[test]
    fn classifies_full_sentences() {
        assert_eq!(classify("Can I get a joke?"), Intent::Joke);
        assert_eq!(classify("Give me MORE!"), Intent::More);
        assert_eq!(classify("I need some help here"), Intent::Help);
    }

    #[test]
    fn jokes_counts_as_joke() {
        assert_eq!(classify("tell me some jokes"), Intent::Joke);
    }

    #[test]
    fn punctuation_is_stripped() {
        assert_eq!(classify("joke!!!"), Intent::Joke);
        assert_eq!(classify("(more)"), Intent::More);
        assert_eq!(classify("#help;"), Intent::Help);
    }

    #[test]
    fn joke_beats_other_keywords() {
        assert_eq!(classify("help me find a joke"), Intent::Joke);
        assert_eq!(classify("more jokes please"), Intent::Joke);
    }

    #[test]
    fn more_beats_help_and_reset() {
        assert_eq!(classify("help, more!"), Intent::More);
        assert_eq!(classify("reset or more"), Intent::More);
    }

    #[test]
    fn substrings_do_not_match() {
        // "joker" is not "joke" once punctuation splitting is done properly
        assert_eq!(classify("the joker movie"), Intent::Other);
        assert_eq!(classify("smores"), Intent::Other);
    }

    #[test]
    fn empty_text_is_other() {
        assert_eq!(classify(""), Intent::Other);
        assert_eq!(classify("   "), Intent::Other);
    }
}
