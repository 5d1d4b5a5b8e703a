//! Tokenization shared by the detectors and the analyzer.
//!
//! Two token flavours are used:
//!
//! | Function          | Splits on                  | Keeps apostrophes | Used by            |
//! |-------------------|----------------------------|-------------------|--------------------|
//! | [`emotion_tokens`]| whitespace after cleaning  | yes (`i'm`)       | emotion, sentiment |
//! | [`word_tokens`]   | runs of word characters    | no (`i`, `m`)     | genre, complexity  |
//!
//! A word character is a letter, digit, or underscore. Everything is
//! lowercased before it leaves this module.

// ---------------------------------------------------------------------------
// Character classification
// ---------------------------------------------------------------------------

/// Character class used when cleaning text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    /// Letters, digits, underscore.
    Word,
    /// The apostrophe, kept inside contractions.
    Apostrophe,
    Blank,
    /// Anything else; replaced by a blank.
    Punctuation,
}

fn classify(ch: char) -> CharClass {
    if ch.is_alphanumeric() || ch == '_' {
        CharClass::Word
    } else if ch == '\'' {
        CharClass::Apostrophe
    } else if ch.is_whitespace() {
        CharClass::Blank
    } else {
        CharClass::Punctuation
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Collapse whitespace runs and replace punctuation (except apostrophes)
/// with spaces.
#[must_use]
pub fn clean(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_blank = false;
    for ch in text.trim().chars() {
        match classify(ch) {
            CharClass::Word | CharClass::Apostrophe => {
                if pending_blank && !out.is_empty() {
                    out.push(' ');
                }
                pending_blank = false;
                out.push(ch);
            }
            CharClass::Blank | CharClass::Punctuation => pending_blank = true,
        }
    }
    out
}

/// Lowercased whitespace tokens of the cleaned text.
#[must_use]
pub fn emotion_tokens(text: &str) -> Vec<String> {
    clean(text).split_whitespace().map(str::to_lowercase).collect()
}

/// Lowercased maximal runs of word characters.
#[must_use]
pub fn word_tokens(text: &str) -> Vec<String> {
    text.split(|ch: char| classify(ch) != CharClass::Word)
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Split on runs of `.`, `!`, `?`; trim and drop empty pieces.
#[must_use]
pub fn sentences(text: &str) -> Vec<String> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// `true` for empty or whitespace-only input.
#[must_use]
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn clean_strips_punctuation_keeps_apostrophes() {
        assert_eq!(clean("I'm so   excited!!  Really?"), "I'm so excited Really");
    }

    #[test]
    fn clean_collapses_newlines_and_tabs() {
        assert_eq!(clean("  a\n\tb  "), "a b");
    }

    #[test]
    fn clean_of_only_punctuation_is_empty() {
        assert_eq!(clean("?!... --"), "");
    }

    #[test]
    fn emotion_tokens_lowercase() {
        assert_eq!(emotion_tokens("Happy, HAPPY day"), vec!["happy", "happy", "day"]);
    }

    #[test]
    fn word_tokens_split_contractions() {
        assert_eq!(word_tokens("Let's go_now"), vec!["let", "s", "go_now"]);
    }

    #[test]
    fn word_tokens_unicode_letters() {
        assert_eq!(word_tokens("Café déjà-vu"), vec!["café", "déjà", "vu"]);
    }

    #[test]
    fn sentences_split_on_terminators() {
        assert_eq!(
            sentences("One. Two!! Three?  ...Four"),
            vec!["One", "Two", "Three", "Four"]
        );
    }

    #[test]
    fn sentences_of_blank_is_empty() {
        assert!(sentences("   ").is_empty());
        assert!(sentences("...").is_empty());
    }

    #[test]
    fn blank_detection() {
        assert!(is_blank(""));
        assert!(is_blank(" \n\t"));
        assert!(!is_blank(" a "));
    }
}
