//! Token stream reassembly.
//!
//! [`join`] is the inverse of word tokenization for display purposes: tokens
//! are separated by one space, except that closing punctuation and clitics
//! attach to the token before them and opening brackets and quotes attach to
//! the token after them. It never re-tokenizes or re-tags.

use std::borrow::Cow;

/// One slot of an output stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A token passed through or replaced by a single word.
    Word(String),
    /// A multi-word replacement, expanded in place.
    Phrase(Vec<String>),
}

impl Segment {
    fn text(&self) -> Cow<'_, str> {
        match self {
            Self::Word(word) => Cow::Borrowed(word),
            Self::Phrase(words) => Cow::Owned(words.join(" ")),
        }
    }
}

impl From<&str> for Segment {
    fn from(word: &str) -> Self {
        Self::Word(word.to_string())
    }
}

/// Tokens written without a space before them.
const ATTACH_LEFT: &[&str] = &[
    ".", ",", "!", "?", ":", ";", ")", "]", "}", "''", "'", "%", "...", "\u{201d}", "\u{2019}",
    "n't", "'s", "'re", "'ve", "'ll", "'d", "'m",
];

/// Tokens written without a space after them.
const ATTACH_RIGHT: &[&str] = &["(", "[", "{", "``", "`", "$", "\u{201c}", "\u{2018}"];

fn attaches_left(token: &str) -> bool {
    ATTACH_LEFT.contains(&token) || ATTACH_LEFT.contains(&token.to_lowercase().as_str())
}

/// Join segments into display text.
pub fn join(segments: &[Segment]) -> String {
    let mut out = String::new();
    let mut glue_next = false;
    let mut double_quote_open = false;

    for segment in segments {
        let text = segment.text();
        if text.is_empty() {
            continue;
        }

        let (space_before, space_after) = match segment {
            Segment::Word(word) if word == "\"" => {
                double_quote_open = !double_quote_open;
                (double_quote_open, !double_quote_open)
            }
            Segment::Word(word) => (!attaches_left(word), !ATTACH_RIGHT.contains(&word.as_str())),
            Segment::Phrase(_) => (true, true),
        };

        if !out.is_empty() && space_before && !glue_next {
            out.push(' ');
        }
        out.push_str(&text);
        glue_next = !space_after;
    }
    out
}

/// Join plain tokens.
pub fn join_words<S: AsRef<str>>(words: &[S]) -> String {
    let segments: Vec<Segment> = words.iter().map(|w| Segment::from(w.as_ref())).collect();
    join(&segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::tokenize_words;

    fn roundtrip(text: &str) -> String {
        join_words(&tokenize_words(text))
    }

    #[test]
    fn punctuation_attaches_left() {
        assert_eq!(join_words(&["Hello", "World", "!"]), "Hello World!");
        assert_eq!(join_words(&["a", ",", "b", "."]), "a, b.");
    }

    #[test]
    fn brackets_and_quotes() {
        assert_eq!(
            join_words(&["He", "said", "\"", "hi", "\"", "(", "twice", ")", "."]),
            "He said \"hi\" (twice)."
        );
        assert_eq!(join_words(&["``", "Go", "''", "now"]), "``Go'' now");
    }

    #[test]
    fn clitics_reattach() {
        assert_eq!(join_words(&["I", "do", "n't", "know"]), "I don't know");
        assert_eq!(join_words(&["the", "poet", "'s", "pen"]), "the poet's pen");
    }

    #[test]
    fn phrases_expand_in_place() {
        let segments = vec![
            Segment::from("a"),
            Segment::Phrase(vec!["domestic".into(), "animal".into()]),
            Segment::from("."),
        ];
        assert_eq!(join(&segments), "a domestic animal.");
    }

    #[test]
    fn empty_segments_are_skipped() {
        assert_eq!(join_words(&["a", "", "b"]), "a b");
        assert_eq!(join(&[]), "");
    }

    #[test]
    fn unmodified_stream_reproduces_text() {
        for text in [
            "Hello World!",
            "Join the Dark Side, we have home-made cookies.",
            "Dr. Smith lives in the U.S. now.",
            "He said \"hi\" (twice).",
            "I don't know, it's the poet's pen.",
            "Pay $3.50 now... or 10% later?",
        ] {
            assert_eq!(roundtrip(text), text);
        }
    }

    #[test]
    fn join_is_idempotent_through_tokenization() {
        let once = roundtrip("Wait  ,  what ?");
        assert_eq!(once, "Wait, what?");
        assert_eq!(roundtrip(&once), once);
    }
}
