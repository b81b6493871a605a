//! Tokenization.
//!
//! [`Tokenizer`] is the boundary to word and sentence segmentation. The
//! default [`RuleTokenizer`] splits sentences with abbreviation, initial and
//! decimal awareness, and splits words Treebank-style: punctuation, brackets
//! and quotes become their own tokens and contractions are detached
//! (`don't` → `do` `n't`).

use crate::dictionaries::abbreviations::{is_abbreviation, is_title};

/// Word and sentence segmentation. Must be deterministic for a given input.
pub trait Tokenizer: Send + Sync {
    /// Ordered word tokens of `text`, punctuation included.
    fn words(&self, text: &str) -> Vec<String>;

    /// Ordered sentences of `text`.
    fn sentences(&self, text: &str) -> Vec<String>;
}

/// Rule-based English tokenizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleTokenizer;

impl Tokenizer for RuleTokenizer {
    fn words(&self, text: &str) -> Vec<String> {
        tokenize_words(text)
    }

    fn sentences(&self, text: &str) -> Vec<String> {
        split_sentences(text)
    }
}

/// Tokens that carry no syllables and are excluded from word counts.
pub const NON_WORD_TOKENS: &[&str] = &[
    "", ",", ".", "!", "?", ":", ";", "[", "]", "(", ")", "{", "}", "$", "@", "%", "\"", "'",
    "`", "``", "''", "...", "-", "--", "#", "\u{201c}", "\u{201d}", "\u{2018}", "\u{2019}",
    "\u{2026}", "\u{2014}",
];

/// Whether `token` is punctuation that scoring ignores.
pub fn is_non_word(token: &str) -> bool {
    NON_WORD_TOKENS.contains(&token)
}

/// Whether `token` is a clitic detached from its host word (`n't`, `'s`, ...).
pub fn is_clitic(token: &str) -> bool {
    CONTRACTIONS.iter().any(|c| c.eq_ignore_ascii_case(token))
}

/// Characters peeled off the front of a whitespace-delimited chunk.
const OPENING: &[char] = &['"', '\'', '`', '(', '[', '{', '$', '\u{201c}', '\u{2018}'];

/// Characters peeled off the back of a whitespace-delimited chunk.
const CLOSING: &[char] = &[
    '.', ',', '!', '?', ':', ';', ')', ']', '}', '"', '\'', '%', '\u{201d}', '\u{2019}',
];

/// Clitic suffixes split from their host word.
const CONTRACTIONS: &[&str] = &["n't", "'s", "'re", "'ve", "'ll", "'d", "'m"];

/// Split text into word and punctuation tokens.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn tokenize_words(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for chunk in text.split_whitespace() {
        split_chunk(chunk, &mut tokens);
    }
    tokens
}

fn split_chunk(chunk: &str, out: &mut Vec<String>) {
    let mut rest = chunk;
    while let Some(ch) = rest.chars().next() {
        if !OPENING.contains(&ch) || rest.len() == ch.len_utf8() {
            break;
        }
        out.push(ch.to_string());
        rest = &rest[ch.len_utf8()..];
    }

    let mut trailing = Vec::new();
    let mut core = rest;
    loop {
        if core.ends_with("...") {
            if core.len() == 3 {
                break;
            }
            trailing.push("...".to_string());
            core = &core[..core.len() - 3];
            continue;
        }
        let Some(last) = core.chars().next_back() else {
            break;
        };
        if !CLOSING.contains(&last) || core.len() == last.len_utf8() {
            break;
        }
        if last == '.' && owns_period(core) {
            break;
        }
        trailing.push(last.to_string());
        core = &core[..core.len() - last.len_utf8()];
    }

    if !core.is_empty() {
        split_contraction(core, out);
    }
    out.extend(trailing.into_iter().rev());
}

/// Whether the final period of `word` belongs to the word (`Dr.`, `J.`, `U.S.`).
fn owns_period(word: &str) -> bool {
    let stem = &word[..word.len() - 1];
    if stem.is_empty() {
        return false;
    }
    is_title(stem) || is_initial(stem) || is_dotted_abbreviation(stem)
}

/// A single capital letter (`J` in `J. Smith`).
fn is_initial(stem: &str) -> bool {
    let mut chars = stem.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase())
}

/// Short alphabetic pieces joined by periods (`e.g`, `U.S`, `a.m`).
fn is_dotted_abbreviation(stem: &str) -> bool {
    stem.contains('.')
        && stem
            .split('.')
            .all(|p| !p.is_empty() && p.len() <= 3 && p.chars().all(char::is_alphabetic))
}

fn split_contraction(word: &str, out: &mut Vec<String>) {
    let lower = word.to_lowercase();
    for suffix in CONTRACTIONS {
        if lower.len() > suffix.len() && lower.ends_with(suffix) && lower.len() == word.len() {
            let cut = word.len() - suffix.len();
            out.push(word[..cut].to_string());
            out.push(word[cut..].to_string());
            return;
        }
    }
    out.push(word.to_string());
}

/// Split text into sentences.
///
/// A `.`, `!` or `?` ends a sentence when it is followed by whitespace and
/// the preceding word is not an abbreviation or initial. Periods are further
/// required to be followed by something other than a lowercase letter, and
/// an ellipsis never ends a sentence. Closing quotes and brackets directly
/// after the terminator stay with the sentence.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let (offset, ch) = chars[i];
        if !is_terminator(ch) {
            i += 1;
            continue;
        }

        // Consume the whole terminator run ("?!", "...") plus closers.
        let run_start = i;
        while i + 1 < chars.len() && is_terminator(chars[i + 1].1) {
            i += 1;
        }
        let run_len = i - run_start + 1;
        let last_terminator = chars[i].1;
        while i + 1 < chars.len() && is_closer(chars[i + 1].1) {
            i += 1;
        }
        let end = chars.get(i + 1).map_or(text.len(), |&(o, _)| o);

        let next = chars[i + 1..].iter().map(|&(_, c)| c).find(|c| !c.is_whitespace());
        let followed_by_space = chars.get(i + 1).is_none_or(|&(_, c)| c.is_whitespace());

        let boundary = match next {
            None => true,
            Some(_) if !followed_by_space => false,
            Some(_) if last_terminator != '.' => true,
            Some(_) if run_len >= 3 => false,
            Some(next) => {
                let word = word_before(&text[start..offset]);
                !(is_abbreviation(word) || is_initial(word) || is_dotted_abbreviation(word))
                    && !next.is_lowercase()
            }
        };

        if boundary {
            push_sentence(&text[start..end], &mut sentences);
            start = end;
        }
        i += 1;
    }

    if start < text.len() {
        push_sentence(&text[start..], &mut sentences);
    }
    sentences
}

fn push_sentence(raw: &str, sentences: &mut Vec<String>) {
    let sentence = raw.trim();
    if sentence.chars().any(char::is_alphanumeric) {
        sentences.push(sentence.to_string());
    }
}

const fn is_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

const fn is_closer(ch: char) -> bool {
    matches!(ch, '"' | '\'' | ')' | ']' | '\u{201d}' | '\u{2019}')
}

/// The last whitespace-delimited word of `prefix`, without leading openers.
fn word_before(prefix: &str) -> &str {
    prefix
        .split_whitespace()
        .next_back()
        .unwrap_or_default()
        .trim_start_matches(OPENING)
}

/// Split text into paragraphs (separated by blank lines).
pub fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line.trim_end());
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }
    paragraphs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_sentences() {
        let sentences = split_sentences("This is a sentence. This is another sentence.");
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0], "This is a sentence.");
        assert_eq!(sentences[1], "This is another sentence.");
    }

    #[test]
    fn abbreviations_not_split() {
        let sentences = split_sentences("Dr. Smith went to the store. He bought milk.");
        assert_eq!(sentences.len(), 2);
        assert!(sentences[0].contains("Dr. Smith"));
    }

    #[test]
    fn initials_not_split() {
        let sentences = split_sentences("The author J. Smith wrote it. Then he left.");
        assert_eq!(sentences.len(), 2);
    }

    #[test]
    fn decimal_numbers_not_split() {
        let sentences = split_sentences("The price is 3.14 dollars. That's cheap.");
        assert_eq!(sentences.len(), 2);
        assert!(sentences[0].contains("3.14"));
    }

    #[test]
    fn question_and_exclamation() {
        let sentences = split_sentences("Are you serious? I can't believe it! This is amazing.");
        assert_eq!(sentences.len(), 3);
    }

    #[test]
    fn closing_quote_stays_with_sentence() {
        let sentences = split_sentences("She said \"Stop!\" Then she left.");
        assert_eq!(sentences, vec!["She said \"Stop!\"", "Then she left."]);
    }

    #[test]
    fn ellipsis_does_not_split() {
        let sentences = split_sentences("Well... Maybe not.");
        assert_eq!(sentences.len(), 1);
    }

    #[test]
    fn short_sentences_survive() {
        assert_eq!(split_sentences("Hi."), vec!["Hi."]);
        assert_eq!(split_sentences("Hello World!"), vec!["Hello World!"]);
    }

    #[test]
    fn empty_input() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   ").is_empty());
        assert!(split_sentences("...").is_empty());
    }

    #[test]
    fn words_detach_punctuation() {
        assert_eq!(tokenize_words("Hello World!"), vec!["Hello", "World", "!"]);
        assert_eq!(
            tokenize_words("Join the Dark Side, we have home-made cookies."),
            vec![
                "Join", "the", "Dark", "Side", ",", "we", "have", "home-made", "cookies", "."
            ]
        );
    }

    #[test]
    fn words_split_contractions() {
        assert_eq!(tokenize_words("I don't know"), vec!["I", "do", "n't", "know"]);
        assert_eq!(tokenize_words("it's the poet's"), vec!["it", "'s", "the", "poet", "'s"]);
    }

    #[test]
    fn words_keep_abbreviation_periods() {
        assert_eq!(
            tokenize_words("Dr. Smith lives in the U.S. now."),
            vec!["Dr.", "Smith", "lives", "in", "the", "U.S.", "now", "."]
        );
    }

    #[test]
    fn words_split_quotes_and_brackets() {
        assert_eq!(
            tokenize_words("He said \"hi\" (twice)."),
            vec!["He", "said", "\"", "hi", "\"", "(", "twice", ")", "."]
        );
    }

    #[test]
    fn words_keep_numbers_whole() {
        assert_eq!(tokenize_words("Pay $3.50 now"), vec!["Pay", "$", "3.50", "now"]);
        assert_eq!(tokenize_words("wait..."), vec!["wait", "..."]);
    }

    #[test]
    fn non_word_tokens() {
        assert!(is_non_word("!"));
        assert!(is_non_word("..."));
        assert!(is_non_word("\u{201c}"));
        assert!(is_non_word("\u{2014}"));
        assert!(!is_non_word("n't"));
        assert!(!is_non_word("word"));
    }

    #[test]
    fn clitics_are_recognized() {
        assert!(is_clitic("n't"));
        assert!(is_clitic("'S"));
        assert!(!is_clitic("s"));
        assert!(!is_clitic("dog"));
    }

    #[test]
    fn split_paragraphs_basic() {
        let text = "First paragraph.\n\nSecond paragraph\ncontinues.\n\n\nThird.";
        let paras = split_paragraphs(text);
        assert_eq!(paras.len(), 3);
        assert_eq!(paras[1], "Second paragraph\ncontinues.");
    }
}
