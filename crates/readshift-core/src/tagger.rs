//! Part-of-speech tagging.
//!
//! [`PosTagger`] assigns one Penn Treebank tag per token. The default
//! [`HeuristicTagger`] combines a closed-class lexicon, irregular verb
//! forms, capitalization, suffix rules and the previous token's tag. It is
//! deliberately conservative about proper nouns: a capitalized word is only
//! tagged `NNP` when it does not open a sentence.

use std::sync::LazyLock;

use regex::Regex;

use crate::dictionaries::closed_class::{closed_class_tag, introduces_participle};
use crate::dictionaries::irregular_verbs::{
    is_irregular_base, is_irregular_participle, is_irregular_past,
};

/// Assigns part-of-speech tags to an ordered token sequence.
pub trait PosTagger: Send + Sync {
    /// One `(word, tag)` pair per input word, same order and length.
    fn tag(&self, words: &[String]) -> Vec<(String, String)>;
}

/// Rule-based Penn Treebank tagger for English.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTagger;

/// Cardinal numbers: `42`, `3.14`, `1,000`, `-7`, `.5`.
static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?(\d+([.,]\d+)*|\.\d+)$").expect("valid regex"));

/// Words ending in `-ly` that are not adverbs.
const LY_NON_ADVERBS: &[(&str, &str)] = &[
    ("family", "NN"),
    ("supply", "NN"),
    ("reply", "NN"),
    ("assembly", "NN"),
    ("ally", "NN"),
    ("belly", "NN"),
    ("rally", "NN"),
    ("apply", "VB"),
    ("fly", "VB"),
    ("rely", "VB"),
    ("likely", "JJ"),
    ("friendly", "JJ"),
    ("lovely", "JJ"),
    ("lonely", "JJ"),
    ("ugly", "JJ"),
    ("holy", "JJ"),
    ("silly", "JJ"),
    ("daily", "JJ"),
    ("early", "JJ"),
];

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "ical", "less", "ish", "ary", "ic", "ent", "ant",
];

const NOUN_SUFFIXES: &[&str] = &[
    "tion", "sion", "ment", "ness", "ity", "ship", "ism", "ist", "ance", "ence", "hood", "dom",
    "ure", "age", "er", "or",
];

impl PosTagger for HeuristicTagger {
    #[tracing::instrument(skip_all, fields(tokens = words.len()))]
    fn tag(&self, words: &[String]) -> Vec<(String, String)> {
        let mut tagged: Vec<(String, String)> = Vec::with_capacity(words.len());
        let mut open_double_quote = false;

        for (i, word) in words.iter().enumerate() {
            let prev_word = i.checked_sub(1).map(|j| words[j].as_str());
            let prev_tag = tagged.last().map(|(_, t)| t.as_str());
            let tag = match word.as_str() {
                "\"" => {
                    open_double_quote = !open_double_quote;
                    let tag = if open_double_quote { "``" } else { "''" };
                    tag.to_string()
                }
                w => tag_word(w, prev_word, prev_tag).to_string(),
            };
            tagged.push((word.clone(), tag));
        }

        tagged
    }
}

fn punctuation_tag(word: &str) -> Option<&'static str> {
    Some(match word {
        "." | "!" | "?" => ".",
        "," => ",",
        ":" | ";" | "..." | "-" | "--" => ":",
        "(" | "[" | "{" => "(",
        ")" | "]" | "}" => ")",
        "``" | "`" | "\u{201c}" | "\u{2018}" => "``",
        "''" | "'" | "\u{201d}" | "\u{2019}" => "''",
        "$" => "$",
        "#" => "#",
        "%" => "NN",
        _ => return None,
    })
}

/// Whether the token at this position opens a sentence.
fn at_sentence_start(prev_tag: Option<&str>) -> bool {
    matches!(prev_tag, None | Some("." | "``" | ":"))
}

fn tag_word(word: &str, prev_word: Option<&str>, prev_tag: Option<&str>) -> &'static str {
    if let Some(tag) = punctuation_tag(word) {
        return tag;
    }
    if NUMBER.is_match(word) {
        return "CD";
    }
    if let Some(tag) = clitic_tag(word, prev_tag) {
        return tag;
    }

    let lower = word.to_lowercase();
    if let Some(tag) = closed_class_tag(&lower) {
        return tag;
    }

    let capitalized = word.chars().next().is_some_and(char::is_uppercase);
    if capitalized && !at_sentence_start(prev_tag) {
        return if lower.len() > 3 && lower.ends_with('s') && !lower.ends_with("ss") {
            "NNPS"
        } else {
            "NNP"
        };
    }

    let after_participle_aux = prev_word.is_some_and(introduces_participle);
    let after_determiner = matches!(prev_tag, Some("DT" | "PRP$" | "JJ" | "CD" | "POS"));

    if matches!(prev_tag, Some("TO" | "MD")) {
        return "VB";
    }
    if is_irregular_participle(&lower) && (after_participle_aux || !is_irregular_past(&lower)) {
        return if after_participle_aux { "VBN" } else { "VBD" };
    }
    if is_irregular_past(&lower) {
        return "VBD";
    }
    suffix_tag(&lower, prev_tag, after_participle_aux, after_determiner)
}

/// Tags for detached clitics (`n't`, `'s`, `'ll`, ...).
fn clitic_tag(word: &str, prev_tag: Option<&str>) -> Option<&'static str> {
    Some(match word.to_lowercase().as_str() {
        "n't" => "RB",
        "'s" if matches!(prev_tag, Some("PRP" | "EX" | "WP" | "DT")) => "VBZ",
        "'s" => "POS",
        "'re" | "'ve" | "'m" => "VBP",
        "'ll" | "'d" => "MD",
        _ => return None,
    })
}

fn suffix_tag(
    lower: &str,
    prev_tag: Option<&str>,
    after_participle_aux: bool,
    after_determiner: bool,
) -> &'static str {
    let len = lower.chars().count();

    if let Some(&(_, tag)) = LY_NON_ADVERBS.iter().find(|(w, _)| *w == lower) {
        return tag;
    }
    if len > 4 && lower.ends_with("ly") {
        return "RB";
    }
    if len > 4 && lower.ends_with("ing") {
        return if after_determiner { "NN" } else { "VBG" };
    }
    if len > 3 && lower.ends_with("ed") {
        return match (after_participle_aux, after_determiner) {
            (true, _) => "VBN",
            (false, true) => "JJ",
            (false, false) => "VBD",
        };
    }
    if len > 4 && lower.ends_with("est") {
        return "JJS";
    }
    if ADJECTIVE_SUFFIXES.iter().any(|s| len > s.len() + 2 && lower.ends_with(s)) {
        return "JJ";
    }

    let plural = len > 3
        && lower.ends_with('s')
        && !lower.ends_with("ss")
        && !lower.ends_with("us")
        && !lower.ends_with("is");

    if NOUN_SUFFIXES.iter().any(|s| len > s.len() + 2 && lower.ends_with(s))
        || (plural && NOUN_SUFFIXES.iter().any(|s| lower[..lower.len() - 1].ends_with(s)))
    {
        return if plural { "NNS" } else { "NN" };
    }

    match prev_tag {
        Some("PRP") if plural => "VBZ",
        Some("PRP" | "NNS" | "WDT" | "WP") if is_irregular_base(lower) => "VBP",
        _ if plural => "NNS",
        _ => "NN",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(text: &str) -> Vec<String> {
        let words = crate::text::tokenize_words(text);
        HeuristicTagger
            .tag(&words)
            .into_iter()
            .map(|(_, t)| t)
            .collect()
    }

    #[test]
    fn output_matches_input_length_and_order() {
        let words: Vec<String> = ["The", "cat", "sat", "."].map(String::from).to_vec();
        let tagged = HeuristicTagger.tag(&words);
        assert_eq!(tagged.len(), 4);
        assert_eq!(tagged[1].0, "cat");
    }

    #[test]
    fn function_words_and_punctuation() {
        assert_eq!(tags("The dog ran ."), vec!["DT", "NN", "VBD", "."]);
        assert_eq!(tags("to eat , quickly"), vec!["TO", "VB", ",", "RB"]);
    }

    #[test]
    fn proper_nouns_need_mid_sentence_capital() {
        assert_eq!(tags("We met Alice"), vec!["PRP", "VBD", "NNP"]);
        assert_eq!(tags("Cookies are good"), vec!["NNS", "VBP", "NN"]);
        assert_eq!(tags("the Smiths"), vec!["DT", "NNPS"]);
    }

    #[test]
    fn participles_after_auxiliaries() {
        assert_eq!(tags("it was written"), vec!["PRP", "VBD", "VBN"]);
        assert_eq!(tags("she wrote"), vec!["PRP", "VBD"]);
        assert_eq!(tags("they have walked"), vec!["PRP", "VBP", "VBN"]);
        assert_eq!(tags("the walked"), vec!["DT", "JJ"]);
    }

    #[test]
    fn suffix_rules() {
        assert_eq!(tags("happiness"), vec!["NN"]);
        assert_eq!(tags("dangerous"), vec!["JJ"]);
        assert_eq!(tags("running"), vec!["VBG"]);
        assert_eq!(tags("the building"), vec!["DT", "NN"]);
        assert_eq!(tags("nations"), vec!["NNS"]);
        assert_eq!(tags("finest"), vec!["JJS"]);
    }

    #[test]
    fn numbers_and_clitics() {
        assert_eq!(tags("3.14"), vec!["CD"]);
        assert_eq!(tags("I do n't"), vec!["PRP", "VBP", "RB"]);
        assert_eq!(tags("it 's"), vec!["PRP", "VBZ"]);
        assert_eq!(tags("poet 's"), vec!["NN", "POS"]);
    }

    #[test]
    fn double_quotes_alternate() {
        assert_eq!(tags("\" hi \""), vec!["``", "UH", "''"]);
    }
}
