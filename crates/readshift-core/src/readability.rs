//! Readability scoring using Flesch Reading Ease.
//!
//! Formula: `206.835 - 1.015 * (words/sentences) - 84.6 * (syllables/words)`
//!
//! Higher score = easier text. Plain English lands around 60-70; a score
//! above [`DEFAULT_MAX_PLAUSIBLE_SCORE`] cannot come from real prose and
//! points at a tokenization artifact.
//!
//! Text with no words or no sentences scores exactly
//! [`UNSCOREABLE_SENTINEL`] instead of failing, so batch callers can filter
//! it out. Because the sentinel lies above any plausible score, a single
//! `score > max` check removes both.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::syllables::PronunciationLookup;
use crate::text::{RuleTokenizer, Tokenizer, is_non_word};

/// Constant term of the formula.
pub const BASE_EASE: f64 = 206.835;

/// Penalty per word of average sentence length.
pub const SENTENCE_LENGTH_WEIGHT: f64 = 1.015;

/// Penalty per syllable of average word length.
pub const WORD_LENGTH_WEIGHT: f64 = 84.6;

/// Score reported for text with no words or no sentences.
pub const UNSCOREABLE_SENTINEL: f64 = 1000.0;

/// Highest score a one-word, one-syllable sentence can reach.
pub const DEFAULT_MAX_PLAUSIBLE_SCORE: f64 = 121.22;

/// Flesch Reading Ease from raw counts, with real-valued division.
///
/// Returns [`UNSCOREABLE_SENTINEL`] when `words` or `sentences` is zero.
pub fn flesch_reading_ease(words: usize, sentences: usize, syllables: usize) -> f64 {
    if words == 0 || sentences == 0 {
        return UNSCOREABLE_SENTINEL;
    }
    let words_per_sentence = words as f64 / sentences as f64;
    let syllables_per_word = syllables as f64 / words as f64;
    WORD_LENGTH_WEIGHT.mul_add(
        -syllables_per_word,
        SENTENCE_LENGTH_WEIGHT.mul_add(-words_per_sentence, BASE_EASE),
    )
}

/// Counts and score for one piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScoredText {
    /// Words, punctuation excluded.
    pub word_count: usize,
    /// Sentences detected.
    pub sentence_count: usize,
    /// Total syllables over all words.
    pub syllable_count: usize,
    /// Flesch Reading Ease, or the sentinel.
    pub score: f64,
}

/// How a score should be treated by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScoreStatus {
    /// A usable score.
    Ok,
    /// No words or no sentences; the score is the sentinel.
    Unscoreable,
    /// Above the plausibility threshold.
    Implausible,
}

impl ScoredText {
    /// Score counts directly.
    pub fn from_counts(word_count: usize, sentence_count: usize, syllable_count: usize) -> Self {
        Self {
            word_count,
            sentence_count,
            syllable_count,
            score: flesch_reading_ease(word_count, sentence_count, syllable_count),
        }
    }

    /// Whether the text had nothing to score.
    pub const fn is_unscoreable(&self) -> bool {
        self.word_count == 0 || self.sentence_count == 0
    }

    /// Classify against a plausibility threshold.
    pub fn status(&self, max_plausible_score: f64) -> ScoreStatus {
        if self.is_unscoreable() {
            ScoreStatus::Unscoreable
        } else if self.score > max_plausible_score {
            ScoreStatus::Implausible
        } else {
            ScoreStatus::Ok
        }
    }

    /// Whether a caller applying `max_plausible_score` should discard it.
    pub fn is_flagged(&self, max_plausible_score: f64) -> bool {
        self.status(max_plausible_score) != ScoreStatus::Ok
    }
}

/// A score with its classification, as reported to users.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReadabilityReport {
    /// Counts and raw score.
    #[serde(flatten)]
    pub scored: ScoredText,
    /// Threshold the status was computed against.
    pub max_plausible_score: f64,
    /// Classification of the score.
    pub status: ScoreStatus,
}

impl ReadabilityReport {
    /// Classify `scored` against `max_plausible_score`.
    pub fn new(scored: ScoredText, max_plausible_score: f64) -> Self {
        Self {
            status: scored.status(max_plausible_score),
            scored,
            max_plausible_score,
        }
    }
}

/// Computes Flesch Reading Ease using a tokenizer and a syllable lookup.
#[derive(Clone)]
pub struct ReadabilityScorer {
    tokenizer: Arc<dyn Tokenizer>,
    lookup: PronunciationLookup,
}

impl std::fmt::Debug for ReadabilityScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadabilityScorer")
            .field("lookup", &self.lookup)
            .finish_non_exhaustive()
    }
}

impl Default for ReadabilityScorer {
    /// Rule tokenizer with the hyphenation heuristic only.
    fn default() -> Self {
        Self::new(Arc::new(RuleTokenizer), PronunciationLookup::heuristic())
    }
}

impl ReadabilityScorer {
    /// Build a scorer from its collaborators.
    pub fn new(tokenizer: Arc<dyn Tokenizer>, lookup: PronunciationLookup) -> Self {
        Self { tokenizer, lookup }
    }

    /// Count words, sentences and syllables of `text` and score it.
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub fn analyze(&self, text: &str) -> ScoredText {
        let sentence_count = self.tokenizer.sentences(text).len();
        let words: Vec<String> = self
            .tokenizer
            .words(text)
            .into_iter()
            .filter(|w| !is_non_word(w))
            .collect();
        let syllable_count = words.iter().map(|w| self.lookup.syllable_count(w)).sum();

        ScoredText::from_counts(words.len(), sentence_count, syllable_count)
    }

    /// Flesch Reading Ease of `text`.
    pub fn score(&self, text: &str) -> f64 {
        self.analyze(text).score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syllables::PronouncingDictionary;

    fn scorer() -> ReadabilityScorer {
        let dict: PronouncingDictionary = "\
HELLO  HH AH0 L OW1
HELLO(2)  HH EH0 L OW1
WORLD  W ER1 L D
THE  DH AH0
CAT  K AE1 T
SAT  S AE1 T
"
        .parse()
        .unwrap();
        ReadabilityScorer::new(
            Arc::new(RuleTokenizer),
            PronunciationLookup::new(Arc::new(dict)),
        )
    }

    #[test]
    fn formula_matches_published_coefficients() {
        // 2 words, 1 sentence, 3 syllables: 206.835 - 2.03 - 126.9
        assert!((flesch_reading_ease(2, 1, 3) - 77.905).abs() < 1e-9);
        assert!((flesch_reading_ease(1, 1, 1) - DEFAULT_MAX_PLAUSIBLE_SCORE).abs() < 1e-9);
    }

    #[test]
    fn division_is_real_valued() {
        // 3 words / 2 sentences must not truncate to 1.
        let expected = 206.835 - 1.015 * 1.5 - 84.6 * (4.0 / 3.0);
        assert!((flesch_reading_ease(3, 2, 4) - expected).abs() < 1e-9);
    }

    #[test]
    fn degenerate_counts_return_sentinel() {
        assert_eq!(flesch_reading_ease(0, 1, 0), UNSCOREABLE_SENTINEL);
        assert_eq!(flesch_reading_ease(5, 0, 7), UNSCOREABLE_SENTINEL);
        assert_eq!(flesch_reading_ease(0, 0, 0), UNSCOREABLE_SENTINEL);
    }

    #[test]
    fn hello_world() {
        let scored = scorer().analyze("Hello World!");
        assert_eq!(scored.word_count, 2);
        assert_eq!(scored.sentence_count, 1);
        assert_eq!(scored.syllable_count, 3);
        assert!((scored.score - 77.905).abs() < 1e-9);
    }

    #[test]
    fn empty_text_scores_sentinel_exactly() {
        let scored = scorer().analyze("");
        assert_eq!(scored.score, 1000.0);
        assert_eq!(scored.status(DEFAULT_MAX_PLAUSIBLE_SCORE), ScoreStatus::Unscoreable);
        assert_eq!(scorer().score("?!"), UNSCOREABLE_SENTINEL);
    }

    #[test]
    fn punctuation_is_not_counted() {
        let scored = scorer().analyze("The cat sat, \"the cat\" (sat).");
        assert_eq!(scored.word_count, 6);
        assert_eq!(scored.syllable_count, 6);
    }

    #[test]
    fn typographic_quotes_score_like_straight_quotes() {
        let straight = scorer().analyze("The cat sat, \"the cat.\"");
        let curly = scorer().analyze("The cat sat, \u{201c}the cat.\u{201d}");
        assert_eq!(straight.word_count, 5);
        assert_eq!(curly, straight);

        let single = scorer().analyze("The cat sat, \u{2018}the cat.\u{2019}");
        assert_eq!(single, straight);
    }

    #[test]
    fn standalone_dashes_and_ellipses_are_not_words() {
        let scored = scorer().analyze("The cat sat \u{2014} the cat sat \u{2026} the cat.");
        assert_eq!(scored.word_count, 8);
        assert_eq!(scored.syllable_count, 8);
    }

    #[test]
    fn status_classification() {
        let ok = ScoredText::from_counts(10, 1, 14);
        assert_eq!(ok.status(DEFAULT_MAX_PLAUSIBLE_SCORE), ScoreStatus::Ok);
        assert!(!ok.is_flagged(DEFAULT_MAX_PLAUSIBLE_SCORE));

        let implausible = ScoredText {
            word_count: 1,
            sentence_count: 2,
            syllable_count: 1,
            score: flesch_reading_ease(1, 2, 1),
        };
        assert_eq!(
            implausible.status(DEFAULT_MAX_PLAUSIBLE_SCORE),
            ScoreStatus::Implausible
        );
        assert!(ScoredText::from_counts(0, 0, 0).is_flagged(f64::MAX));
    }

    #[test]
    fn report_carries_status() {
        let report = ReadabilityReport::new(ScoredText::from_counts(2, 1, 3), 50.0);
        assert_eq!(report.status, ScoreStatus::Implausible);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["word_count"], 2);
        assert_eq!(json["status"], "implausible");
    }

    #[test]
    fn default_scorer_uses_heuristic() {
        let scored = ReadabilityScorer::default().analyze("The cat sat on the mat.");
        assert_eq!(scored.word_count, 6);
        assert_eq!(scored.syllable_count, 6);
        assert!(scored.score > 100.0);
    }
}
