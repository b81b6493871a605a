//! Lexical augmentation.
//!
//! For every eligible token, [`select`] reduces the candidate pool to the
//! syllable-minimal and syllable-maximal replacement, keeping the original
//! whenever no candidate strictly improves on it. [`Augmenter`] runs the
//! whole pipeline on a text and reassembles the simple and complex
//! rewrites.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::candidates::{CandidateFinder, CandidateTerm, is_editable};
use crate::reassemble::{Segment, join};
use crate::syllables::PronunciationLookup;
use crate::tagger::PosTagger;
use crate::text::{Tokenizer, is_clitic, is_non_word};

/// A tagged token at a fixed position of the original tokenization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Token {
    /// Position in the token stream.
    pub index: usize,
    /// The word as written.
    pub surface: String,
    /// Penn Treebank tag.
    pub pos_tag: String,
}

impl Token {
    /// Whether the token may be substituted at all.
    pub fn is_eligible(&self) -> bool {
        is_editable(&self.pos_tag) && !is_non_word(&self.surface) && !is_clitic(&self.surface)
    }
}

/// Outcome for one eligible token.
///
/// `None` in a slot means no candidate strictly improves on the original in
/// that direction, so the original stays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AugmentationDecision {
    /// The token being decided.
    pub original: Token,
    /// Syllables of the original word.
    pub original_syllables: usize,
    /// Fewest-syllable replacement, if it has fewer than the original.
    pub simplest: Option<CandidateTerm>,
    /// Most-syllable replacement, if it has more than the original.
    pub most_complex: Option<CandidateTerm>,
}

impl AugmentationDecision {
    /// The simple-direction term, falling back to the original word.
    pub fn simplest_or_original(&self) -> CandidateTerm {
        self.simplest.clone().unwrap_or_else(|| self.original_term())
    }

    /// The complex-direction term, falling back to the original word.
    pub fn most_complex_or_original(&self) -> CandidateTerm {
        self.most_complex
            .clone()
            .unwrap_or_else(|| self.original_term())
    }

    /// Whether either direction replaces the original.
    pub const fn is_changed(&self) -> bool {
        self.simplest.is_some() || self.most_complex.is_some()
    }

    fn original_term(&self) -> CandidateTerm {
        CandidateTerm::word(self.original.surface.clone(), self.original_syllables)
    }
}

/// Pick the extremal candidates for `token`.
///
/// Candidates are ordered by syllable count with a stable sort, so ties
/// resolve to the earliest candidate in enumeration order. A token that is
/// ineligible keeps its original in both directions, and a zero-syllable
/// original is never simplified.
pub fn select(
    token: Token,
    original_syllables: usize,
    mut candidates: Vec<CandidateTerm>,
) -> AugmentationDecision {
    let mut decision = AugmentationDecision {
        original: token,
        original_syllables,
        simplest: None,
        most_complex: None,
    };
    if !decision.original.is_eligible() || candidates.is_empty() {
        return decision;
    }

    candidates.sort_by_key(|c| c.syllable_count);
    let (Some(min), Some(max)) = (
        candidates.first().map(|c| c.syllable_count),
        candidates.last().map(|c| c.syllable_count),
    ) else {
        return decision;
    };

    if original_syllables > 0 && min < original_syllables {
        decision.simplest = candidates.first().cloned();
    }
    if max > original_syllables {
        decision.most_complex = candidates.iter().find(|c| c.syllable_count == max).cloned();
    }
    decision
}

/// Result of augmenting one text.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Augmentation {
    /// Every token of the input, in order.
    pub tokens: Vec<Token>,
    /// One decision per eligible token.
    pub decisions: Vec<AugmentationDecision>,
    /// The text with each eligible word swapped for its simplest candidate.
    pub simple: String,
    /// The text with each eligible word swapped for its most complex candidate.
    pub complex: String,
}

impl Augmentation {
    /// Number of tokens replaced in the simple rewrite.
    pub fn simplified_count(&self) -> usize {
        self.decisions.iter().filter(|d| d.simplest.is_some()).count()
    }

    /// Number of tokens replaced in the complex rewrite.
    pub fn complexified_count(&self) -> usize {
        self.decisions
            .iter()
            .filter(|d| d.most_complex.is_some())
            .count()
    }
}

/// Runs tokenization, tagging, candidate search, selection and reassembly.
#[derive(Clone)]
pub struct Augmenter {
    tokenizer: Arc<dyn Tokenizer>,
    tagger: Arc<dyn PosTagger>,
    finder: CandidateFinder,
    preserve_case: bool,
}

impl std::fmt::Debug for Augmenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Augmenter")
            .field("finder", &self.finder)
            .field("preserve_case", &self.preserve_case)
            .finish_non_exhaustive()
    }
}

impl Augmenter {
    /// Compose an augmenter from its collaborators.
    pub fn new(
        tokenizer: Arc<dyn Tokenizer>,
        tagger: Arc<dyn PosTagger>,
        finder: CandidateFinder,
    ) -> Self {
        Self {
            tokenizer,
            tagger,
            finder,
            preserve_case: true,
        }
    }

    /// Capitalize replacements of capitalized words.
    pub const fn with_preserve_case(mut self, enabled: bool) -> Self {
        self.preserve_case = enabled;
        self
    }

    /// The syllable lookup shared with the candidate finder.
    pub const fn lookup(&self) -> &PronunciationLookup {
        self.finder.lookup()
    }

    /// Tokenize and tag `text`.
    pub fn tokens(&self, text: &str) -> Vec<Token> {
        let words = self.tokenizer.words(text);
        self.tagger
            .tag(&words)
            .into_iter()
            .enumerate()
            .map(|(index, (surface, pos_tag))| Token {
                index,
                surface,
                pos_tag,
            })
            .collect()
    }

    /// Decide the replacements for one token.
    pub fn decide(&self, token: &Token) -> AugmentationDecision {
        let original_syllables = self.lookup().syllable_count(&token.surface);
        let candidates = if token.is_eligible() {
            self.finder.candidates(&token.surface, &token.pos_tag)
        } else {
            Vec::new()
        };
        select(token.clone(), original_syllables, candidates)
    }

    /// Produce the simple and complex rewrites of `text`.
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub fn augment(&self, text: &str) -> Augmentation {
        let tokens = self.tokens(text);
        let mut decisions = Vec::new();
        let mut simple = Vec::with_capacity(tokens.len());
        let mut complex = Vec::with_capacity(tokens.len());

        for token in &tokens {
            if !token.is_eligible() {
                simple.push(Segment::Word(token.surface.clone()));
                complex.push(Segment::Word(token.surface.clone()));
                continue;
            }
            let decision = self.decide(token);
            simple.push(self.segment(&token.surface, decision.simplest.as_ref()));
            complex.push(self.segment(&token.surface, decision.most_complex.as_ref()));
            decisions.push(decision);
        }

        let augmentation = Augmentation {
            simple: join(&simple),
            complex: join(&complex),
            tokens,
            decisions,
        };
        tracing::debug!(
            eligible = augmentation.decisions.len(),
            simplified = augmentation.simplified_count(),
            complexified = augmentation.complexified_count(),
            "augmented text"
        );
        augmentation
    }

    fn segment(&self, original: &str, replacement: Option<&CandidateTerm>) -> Segment {
        let Some(term) = replacement else {
            return Segment::Word(original.to_string());
        };
        let mut parts = term.parts.clone();
        if self.preserve_case
            && original.chars().next().is_some_and(char::is_uppercase)
            && let Some(first) = parts.first_mut()
        {
            *first = capitalize(first);
        }
        if parts.len() == 1 {
            Segment::Word(parts.remove(0))
        } else {
            Segment::Phrase(parts)
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
