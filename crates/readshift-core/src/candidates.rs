//! Substitution candidates.
//!
//! [`CandidateFinder`] turns an eligible word into the lemma names of related
//! synsets and annotates each one with a syllable cost. Annotation is a
//! separate pass ([`annotate`]) so the multi-word rule can be tested on its
//! own: a lemma such as `domestic_animal` is split into its words and costs
//! the syllables of its hardest word, not the total.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::syllables::PronunciationLookup;
use crate::wordnet::{SemanticNetwork, WordClass};

/// Joins the words of a multi-word lemma.
pub const LEMMA_DELIMITER: char = '_';

/// Whether a token with this tag may be substituted: nouns, verbs,
/// adjectives and adverbs, but never proper nouns.
pub fn is_editable(tag: &str) -> bool {
    WordClass::from_tag(tag).is_some() && !matches!(tag, "NNP" | "NNPS")
}

/// A replacement term and its syllable cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CandidateTerm {
    /// Constituent words; more than one for multi-word expressions.
    pub parts: Vec<String>,
    /// Syllables of the hardest constituent.
    pub syllable_count: usize,
}

impl CandidateTerm {
    /// A single-word term.
    pub fn word(surface: impl Into<String>, syllable_count: usize) -> Self {
        Self {
            parts: vec![surface.into()],
            syllable_count,
        }
    }

    /// Space-separated surface form.
    pub fn surface(&self) -> String {
        self.parts.join(" ")
    }

    /// Whether the term spans more than one word.
    pub fn is_multi_word(&self) -> bool {
        self.parts.len() > 1
    }
}

/// Split a lemma name into its words.
pub fn split_lemma(lemma: &str) -> Vec<String> {
    lemma
        .split(LEMMA_DELIMITER)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Attach a syllable cost to each raw lemma name.
///
/// The cost of a multi-word lemma is the maximum over its words.
pub fn annotate<S: AsRef<str>>(lemmas: &[S], lookup: &PronunciationLookup) -> Vec<CandidateTerm> {
    lemmas
        .iter()
        .filter_map(|lemma| {
            let parts = split_lemma(lemma.as_ref());
            let syllable_count = parts
                .iter()
                .map(|part| lookup.syllable_count(part))
                .max()?;
            Some(CandidateTerm {
                parts,
                syllable_count,
            })
        })
        .collect()
}

/// Which relation of the semantic network feeds the candidate pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    /// Lemmas of the immediate hypernyms of each synset.
    #[default]
    Hypernyms,
    /// Lemmas of the word's own synsets.
    Synonyms,
    /// Both pools, synonyms first.
    Both,
}

impl Relation {
    const fn synonyms(self) -> bool {
        matches!(self, Self::Synonyms | Self::Both)
    }

    const fn hypernyms(self) -> bool {
        matches!(self, Self::Hypernyms | Self::Both)
    }
}

/// Looks up substitution candidates in a semantic network.
#[derive(Clone)]
pub struct CandidateFinder {
    network: Arc<dyn SemanticNetwork>,
    lookup: PronunciationLookup,
    relation: Relation,
    match_word_class: bool,
}

impl std::fmt::Debug for CandidateFinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateFinder")
            .field("lookup", &self.lookup)
            .field("relation", &self.relation)
            .field("match_word_class", &self.match_word_class)
            .finish_non_exhaustive()
    }
}

impl CandidateFinder {
    /// Hypernym candidates from `network`, costed with `lookup`.
    pub fn new(network: Arc<dyn SemanticNetwork>, lookup: PronunciationLookup) -> Self {
        Self {
            network,
            lookup,
            relation: Relation::default(),
            match_word_class: false,
        }
    }

    /// Choose the relation that feeds the pool.
    pub const fn with_relation(mut self, relation: Relation) -> Self {
        self.relation = relation;
        self
    }

    /// Only consider synsets of the word class implied by the tag.
    pub const fn with_match_word_class(mut self, enabled: bool) -> Self {
        self.match_word_class = enabled;
        self
    }

    /// The syllable lookup used for costing.
    pub const fn lookup(&self) -> &PronunciationLookup {
        &self.lookup
    }

    /// Lemma names related to `word`, deduplicated in enumeration order.
    /// Empty for ineligible tags and for words the network does not know.
    pub fn raw_candidates(&self, word: &str, pos_tag: &str) -> Vec<String> {
        if !is_editable(pos_tag) {
            return Vec::new();
        }

        let wanted = WordClass::from_tag(pos_tag).filter(|_| self.match_word_class);
        let original = word.to_lowercase();
        let mut pool: Vec<String> = Vec::new();
        let mut push = |lemma: &String| {
            if lemma.to_lowercase() != original && !pool.contains(lemma) {
                pool.push(lemma.clone());
            }
        };

        for synset in self.network.synsets(word) {
            if wanted.is_some_and(|class| self.network.word_class(synset) != class) {
                continue;
            }
            if self.relation.synonyms() {
                self.network.lemma_names(synset).iter().for_each(&mut push);
            }
            if self.relation.hypernyms() {
                for &hypernym in self.network.hypernyms(synset) {
                    self.network.lemma_names(hypernym).iter().for_each(&mut push);
                }
            }
        }
        pool
    }

    /// Annotated candidates for `word` tagged `pos_tag`.
    pub fn candidates(&self, word: &str, pos_tag: &str) -> Vec<CandidateTerm> {
        annotate(&self.raw_candidates(word, pos_tag), &self.lookup)
    }
}
