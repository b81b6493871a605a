//! Semantic relation network.
//!
//! [`SemanticNetwork`] is the boundary to a WordNet-style lexical database:
//! words map to synsets, synsets expose their lemma names and their
//! hypernyms. [`WordNet`] is the in-memory implementation, built either from
//! the WordNet database files ([`WordNet::load`]) or programmatically
//! ([`WordNetBuilder`]).

mod database;
mod morphy;

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Handle to one synset inside a [`SemanticNetwork`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SynsetId(usize);

impl SynsetId {
    const fn index(self) -> usize {
        self.0
    }
}

/// Open word classes covered by the network.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum WordClass {
    /// Nouns (`NN*`).
    Noun,
    /// Verbs (`VB*`).
    Verb,
    /// Adjectives, including satellites (`JJ*`).
    Adjective,
    /// Adverbs (`RB*`).
    Adverb,
}

impl WordClass {
    /// All classes, in enumeration order.
    pub const ALL: [Self; 4] = [Self::Noun, Self::Verb, Self::Adjective, Self::Adverb];

    /// Word class of a Penn Treebank tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.get(..2)? {
            "NN" => Some(Self::Noun),
            "VB" => Some(Self::Verb),
            "JJ" => Some(Self::Adjective),
            "RB" => Some(Self::Adverb),
            _ => None,
        }
    }

    /// Word class of a WordNet part-of-speech letter (`n v a s r`).
    pub const fn from_pos_letter(letter: char) -> Option<Self> {
        match letter {
            'n' => Some(Self::Noun),
            'v' => Some(Self::Verb),
            'a' | 's' => Some(Self::Adjective),
            'r' => Some(Self::Adverb),
            _ => None,
        }
    }

    /// Suffix of the database files for this class (`data.noun`, `verb.exc`).
    pub const fn file_suffix(self) -> &'static str {
        match self {
            Self::Noun => "noun",
            Self::Verb => "verb",
            Self::Adjective => "adj",
            Self::Adverb => "adv",
        }
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

/// Read-only lexical network queried for substitution candidates.
pub trait SemanticNetwork: Send + Sync {
    /// Synsets containing `word` (or one of its base forms), in a stable
    /// order. Empty when the word is unknown.
    fn synsets(&self, word: &str) -> Vec<SynsetId>;

    /// Immediate generalizations of `synset`.
    fn hypernyms(&self, synset: SynsetId) -> &[SynsetId];

    /// Lemma names of `synset`. Multi-word lemmas join their words with `_`.
    fn lemma_names(&self, synset: SynsetId) -> &[String];

    /// Word class of `synset`.
    fn word_class(&self, synset: SynsetId) -> WordClass;
}

#[derive(Debug, Clone)]
struct Synset {
    class: WordClass,
    lemmas: Vec<String>,
    hypernyms: Vec<SynsetId>,
}

/// In-memory WordNet.
#[derive(Debug, Clone, Default)]
pub struct WordNet {
    synsets: Vec<Synset>,
    /// Per class: lowercase lemma → synsets in sense order.
    index: [HashMap<String, Vec<SynsetId>>; 4],
    /// Per class: inflected form → base forms.
    exceptions: [HashMap<String, Vec<String>>; 4],
}

impl WordNet {
    /// A network with no synsets.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of synsets.
    pub fn len(&self) -> usize {
        self.synsets.len()
    }

    /// Whether the network has no synsets.
    pub fn is_empty(&self) -> bool {
        self.synsets.is_empty()
    }

    fn synset(&self, id: SynsetId) -> &Synset {
        &self.synsets[id.index()]
    }

    /// Synsets of `word` restricted to `class`.
    pub fn synsets_of_class(&self, word: &str, class: WordClass) -> Vec<SynsetId> {
        let form = normalize_lemma(word);
        let index = &self.index[class.slot()];
        let mut found = Vec::new();
        for base in self.morphy(&form, class) {
            for &id in index.get(&base).into_iter().flatten() {
                if !found.contains(&id) {
                    found.push(id);
                }
            }
        }
        found
    }
}

impl SemanticNetwork for WordNet {
    fn synsets(&self, word: &str) -> Vec<SynsetId> {
        let mut found = Vec::new();
        for class in WordClass::ALL {
            for id in self.synsets_of_class(word, class) {
                if !found.contains(&id) {
                    found.push(id);
                }
            }
        }
        found
    }

    fn hypernyms(&self, synset: SynsetId) -> &[SynsetId] {
        &self.synset(synset).hypernyms
    }

    fn lemma_names(&self, synset: SynsetId) -> &[String] {
        &self.synset(synset).lemmas
    }

    fn word_class(&self, synset: SynsetId) -> WordClass {
        self.synset(synset).class
    }
}

/// Index key for a lemma: lowercase, spaces joined with `_`.
fn normalize_lemma(word: &str) -> String {
    word.trim().to_lowercase().replace(' ', "_")
}

/// Incremental construction of a [`WordNet`].
///
/// Synsets are indexed under each of their lemmas in insertion order.
#[derive(Debug, Default)]
pub struct WordNetBuilder {
    net: WordNet,
}

impl WordNetBuilder {
    /// Start an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a synset with the given lemma names and return its handle.
    pub fn add_synset<S: AsRef<str>>(&mut self, class: WordClass, lemmas: &[S]) -> SynsetId {
        let id = SynsetId(self.net.synsets.len());
        let lemmas: Vec<String> = lemmas.iter().map(|l| l.as_ref().to_string()).collect();
        for lemma in &lemmas {
            let senses = self.net.index[class.slot()]
                .entry(normalize_lemma(lemma))
                .or_default();
            if !senses.contains(&id) {
                senses.push(id);
            }
        }
        self.net.synsets.push(Synset {
            class,
            lemmas,
            hypernyms: Vec::new(),
        });
        id
    }

    /// Record that `hypernym` generalizes `synset`.
    pub fn add_hypernym(&mut self, synset: SynsetId, hypernym: SynsetId) -> &mut Self {
        let hypernyms = &mut self.net.synsets[synset.index()].hypernyms;
        if !hypernyms.contains(&hypernym) {
            hypernyms.push(hypernym);
        }
        self
    }

    /// Record an irregular inflection (`geese` → `goose`).
    pub fn add_exception(&mut self, class: WordClass, inflected: &str, base: &str) -> &mut Self {
        self.net.exceptions[class.slot()]
            .entry(normalize_lemma(inflected))
            .or_default()
            .push(normalize_lemma(base));
        self
    }

    /// Replace the derived sense order of `lemma` within `class`.
    fn set_senses(&mut self, class: WordClass, lemma: &str, senses: Vec<SynsetId>) {
        self.net.index[class.slot()].insert(normalize_lemma(lemma), senses);
    }

    /// Finish construction.
    pub fn build(self) -> WordNet {
        self.net
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (WordNet, SynsetId, SynsetId, SynsetId) {
        let mut b = WordNetBuilder::new();
        let canine = b.add_synset(WordClass::Noun, &["canine", "canid"]);
        let dog = b.add_synset(WordClass::Noun, &["dog", "domestic_dog", "Canis_familiaris"]);
        let chase = b.add_synset(WordClass::Verb, &["chase", "dog", "tail"]);
        b.add_hypernym(dog, canine);
        (b.build(), canine, dog, chase)
    }

    #[test]
    fn word_class_from_tags() {
        assert_eq!(WordClass::from_tag("NNS"), Some(WordClass::Noun));
        assert_eq!(WordClass::from_tag("VBD"), Some(WordClass::Verb));
        assert_eq!(WordClass::from_tag("JJR"), Some(WordClass::Adjective));
        assert_eq!(WordClass::from_tag("RB"), Some(WordClass::Adverb));
        assert_eq!(WordClass::from_tag("DT"), None);
        assert_eq!(WordClass::from_tag("N"), None);
    }

    #[test]
    fn synsets_enumerate_nouns_before_verbs() {
        let (net, _, dog, chase) = sample();
        assert_eq!(net.synsets("dog"), vec![dog, chase]);
        assert_eq!(net.synsets("Dog"), vec![dog, chase]);
    }

    #[test]
    fn multi_word_lemmas_are_indexed() {
        let (net, _, dog, _) = sample();
        assert_eq!(net.synsets("domestic dog"), vec![dog]);
        assert_eq!(net.synsets("canis_familiaris"), vec![dog]);
    }

    #[test]
    fn hypernyms_and_lemmas() {
        let (net, canine, dog, chase) = sample();
        assert_eq!(net.hypernyms(dog), &[canine]);
        assert!(net.hypernyms(chase).is_empty());
        assert_eq!(net.lemma_names(canine), &["canine", "canid"]);
        assert_eq!(net.word_class(chase), WordClass::Verb);
    }

    #[test]
    fn class_restricted_lookup() {
        let (net, _, dog, chase) = sample();
        assert_eq!(net.synsets_of_class("dog", WordClass::Noun), vec![dog]);
        assert_eq!(net.synsets_of_class("dog", WordClass::Verb), vec![chase]);
        assert!(net.synsets_of_class("dog", WordClass::Adverb).is_empty());
    }

    #[test]
    fn handles_are_distinct_positions() {
        let mut b = WordNetBuilder::new();
        let ids: Vec<SynsetId> = (0..1000)
            .map(|i| b.add_synset(WordClass::Noun, &[format!("lemma{i}")]))
            .collect();
        let net = b.build();
        for (i, id) in ids.iter().enumerate() {
            assert_eq!(id.index(), i);
            assert_eq!(net.lemma_names(*id), &[format!("lemma{i}")]);
        }
    }

    #[test]
    fn unknown_word_has_no_synsets() {
        let (net, ..) = sample();
        assert!(net.synsets("zyzzyva").is_empty());
        assert!(WordNet::empty().synsets("dog").is_empty());
    }
}
