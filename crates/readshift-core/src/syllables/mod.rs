//! Syllable counting.
//!
//! [`PronunciationLookup`] is a prioritized chain of [`SyllableSource`]s.
//! The first source with an answer wins outright; answers are never blended.
//! The standard chain is the pronunciation lexicon followed by the
//! hyphenation heuristic, which always answers.

pub mod cmudict;
pub mod hyphenate;

use std::fmt;
use std::sync::Arc;

pub use cmudict::PronouncingDictionary;
pub use hyphenate::{Hyphenator, VowelGroupHyphenator};

/// One strategy for counting the syllables of a lowercase word.
pub trait SyllableSource: Send + Sync {
    /// Short label for diagnostics.
    fn name(&self) -> &'static str;

    /// Syllable count for `word`, or `None` when this source has no entry.
    fn syllables(&self, word: &str) -> Option<usize>;
}

/// Counts syllables as the number of hyphenation chunks.
#[derive(Debug, Clone, Default)]
pub struct HyphenationSource<H = VowelGroupHyphenator> {
    hyphenator: H,
}

impl<H: Hyphenator> HyphenationSource<H> {
    /// Wrap a hyphenator.
    pub const fn new(hyphenator: H) -> Self {
        Self { hyphenator }
    }
}

impl<H: Hyphenator> SyllableSource for HyphenationSource<H> {
    fn name(&self) -> &'static str {
        "hyphenation"
    }

    fn syllables(&self, word: &str) -> Option<usize> {
        Some(hyphenate::chunk_count(&self.hyphenator.hyphenate(word)))
    }
}

/// Prioritized syllable lookup shared by scoring and augmentation.
///
/// Cheap to clone; sources are shared read-only handles.
#[derive(Clone)]
pub struct PronunciationLookup {
    sources: Vec<Arc<dyn SyllableSource>>,
}

impl PronunciationLookup {
    /// Lexicon first, hyphenation heuristic second.
    pub fn new(lexicon: Arc<PronouncingDictionary>) -> Self {
        let hyphenation: Arc<dyn SyllableSource> =
            Arc::new(HyphenationSource::new(VowelGroupHyphenator));
        Self::from_sources(vec![lexicon, hyphenation])
    }

    /// Hyphenation heuristic only.
    pub fn heuristic() -> Self {
        Self::from_sources(vec![Arc::new(HyphenationSource::new(VowelGroupHyphenator))])
    }

    /// Build a chain from explicit sources, highest priority first.
    pub fn from_sources(sources: Vec<Arc<dyn SyllableSource>>) -> Self {
        Self { sources }
    }

    /// Syllable count of `word`. Total: a word no source knows counts as 0.
    pub fn syllable_count(&self, word: &str) -> usize {
        let word = word.to_lowercase();
        self.sources
            .iter()
            .find_map(|source| source.syllables(&word))
            .unwrap_or(0)
    }

    /// Name of the source that answers for `word`.
    pub fn source_for(&self, word: &str) -> Option<&'static str> {
        let word = word.to_lowercase();
        self.sources
            .iter()
            .find(|source| source.syllables(&word).is_some())
            .map(|source| source.name())
    }
}

impl Default for PronunciationLookup {
    fn default() -> Self {
        Self::heuristic()
    }
}

impl fmt::Debug for PronunciationLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PronunciationLookup")
            .field(
                "sources",
                &self.sources.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
