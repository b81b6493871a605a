//! Loading the read-only lexical resources.
//!
//! The pronunciation lexicon and the semantic network are loaded once at
//! startup and shared by reference for the lifetime of the process. A
//! configured path must exist. An unconfigured resource is looked up in the
//! user data directory and, when absent there too, replaced by an empty one:
//! syllables then come from the hyphenation heuristic alone and no word has
//! substitution candidates.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};

use crate::config::{Config, user_data_dir};
use crate::error::{LexiconError, LexiconResult};
use crate::syllables::{PronouncingDictionary, PronunciationLookup};
use crate::wordnet::{SemanticNetwork, WordNet};

/// File name of the default pronunciation lexicon in the data directory.
pub const DEFAULT_DICTIONARY_FILE: &str = "cmudict.dict";

/// Directory name of the default WordNet database in the data directory.
pub const DEFAULT_WORDNET_DIR: &str = "wordnet";

/// Where a resource came from.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum ResourceOrigin {
    /// Path set in configuration.
    Configured(Utf8PathBuf),
    /// Found in the user data directory.
    DataDir(Utf8PathBuf),
    /// Not available; an empty resource is used.
    Empty,
}

/// Shared handles to the loaded resources.
#[derive(Clone)]
pub struct Lexicons {
    /// Pronunciation lexicon.
    pub dictionary: Arc<PronouncingDictionary>,
    /// Semantic network.
    pub network: Arc<dyn SemanticNetwork>,
    /// Origin of `dictionary`.
    pub dictionary_origin: ResourceOrigin,
    /// Origin of `network`.
    pub network_origin: ResourceOrigin,
}

impl std::fmt::Debug for Lexicons {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexicons")
            .field("dictionary_words", &self.dictionary.len())
            .field("dictionary_origin", &self.dictionary_origin)
            .field("network_origin", &self.network_origin)
            .finish_non_exhaustive()
    }
}

impl Default for Lexicons {
    /// Empty lexicon and empty network.
    fn default() -> Self {
        Self {
            dictionary: Arc::new(PronouncingDictionary::new()),
            network: Arc::new(WordNet::empty()),
            dictionary_origin: ResourceOrigin::Empty,
            network_origin: ResourceOrigin::Empty,
        }
    }
}

impl Lexicons {
    /// Load both resources as configured.
    #[tracing::instrument(skip_all)]
    pub fn load(config: &Config) -> LexiconResult<Self> {
        Self::load_with_data_dir(config, user_data_dir().as_deref())
    }

    /// Load both resources, falling back to `data_dir` for unconfigured ones.
    pub fn load_with_data_dir(config: &Config, data_dir: Option<&Utf8Path>) -> LexiconResult<Self> {
        let dictionary_origin = resolve(
            config.pronouncing_dictionary.as_deref(),
            data_dir.map(|d| d.join(DEFAULT_DICTIONARY_FILE)),
            "pronunciation lexicon",
        )?;
        let dictionary = match &dictionary_origin {
            ResourceOrigin::Configured(path) | ResourceOrigin::DataDir(path) => {
                PronouncingDictionary::load(path)?
            }
            ResourceOrigin::Empty => PronouncingDictionary::new(),
        };

        let network_origin = resolve(
            config.wordnet_dir.as_deref(),
            data_dir.map(|d| d.join(DEFAULT_WORDNET_DIR)),
            "wordnet database",
        )?;
        let network = match &network_origin {
            ResourceOrigin::Configured(path) | ResourceOrigin::DataDir(path) => WordNet::load(path)?,
            ResourceOrigin::Empty => WordNet::empty(),
        };

        Ok(Self {
            dictionary: Arc::new(dictionary),
            network: Arc::new(network),
            dictionary_origin,
            network_origin,
        })
    }

    /// Lexicon-then-hyphenation syllable lookup over the loaded lexicon.
    pub fn lookup(&self) -> PronunciationLookup {
        PronunciationLookup::new(Arc::clone(&self.dictionary))
    }
}

fn resolve(
    configured: Option<&Utf8Path>,
    fallback: Option<Utf8PathBuf>,
    what: &str,
) -> LexiconResult<ResourceOrigin> {
    if let Some(path) = configured {
        if !path.exists() {
            return Err(LexiconError::Missing {
                path: path.to_path_buf(),
            });
        }
        return Ok(ResourceOrigin::Configured(path.to_path_buf()));
    }
    match fallback {
        Some(path) if path.exists() => {
            tracing::debug!(path = %path, "using {what} from data directory");
            Ok(ResourceOrigin::DataDir(path))
        }
        _ => {
            tracing::warn!("no {what} found; continuing without one");
            Ok(ResourceOrigin::Empty)
        }
    }
}
