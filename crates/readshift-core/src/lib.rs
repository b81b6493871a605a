//! Core library for readshift.
//!
//! Scores text with Flesch Reading Ease and rewrites it lexically: each
//! content word is swapped for a related term with fewer syllables (the
//! simple rewrite) or more syllables (the complex rewrite).
//!
//! # Modules
//!
//! - [`readability`] - Flesch Reading Ease and the unscoreable/implausible policy
//! - [`syllables`] - Lexicon-then-hyphenation syllable lookup
//! - [`candidates`] - Eligibility and substitution candidates
//! - [`augment`] - Extremal candidate selection and the augmentation pipeline
//! - [`reassemble`] - Token stream to text
//! - [`pipeline`] - Score, augment and rescore; parallel batches
//! - [`text`], [`tagger`], [`wordnet`] - Tokenizer, tagger and semantic network
//! - [`config`], [`resources`], [`error`] - Configuration and resource loading
//!
//! # Quick Start
//!
//! ```no_run
//! use readshift_core::{ConfigLoader, Lexicons, Pipeline};
//!
//! let (config, _sources) = ConfigLoader::new()
//!     .with_user_config(true)
//!     .load()
//!     .expect("Failed to load configuration");
//! let lexicons = Lexicons::load(&config).expect("Failed to load resources");
//! let pipeline = Pipeline::from_config(&lexicons, &config);
//!
//! let out = pipeline.augment("The automobile was extraordinarily fast.");
//! println!("{} ({:.1})", out.simple, pipeline.score(&out.simple).score);
//! ```
#![deny(unsafe_code)]

pub mod augment;
pub mod candidates;
pub mod config;
pub mod dictionaries;
pub mod error;
pub mod pipeline;
pub mod readability;
pub mod reassemble;
pub mod resources;
pub mod syllables;
pub mod tagger;
pub mod text;
pub mod wordnet;

pub use augment::{Augmentation, AugmentationDecision, Augmenter, Token, select};
pub use candidates::{CandidateFinder, CandidateTerm, Relation, is_editable};
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use error::{ConfigError, ConfigResult, LexiconError, LexiconResult};
pub use pipeline::{BatchReport, DocumentReport, Pipeline};
pub use readability::{
    ReadabilityReport, ReadabilityScorer, ScoreStatus, ScoredText, UNSCOREABLE_SENTINEL,
    flesch_reading_ease,
};
pub use reassemble::{Segment, join};
pub use resources::Lexicons;
pub use syllables::{PronouncingDictionary, PronunciationLookup};
pub use tagger::{HeuristicTagger, PosTagger};
pub use text::{RuleTokenizer, Tokenizer};
pub use wordnet::{SemanticNetwork, WordNet, WordNetBuilder};

/// Default maximum input size in bytes (5 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
