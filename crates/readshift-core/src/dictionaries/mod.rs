//! Dictionaries for tokenization and tagging.
//!
//! Curated word sets used by the sentence splitter and the heuristic
//! part-of-speech tagger.

pub mod abbreviations;
pub mod closed_class;
pub mod irregular_verbs;
