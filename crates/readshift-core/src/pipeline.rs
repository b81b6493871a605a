//! Score, augment and rescore documents.
//!
//! [`Pipeline`] bundles a [`ReadabilityScorer`] and an [`Augmenter`] built
//! over the same shared resources. [`Pipeline::process_batch`] runs
//! independent documents in parallel with rayon; every worker reads the same
//! immutable lexicon and network, so no locking is involved.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::augment::{Augmentation, Augmenter};
use crate::candidates::CandidateFinder;
use crate::config::Config;
use crate::readability::{ReadabilityScorer, ScoreStatus, ScoredText};
use crate::resources::Lexicons;
use crate::tagger::{HeuristicTagger, PosTagger};
use crate::text::{RuleTokenizer, Tokenizer};

/// Scoring and augmentation over shared read-only resources.
#[derive(Debug, Clone)]
pub struct Pipeline {
    scorer: ReadabilityScorer,
    augmenter: Augmenter,
    max_plausible_score: f64,
}

/// Scores of one document before and after augmentation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocumentReport {
    /// Position of the document in the batch.
    pub index: usize,
    /// Score of the input text.
    pub original: ScoredText,
    /// Score of the simple rewrite.
    pub simple: ScoredText,
    /// Score of the complex rewrite.
    pub complex: ScoredText,
    /// Classification of the original score.
    pub status: ScoreStatus,
    /// Tokens replaced in the simple rewrite.
    pub simplified_words: usize,
    /// Tokens replaced in the complex rewrite.
    pub complexified_words: usize,
}

impl DocumentReport {
    /// Whether the original score should be discarded.
    pub fn is_faulty(&self) -> bool {
        self.status != ScoreStatus::Ok
    }
}

/// Results of a batch, in input order.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BatchReport {
    /// One report per input document.
    pub documents: Vec<DocumentReport>,
    /// Documents whose original score is unscoreable or implausible.
    pub faulty: usize,
    /// Threshold used for classification.
    pub max_plausible_score: f64,
}

impl BatchReport {
    /// Documents with a usable original score.
    pub fn usable(&self) -> impl Iterator<Item = &DocumentReport> {
        self.documents.iter().filter(|d| !d.is_faulty())
    }

    /// Mean score over usable documents for each of original, simple and
    /// complex text, or `None` when no document is usable.
    pub fn mean_scores(&self) -> Option<(f64, f64, f64)> {
        let usable: Vec<&DocumentReport> = self.usable().collect();
        if usable.is_empty() {
            return None;
        }
        let n = usable.len() as f64;
        let mean = |pick: fn(&DocumentReport) -> f64| {
            usable.iter().map(|d| pick(d)).sum::<f64>() / n
        };
        Some((
            mean(|d| d.original.score),
            mean(|d| d.simple.score),
            mean(|d| d.complex.score),
        ))
    }
}

impl Pipeline {
    /// Compose a pipeline from explicit collaborators.
    pub fn new(scorer: ReadabilityScorer, augmenter: Augmenter, max_plausible_score: f64) -> Self {
        Self {
            scorer,
            augmenter,
            max_plausible_score,
        }
    }

    /// The standard pipeline: rule tokenizer, heuristic tagger, and the
    /// loaded resources, tuned by `config`.
    pub fn from_config(lexicons: &Lexicons, config: &Config) -> Self {
        let tokenizer: Arc<dyn Tokenizer> = Arc::new(RuleTokenizer);
        let tagger: Arc<dyn PosTagger> = Arc::new(HeuristicTagger);
        let lookup = lexicons.lookup();

        let finder = CandidateFinder::new(Arc::clone(&lexicons.network), lookup.clone())
            .with_relation(config.relation)
            .with_match_word_class(config.match_word_class);
        let augmenter = Augmenter::new(Arc::clone(&tokenizer), tagger, finder)
            .with_preserve_case(config.preserve_case);

        Self::new(
            ReadabilityScorer::new(tokenizer, lookup),
            augmenter,
            config.max_plausible_score,
        )
    }

    /// The scorer.
    pub const fn scorer(&self) -> &ReadabilityScorer {
        &self.scorer
    }

    /// The augmenter.
    pub const fn augmenter(&self) -> &Augmenter {
        &self.augmenter
    }

    /// The plausibility threshold.
    pub const fn max_plausible_score(&self) -> f64 {
        self.max_plausible_score
    }

    /// Score `text`.
    pub fn score(&self, text: &str) -> ScoredText {
        self.scorer.analyze(text)
    }

    /// Augment `text`.
    pub fn augment(&self, text: &str) -> Augmentation {
        self.augmenter.augment(text)
    }

    /// Score `text`, augment it and score both rewrites.
    pub fn process(&self, index: usize, text: &str) -> DocumentReport {
        let original = self.scorer.analyze(text);
        let augmentation = self.augmenter.augment(text);
        DocumentReport {
            index,
            status: original.status(self.max_plausible_score),
            original,
            simple: self.scorer.analyze(&augmentation.simple),
            complex: self.scorer.analyze(&augmentation.complex),
            simplified_words: augmentation.simplified_count(),
            complexified_words: augmentation.complexified_count(),
        }
    }

    /// Process independent documents in parallel.
    ///
    /// `on_progress` is called once per finished document with the number
    /// finished so far; calls may come from any worker thread.
    #[tracing::instrument(skip_all, fields(documents = documents.len()))]
    pub fn process_batch<S, F>(&self, documents: &[S], on_progress: F) -> BatchReport
    where
        S: AsRef<str> + Sync,
        F: Fn(usize) + Sync,
    {
        let finished = AtomicUsize::new(0);
        let reports: Vec<DocumentReport> = documents
            .par_iter()
            .enumerate()
            .map(|(index, doc)| {
                let report = self.process(index, doc.as_ref());
                let done = finished.fetch_add(1, Ordering::Relaxed) + 1;
                tracing::debug!(index, done, status = ?report.status, "document processed");
                on_progress(done);
                report
            })
            .collect();

        let faulty = reports.iter().filter(|r| r.is_faulty()).count();
        tracing::info!(documents = reports.len(), faulty, "batch processed");
        BatchReport {
            documents: reports,
            faulty,
            max_plausible_score: self.max_plausible_score,
        }
    }
}
