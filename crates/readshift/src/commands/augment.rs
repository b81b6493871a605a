//! Augment command: simple and complex rewrites of a file, rescored.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use readshift_core::{AugmentationDecision, Pipeline, ScoreStatus, ScoredText};

use super::read_input_file;

/// Arguments for the `augment` subcommand.
#[derive(Args, Debug)]
pub struct AugmentArgs {
    /// File to rewrite.
    pub file: Utf8PathBuf,

    /// List every replaced word
    #[arg(long)]
    pub show_changes: bool,
}

#[derive(Serialize)]
struct Variant {
    text: String,
    #[serde(flatten)]
    scored: ScoredText,
    status: ScoreStatus,
    replaced: usize,
}

#[derive(Serialize)]
struct AugmentOutput {
    original: Variant,
    simple: Variant,
    complex: Variant,
    max_plausible_score: f64,
    decisions: Vec<AugmentationDecision>,
}

/// Rewrite a file with the simplest and the most complex candidates and
/// score all three texts.
#[instrument(name = "cmd_augment", skip_all, fields(file = %args.file))]
pub fn cmd_augment(
    args: AugmentArgs,
    global_json: bool,
    pipeline: &Pipeline,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let content = read_input_file(&args.file, max_input_bytes)?;
    debug!(bytes = content.len(), "executing augment command");

    let max = pipeline.max_plausible_score();
    let augmentation = pipeline.augment(&content);
    let variant = |text: &str, replaced: usize| {
        let scored = pipeline.score(text);
        Variant {
            text: text.to_string(),
            status: scored.status(max),
            scored,
            replaced,
        }
    };
    let output = AugmentOutput {
        original: variant(content.trim(), 0),
        simple: variant(&augmentation.simple, augmentation.simplified_count()),
        complex: variant(&augmentation.complex, augmentation.complexified_count()),
        max_plausible_score: max,
        decisions: augmentation
            .decisions
            .into_iter()
            .filter(AugmentationDecision::is_changed)
            .collect(),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_variant("Original", &output.original);
    print_variant("Simple", &output.simple);
    print_variant("Complex", &output.complex);

    if args.show_changes && !output.decisions.is_empty() {
        println!();
        println!("{}", "Changes".bold().underline());
        for decision in &output.decisions {
            println!(
                "  {} ({}): {} / {}",
                decision.original.surface,
                decision.original_syllables,
                decision.simplest_or_original().surface().green(),
                decision.most_complex_or_original().surface().yellow(),
            );
        }
    }

    Ok(())
}

fn print_variant(label: &str, variant: &Variant) {
    let score = match variant.status {
        ScoreStatus::Ok => format!("{:.1}", variant.scored.score),
        ScoreStatus::Unscoreable => "unscoreable".to_string(),
        ScoreStatus::Implausible => format!("{:.1}, implausible", variant.scored.score),
    };
    println!("{} [{}]: {}", label.bold(), score.cyan(), variant.text);
}
