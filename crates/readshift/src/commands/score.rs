//! Score command: Flesch Reading Ease of a file.

use anyhow::bail;
use camino::Utf8PathBuf;
use clap::Args;
use tracing::{debug, instrument};

use readshift_core::{Pipeline, ReadabilityReport, ScoreStatus};

use super::read_input_file;

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// File to score.
    pub file: Utf8PathBuf,

    /// Scores above this are reported as implausible [default: from config]
    #[arg(long)]
    pub max_score: Option<f64>,
}

/// Score a file. Fails when the text cannot be scored or the score is
/// implausibly high.
#[instrument(name = "cmd_score", skip_all, fields(file = %args.file))]
pub fn cmd_score(
    args: ScoreArgs,
    global_json: bool,
    pipeline: &Pipeline,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let content = read_input_file(&args.file, max_input_bytes)?;
    let max_score = args.max_score.unwrap_or(pipeline.max_plausible_score());
    debug!(bytes = content.len(), max_score, "executing score command");

    let report = ReadabilityReport::new(pipeline.score(&content), max_score);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match report.status {
        ScoreStatus::Ok => {
            println!("{:.1}", report.scored.score);
            Ok(())
        }
        ScoreStatus::Unscoreable => bail!(
            "{} has no scoreable text ({} words, {} sentences)",
            args.file,
            report.scored.word_count,
            report.scored.sentence_count,
        ),
        ScoreStatus::Implausible => bail!(
            "{} scores {:.1}, above the plausible maximum of {:.2}",
            args.file,
            report.scored.score,
            max_score,
        ),
    }
}
