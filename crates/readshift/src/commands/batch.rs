//! Batch command: score, augment and rescore many documents in parallel.

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use readshift_core::text::split_paragraphs;
use readshift_core::{BatchReport, Pipeline};

use super::read_input_file;

/// Arguments for the `batch` subcommand.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Input files; documents are separated by blank lines.
    #[arg(required = true)]
    pub files: Vec<Utf8PathBuf>,

    /// Treat each file as a single document
    #[arg(long)]
    pub whole_files: bool,

    /// Fail when more than this many documents have a faulty score
    #[arg(long)]
    pub max_faulty: Option<usize>,
}

/// Process every document and summarize the scores.
#[instrument(name = "cmd_batch", skip_all, fields(files = args.files.len()))]
pub fn cmd_batch(
    args: BatchArgs,
    global_json: bool,
    quiet: bool,
    pipeline: &Pipeline,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let mut documents = Vec::new();
    for file in &args.files {
        let content = read_input_file(file, max_input_bytes)?;
        if args.whole_files {
            documents.push(content);
        } else {
            documents.extend(split_paragraphs(&content));
        }
    }
    debug!(documents = documents.len(), "executing batch command");

    let bar = if global_json || quiet {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(documents.len() as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .context("invalid progress bar template")?
                .progress_chars("#>-"),
        );
        bar.set_message("documents");
        bar
    };
    let report = pipeline.process_batch(&documents, |done| bar.set_position(done as u64));
    bar.finish_and_clear();

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if let Some(max) = args.max_faulty
        && report.faulty > max
    {
        bail!(
            "{} documents have a faulty score (max: {max})",
            report.faulty
        );
    }
    Ok(())
}

fn print_report(report: &BatchReport) {
    for doc in &report.documents {
        if doc.is_faulty() {
            println!(
                "{:>4}  {}",
                doc.index,
                format!("{:?}", doc.status).to_lowercase().yellow()
            );
        } else {
            println!(
                "{:>4}  {:>7.1} {:>7.1} {:>7.1}  (-{} / +{})",
                doc.index,
                doc.original.score,
                doc.simple.score,
                doc.complex.score,
                doc.simplified_words,
                doc.complexified_words,
            );
        }
    }

    println!();
    if let Some((original, simple, complex)) = report.mean_scores() {
        println!(
            "{}: original {:.1}, simple {:.1}, complex {:.1}",
            "Mean scores".bold(),
            original,
            simple,
            complex
        );
    }
    println!(
        "Documents with a faulty score: {}/{}",
        report.faulty,
        report.documents.len()
    );
}
