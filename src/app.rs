//! One comparison run: scan every folder, compare, report

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::info;

use crate::config::Config;
use crate::core::comparator::{compare, ComparisonResult};
use crate::core::decoder::{QrDecoder, RqrrDecoder};
use crate::core::model::{FolderIndex, SourceDirectory};
use crate::reporting::report_emitter::emit_report;
use crate::reporting::report_writer::{build_table, write_report};
use crate::scanner::folder_scanner::scan_folder;

/// What a run produced
#[derive(Debug)]
pub struct RunOutcome {
    pub indices: Vec<FolderIndex>,
    pub result: ComparisonResult,
    pub report_path: Option<PathBuf>,
}

fn new_progress(batch: bool, source: &SourceDirectory) -> Result<ProgressBar> {
    if batch {
        return Ok(ProgressBar::hidden());
    }

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .context("Invalid progress bar template")?
            .progress_chars("#>-"),
    );
    pb.set_message(source.label().to_string());
    Ok(pb)
}

/// Run with the default `rqrr` decoder
pub fn run(config: &Config) -> Result<RunOutcome> {
    run_with_decoder(config, &RqrrDecoder::new())
}

/// Run a full comparison with the given decoder
pub fn run_with_decoder(config: &Config, decoder: &dyn QrDecoder) -> Result<RunOutcome> {
    // Fail on a bad directory before any scanning starts
    config.validate()?;

    let mut indices = Vec::with_capacity(config.src_dirs.len());
    for source in &config.src_dirs {
        let progress = new_progress(config.batch, source)?;
        let index = scan_folder(source, decoder, &config.scan, &progress)
            .with_context(|| format!("Failed to scan {}", source))?;
        progress.finish_and_clear();
        indices.push(index);
    }

    let result = compare(&indices);
    emit_report(&result, &indices);

    let report_path = match &config.report {
        Some(report) => {
            let table = build_table(&result, &indices);
            let path = write_report(&report.dir, report.format, &table)?;
            info!("Detailed report saved to {}", path.display());
            Some(path)
        }
        None => None,
    };

    Ok(RunOutcome {
        indices,
        result,
        report_path,
    })
}
