//! Scan orchestration
//!
//! Runs the decode → extract → classify → quarantine pipeline over a folder
//! with a bounded number of files in flight. Each file is processed wholly
//! within one blocking task; the orchestrator is the single consumer of
//! completions, so outcome collection and report appends need no locking.

use std::path::{Path, PathBuf};

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::config::default_worker_count;
use crate::decoder::decode_audio_file;
use crate::error::{Result, ScanError};
use crate::models::{ClassificationThresholds, ScanEvent, ScanOutcome, ScanReport};
use crate::services::feature_extractor::compute_metrics;
use crate::services::file_scanner::list_audio_files;
use crate::services::quarantine::{ensure_quarantine_dir, quarantine_dir_for, quarantine_file};
use crate::services::report_writer::{report_path_for, ReportWriter};
use crate::services::silence_classifier::is_silent;

/// Options for one scan invocation
pub struct ScanOptions {
    /// Silence boundary constants
    pub thresholds: ClassificationThresholds,

    /// Maximum files in flight simultaneously (>= 1)
    pub worker_count: usize,

    /// Optional progress event channel for the presentation layer
    pub events: Option<mpsc::Sender<ScanEvent>>,

    /// Cooperative cancellation; checked between file completions
    pub cancel: CancellationToken,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            thresholds: ClassificationThresholds::default(),
            worker_count: default_worker_count(),
            events: None,
            cancel: CancellationToken::new(),
        }
    }
}

/// Scan a folder and quarantine classified-silent files
///
/// Fatal errors (folder missing, zero workers, report not creatable)
/// surface before any file is dispatched. Per-file failures become
/// `Failed` outcomes and never abort the scan; once dispatch starts, a
/// report file always exists when this returns.
pub async fn scan_folder(folder: &Path, options: ScanOptions) -> Result<ScanReport> {
    if options.worker_count == 0 {
        return Err(ScanError::Config(
            "worker_count must be at least 1".to_string(),
        ));
    }

    let files = list_audio_files(folder)?;
    let total = files.len();
    let quarantine_dir = quarantine_dir_for(folder);
    let report_path = report_path_for(folder);

    let mut report = ReportWriter::create(&report_path)?;

    tracing::info!(
        folder = %folder.display(),
        file_count = total,
        worker_count = options.worker_count,
        "Starting scan"
    );
    emit(&options.events, ScanEvent::Started { total }).await;

    // Seed worker_count tasks, then refill one per completion. Completion
    // order is whatever the workers produce; nothing downstream depends on
    // enumeration order.
    let spawn_file_task = |path: PathBuf| {
        let thresholds = options.thresholds;
        let quarantine_dir = quarantine_dir.clone();
        async move {
            let file_name = display_name(&path);
            let handle = tokio::task::spawn_blocking(move || {
                process_one_file(&path, &thresholds, &quarantine_dir)
            });
            match handle.await {
                Ok(outcome) => outcome,
                Err(join_err) => {
                    tracing::error!(file = %file_name, error = %join_err, "Worker task panicked");
                    ScanOutcome::Failed {
                        file_name,
                        reason: format!("Worker task panicked: {}", join_err),
                    }
                }
            }
        }
    };

    let mut file_iter = files.into_iter();
    let mut tasks = FuturesUnordered::new();
    for _ in 0..options.worker_count {
        if let Some(path) = file_iter.next() {
            tasks.push(spawn_file_task(path));
        }
    }

    let mut outcomes: Vec<ScanOutcome> = Vec::with_capacity(total);
    let mut cancelled = false;

    while !tasks.is_empty() {
        tokio::select! {
            _ = options.cancel.cancelled(), if !cancelled => {
                // Stop refilling; in-flight files run to completion and
                // their moves stand (no rollback)
                cancelled = true;
                tracing::info!(
                    completed = outcomes.len(),
                    total,
                    "Scan cancelled, draining in-flight files"
                );
            }
            Some(outcome) = tasks.next() => {
                if let Err(e) = report.append(&outcome) {
                    // Outcome is still recorded in memory
                    tracing::warn!(error = %e, "Failed to append report line");
                }

                outcomes.push(outcome.clone());
                emit(
                    &options.events,
                    ScanEvent::FileFinished {
                        completed: outcomes.len(),
                        total,
                        outcome,
                    },
                )
                .await;

                if !cancelled {
                    if let Some(path) = file_iter.next() {
                        tasks.push(spawn_file_task(path));
                    }
                }
            }
        }
    }

    emit(&options.events, ScanEvent::Finished { cancelled }).await;

    let scan_report = ScanReport {
        report_path: report.path().to_path_buf(),
        quarantine_dir,
        files_scanned: total,
        outcomes,
        cancelled,
    };

    tracing::info!(
        report = %scan_report.report_path.display(),
        quarantined = scan_report.quarantined_count(),
        failed = scan_report.failed_count(),
        cancelled,
        "Scan complete"
    );

    Ok(scan_report)
}

/// Process one file end to end: decode, extract, classify, quarantine
///
/// Every error is converted to a `Failed` outcome at this boundary; a
/// quarantine failure leaves the file in its original location.
fn process_one_file(
    path: &Path,
    thresholds: &ClassificationThresholds,
    quarantine_dir: &Path,
) -> ScanOutcome {
    let file_name = display_name(path);

    let decoded = match decode_audio_file(path) {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::warn!(file = %file_name, error = %e, "Skipping file due to error");
            return ScanOutcome::Failed {
                reason: e.brief(),
                file_name,
            };
        }
    };

    let metrics = compute_metrics(&decoded.samples);

    if !is_silent(&metrics, thresholds) {
        tracing::debug!(
            file = %file_name,
            avg_loudness_db = format!("{:.1}", metrics.avg_loudness_db),
            "File is audible, keeping"
        );
        return ScanOutcome::Kept { file_name };
    }

    let moved = ensure_quarantine_dir(quarantine_dir)
        .and_then(|()| quarantine_file(path, quarantine_dir));

    match moved {
        Ok(_dest) => {
            tracing::info!(
                file = %file_name,
                avg_loudness_db = format!("{:.1}", metrics.avg_loudness_db),
                "Moved to quarantine"
            );
            ScanOutcome::Quarantined { file_name, metrics }
        }
        Err(e) => {
            tracing::warn!(file = %file_name, error = %e, "Quarantine move failed");
            ScanOutcome::Failed {
                reason: e.brief(),
                file_name,
            }
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

async fn emit(events: &Option<mpsc::Sender<ScanEvent>>, event: ScanEvent) {
    if let Some(tx) = events {
        // A dropped receiver is not an error; the scan does not depend on
        // anyone listening
        let _ = tx.send(event).await;
    }
}
