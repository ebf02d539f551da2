//! music-checker - silent audio file scanner
//!
//! Scans a music folder, classifies each audio file as silent or audible
//! using loudness statistics, moves silent files into a quarantine
//! directory, and writes a plain-text report.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use music_checker::config::{load_toml_config, resolve_music_folder};
use music_checker::{scan_folder, ClassificationThresholds, ScanEvent, ScanOptions, ScanOutcome};

#[derive(Parser, Debug)]
#[command(name = "music-checker", version, about = "Detect and quarantine silent or whisper-level audio files")]
struct Args {
    /// Folder to scan (default: MUSIC_CHECKER_FOLDER, config file, or the
    /// platform music directory)
    folder: Option<PathBuf>,

    /// Maximum files processed in parallel
    #[arg(long)]
    workers: Option<usize>,

    /// Mean loudness ceiling in dB for the silent verdict
    #[arg(long)]
    db_threshold: Option<f64>,

    /// RMS mean ceiling for the silent verdict
    #[arg(long)]
    rms_threshold: Option<f64>,

    /// RMS variance ceiling for the silent verdict
    #[arg(long)]
    var_threshold: Option<f64>,

    /// Config file path (default: platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let toml_config = load_toml_config(args.config.as_deref())?;
    let folder = resolve_music_folder(args.folder.as_deref(), &toml_config);

    let mut thresholds = toml_config
        .thresholds
        .unwrap_or_else(ClassificationThresholds::default);
    if let Some(db) = args.db_threshold {
        thresholds.db_threshold = db;
    }
    if let Some(rms) = args.rms_threshold {
        thresholds.rms_threshold = rms;
    }
    if let Some(var) = args.var_threshold {
        thresholds.var_threshold = var;
    }

    let mut options = ScanOptions {
        thresholds,
        ..Default::default()
    };
    if let Some(workers) = args.workers.or(toml_config.worker_count) {
        options.worker_count = workers;
    }

    info!(
        folder = %folder.display(),
        workers = options.worker_count,
        "Scanning music folder and moving silent/whisper-level tracks to quarantine"
    );

    // Ctrl-C cancels between file completions; already-moved files stay in
    // quarantine
    let cancel = options.cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    // Print per-file notices as they complete, off the event channel
    let (event_tx, mut event_rx) = tokio::sync::mpsc::channel(64);
    options.events = Some(event_tx);
    let printer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            match event {
                ScanEvent::Started { total } => {
                    println!("Found {} audio files to evaluate", total);
                }
                ScanEvent::FileFinished { outcome, .. } => match outcome {
                    ScanOutcome::Quarantined { file_name, metrics } => {
                        println!(
                            "Moved to quarantine: {} ({:.1} dB)",
                            file_name, metrics.avg_loudness_db
                        );
                    }
                    ScanOutcome::Failed { file_name, reason } => {
                        println!("Skipping {} due to error: {}", file_name, reason);
                    }
                    ScanOutcome::Kept { .. } => {}
                },
                ScanEvent::Finished { cancelled } => {
                    if cancelled {
                        println!("Scan cancelled; partial report written");
                    }
                }
            }
        }
    });

    let report = scan_folder(&folder, options).await?;
    let _ = printer.await;

    println!();
    println!("Scan complete. Report saved to: {}", report.report_path.display());
    println!("All silent files moved to: {}", report.quarantine_dir.display());

    Ok(())
}
