//! Service modules for the scan/quarantine pipeline

pub mod feature_extractor;
pub mod file_scanner;
pub mod orchestrator;
pub mod quarantine;
pub mod report_writer;
pub mod silence_classifier;

pub use feature_extractor::compute_metrics;
pub use file_scanner::list_audio_files;
pub use orchestrator::{scan_folder, ScanOptions};
pub use quarantine::{ensure_quarantine_dir, quarantine_dir_for, quarantine_file, QUARANTINE_DIR_NAME};
pub use report_writer::{report_path_for, ReportWriter, REPORT_FILE_NAME};
pub use silence_classifier::is_silent;
