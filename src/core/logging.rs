//! Logging Module
//!
//! Structured logging for the generation server:
//! - JSON file log with daily rotation (tracing-appender)
//! - Human-readable stdout output
//! - `log` macro bridging so dependencies using `log` land in the same sinks
//! - Background gzip compression of rotated files

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Layer};

/// Base name of the rolling log file.
const LOG_FILE_NAME: &str = "rebuild.log";

/// Directory the rolling log is written to.
pub fn log_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("rebuild").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Initialize the logging system.
///
/// Filter comes from `RUST_LOG` (default `info`). The returned guard must be
/// held for the lifetime of the process or buffered file output is lost.
pub fn init() -> WorkerGuard {
    let log_dir = log_dir();

    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(&log_dir) {
            eprintln!("Failed to create logs directory: {}", e);
        }
    }

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // File: JSON for ingestion
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(true)
        .with_filter(env_filter.clone());

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .with_target(false)
        .with_filter(env_filter);

    let subscriber = tracing_subscriber::registry()
        .with(file_layer)
        .with(stdout_layer);

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global tracing subscriber: {}", e);
    }

    // Redirect `log` macros to `tracing`
    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to initialize LogTracer: {}", e);
    }

    // After init so the compressor's own log lines are captured
    let log_dir_clone = log_dir.clone();
    std::thread::spawn(move || {
        compress_old_logs(&log_dir_clone);
    });

    tracing::info!(
        "Logging initialized. Writing to: {:?} (daily rolling)",
        log_dir.join(LOG_FILE_NAME)
    );

    guard
}

/// Whether a file in the log directory is a rotated log awaiting compression.
/// Today's file and anything already gzipped are left alone.
fn should_compress(name: &str, today_suffix: &str) -> bool {
    let rotated_prefix = format!("{}.", LOG_FILE_NAME);
    name.starts_with(&rotated_prefix) && !name.ends_with(today_suffix) && !name.ends_with(".gz")
}

/// Compress rotated log files from previous days.
fn compress_old_logs(log_dir: &Path) {
    // rolling::daily stamps file names with the UTC date
    let today_suffix = chrono::Utc::now().format("%Y-%m-%d").to_string();

    let Ok(entries) = fs::read_dir(log_dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !should_compress(name, &today_suffix) {
            continue;
        }
        match compress_file(&path) {
            Ok(()) => tracing::info!("Compressed old log: {:?}", path),
            Err(e) => tracing::warn!("Failed to compress old log {:?}: {}", path, e),
        }
    }
}

fn compress_file(path: &Path) -> io::Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No filename"))?;
    let parent_dir = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No parent directory"))?;

    let mut gz_name = file_name.to_os_string();
    gz_name.push(".gz");
    let gz_path = parent_dir.join(gz_name);

    if gz_path.exists() {
        return Ok(());
    }

    let mut reader = io::BufReader::new(fs::File::open(path)?);
    let mut encoder = GzEncoder::new(fs::File::create(&gz_path)?, Compression::default());
    io::copy(&mut reader, &mut encoder)?;
    encoder.finish()?;

    fs::remove_file(path)
}
