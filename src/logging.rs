//! Logging setup using tracing
//!
//! Logs go to stderr, and additionally to a file when one is given
//! (by default `<program>/.cache/directus-image.log`).

use std::path::Path;
use std::sync::{Once, OnceLock};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: Once = Once::new();
static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

pub const DEFAULT_FILTER: &str = "info,directus_image=debug";

/// Initialize the tracing subscriber.
/// Safe to call more than once; only the first call has an effect.
pub fn init_logging(log_file: Option<&Path>) {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let file_layer = log_file.and_then(open_log_file).map(|file| {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            // Keep the writer alive for the rest of the process
            let _ = LOG_GUARD.set(guard);
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
        });

        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .with(file_layer);

        if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
            eprintln!("[directus-image] Failed to set tracing subscriber: {}", e);
        }
    });
}

fn open_log_file(path: &Path) -> Option<std::fs::File> {
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("[directus-image] Failed to create log directory {:?}: {}", parent, e);
            return None;
        }
    }

    match std::fs::OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("[directus-image] Failed to open log file {:?}: {}", path, e);
            None
        }
    }
}
