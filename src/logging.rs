use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, prelude::*, registry};

use crate::config::AppConfig;

/// Stderr gets `TICKET_HOOK_LOG`; the debug log file, when enabled, gets everything
/// at debug level and is only ever appended to.
pub fn init(config: &AppConfig) {
    let stderr_filter =
        EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("error"));
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(stderr_filter);

    let file_layer = config.debug_log.as_ref().and_then(|path| match open_debug_log(path) {
        Ok(file) => Some(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_filter(EnvFilter::new("ticket_hooks=debug")),
        ),
        Err(err) => {
            eprintln!(
                "Warning: could not open debug log {}: {err}. Logging to stderr only.",
                path.display()
            );
            None
        }
    });

    let _ = registry().with(stderr_layer).with(file_layer).try_init();
}

/// Opens `path` for appending. Missing parent directories are an error, never created.
fn open_debug_log(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        if !parent.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("directory {} does not exist", parent.display()),
            ));
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}
