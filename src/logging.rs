//! Logging setup for embedding applications.
//!
//! Events go to an append-only file under the XDG state directory
//! (`~/.local/state/paperdl/`). When that directory cannot be created or
//! the file cannot be opened, logging degrades to stderr instead of
//! returning an error.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILE: &str = "paperdl.log";

/// Where `init_logging` ended up sending events.
#[derive(Debug)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
}

/// Per-event writer. `None` means the file handle could not be cloned
/// for this event and it goes to stderr instead.
struct EventWriter(Option<File>);

impl Write for EventWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.0 {
            Some(file) => file.write(buf),
            None => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.0 {
            Some(file) => file.flush(),
            None => io::stderr().lock().flush(),
        }
    }
}

/// Installs the global subscriber. `file_name` overrides the default
/// `paperdl.log` inside the state directory. Returns where events ended
/// up; a missing or unwritable state directory is reported, not fatal.
pub fn init_logging(file_name: Option<&str>) -> LogTarget {
    match open_log_file(file_name.unwrap_or(DEFAULT_LOG_FILE)) {
        Ok((file, path)) => {
            install(BoxMakeWriter::new(move || {
                EventWriter(file.try_clone().ok())
            }));
            tracing::info!("logging to {}", path.display());
            LogTarget::File(path)
        }
        Err(error) => {
            install(BoxMakeWriter::new(io::stderr));
            tracing::warn!(%error, "log file unavailable, using stderr");
            LogTarget::Stderr
        }
    }
}

fn open_log_file(file_name: &str) -> Result<(File, PathBuf)> {
    let state_dir = xdg::BaseDirectories::with_prefix("paperdl")?.get_state_home();
    fs::create_dir_all(&state_dir)?;
    let path = state_dir.join(file_name);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((file, path))
}

fn install(writer: BoxMakeWriter) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,paperdl=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
}
