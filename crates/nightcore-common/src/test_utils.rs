//! Test utilities and shared test helpers for Nightcore Bot.
//!
//! This module provides logging capture, temporary files, and configuration
//! fixtures used by the unit and integration tests of every workspace crate.

use crate::logging::ColorFormatter;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::Level;
use tracing_subscriber::fmt;

/// In-memory writer shared between a subscriber and the test reading it.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    /// Returns everything written so far as UTF-8 text.
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().expect("log buffer poisoned");
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .expect("log buffer poisoned")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a thread-local subscriber using the console format without
/// colors, and returns its result together with the captured output.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let subscriber = fmt()
        .with_ansi(false)
        .with_max_level(Level::TRACE)
        .event_format(ColorFormatter)
        .with_writer(move || writer.clone())
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.contents())
}

/// Counts captured lines logged at `level`.
pub fn count_level(output: &str, level: Level) -> usize {
    let marker = format!(" ~ {level} ~ ");
    output.lines().filter(|line| line.contains(&marker)).count()
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(any(test, feature = "tempfile"))]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Writes `contents` to `dir/name` and returns the full path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("Failed to write test file");
    path
}

/// Configuration-related test utilities.
pub mod config_fixtures {
    /// A `.env` file with every required key plus an unknown one.
    pub fn valid_env_file() -> &'static str {
        "# bot credentials\nBOT_TOKEN=test_token\nUNRELATED_KEY=ignored\n"
    }

    /// A `.env` file missing `BOT_TOKEN`.
    pub fn env_file_without_token() -> &'static str {
        "UNRELATED_KEY=ignored\n"
    }

    /// A `nightcore.toml` that disables events and overrides one timeout.
    pub fn partial_runtime_toml() -> &'static str {
        concat!(
            "[extensions.categories]\n",
            "events = false\n",
            "\n",
            "[transport]\n",
            "sync_timeout_secs = 5\n"
        )
    }
}
