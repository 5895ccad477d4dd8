//! Where the CLI keeps its config, session and logs.
//!
//! Locations come from `directories` (XDG on Linux, the platform
//! conventions elsewhere).

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use chrono::Local;
use chrono::NaiveDateTime;
use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "dashboard";
const APPLICATION: &str = "dashboard";

/// Name of the log file being written by the current run.
const LATEST_LOG: &str = "latest.log";

/// Archived logs kept besides the current one.
const MAX_OLD_LOGS: usize = 25;

/// `chrono` format of archive names; sorts chronologically as text.
const ARCHIVE_STAMP: &str = "%Y%m%d_%H%M%S";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Persistent data, such as the session file.
///
/// `~/.local/share/dashboard` on Linux.
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Logs and other files that may be deleted at any time.
///
/// `~/.cache/dashboard` on Linux.
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// `~/.config/dashboard` on Linux.
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Config file read when `--config` is not given.
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.json"))
}

/// Session file used when the config names none.
pub fn session_file() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("session.json"))
}

/// Log file of the current run.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// Archives the previous run's log and prunes old archives.
///
/// Runs before the log file of this run is created, so failures are
/// returned rather than logged.
pub fn rotate_logs() -> io::Result<()> {
    match cache_dir() {
        Some(cache) => rotate_logs_in(&cache, Local::now().naive_local()),
        None => Ok(()),
    }
}

fn rotate_logs_in(cache: &Path, now: NaiveDateTime) -> io::Result<()> {
    let latest = cache.join(LATEST_LOG);
    if latest.is_file() {
        let stamp = now.format(ARCHIVE_STAMP).to_string();
        fs::rename(&latest, free_archive_path(cache, &stamp))?;
    }
    prune_archives(cache, MAX_OLD_LOGS)
}

/// `<stamp>.log`, or `<stamp>_<n>.log` when a run in the same second
/// already took that name.
fn free_archive_path(cache: &Path, stamp: &str) -> PathBuf {
    let mut candidate = cache.join(format!("{stamp}.log"));
    let mut n = 1;
    while candidate.exists() {
        candidate = cache.join(format!("{stamp}_{n}.log"));
        n += 1;
    }
    candidate
}

/// Archived log names, oldest first.
///
/// Archive names start with a sortable timestamp, so name order is age order.
fn archived_logs(cache: &Path) -> io::Result<Vec<PathBuf>> {
    let mut logs = Vec::new();
    for entry in fs::read_dir(cache)? {
        let path = entry?.path();
        let is_archive = path.extension().is_some_and(|ext| ext == "log")
            && path.file_name().is_some_and(|name| name != LATEST_LOG);
        if is_archive {
            logs.push(path);
        }
    }
    logs.sort();
    Ok(logs)
}

/// Deletes the oldest archives beyond `keep`.
fn prune_archives(cache: &Path, keep: usize) -> io::Result<()> {
    if !cache.is_dir() {
        return Ok(());
    }
    let logs = archived_logs(cache)?;
    let excess = logs.len().saturating_sub(keep);
    for path in &logs[..excess] {
        fs::remove_file(path)?;
    }
    Ok(())
}
