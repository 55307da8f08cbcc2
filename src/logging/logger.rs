//! Structured logger with dry-run awareness and summary collection.
use std::path::PathBuf;
use std::sync::Mutex;

use super::fields::{DRY_RUN_TARGET, STAGE_TARGET, SUMMARY_TARGET};
use super::subscriber::log_file_path;
use super::types::{FileEntry, FileStatus};

/// Structured logger with dry-run awareness and summary collection.
///
/// Per-file events carry `path` (and `step` or `status`) fields, so the
/// run log at `$XDG_CACHE_HOME/applyconfig/<command>.log` names the file
/// each line belongs to.
#[derive(Debug)]
pub struct Logger {
    files: Mutex<Vec<FileEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger.
    ///
    /// Stores the log file path for display in the run summary.  The log file
    /// itself is created by [`init_subscriber`](super::subscriber::init_subscriber).
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self::with_log_file(log_file_path(command))
    }

    /// Create a logger that reports `log_file` in its summary.
    #[must_use]
    pub const fn with_log_file(log_file: Option<PathBuf>) -> Self {
        Self {
            files: Mutex::new(Vec::new()),
            log_file,
        }
    }

    /// Return the log file path, if available.
    #[must_use]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Return a clone of all recorded file entries.
    #[must_use]
    pub fn entries(&self) -> Vec<FileEntry> {
        self.files.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    /// Log one line of `oc` output produced while applying `path`.
    pub fn output(&self, path: &str, line: &str, dry_run: bool) {
        if dry_run {
            tracing::info!(target: DRY_RUN_TARGET, path, "{line}");
        } else {
            tracing::info!(path, "{line}");
        }
    }

    /// Record a file result for the summary.
    pub fn record_file(&self, path: &str, status: FileStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.files.lock() {
            guard.push(FileEntry {
                path: path.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Return `true` if any recorded file has failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    /// Count the number of failed files.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.files.lock().map_or(0, |guard| {
            guard
                .iter()
                .filter(|f| f.status == FileStatus::Failed)
                .count()
        })
    }

    /// Print the summary of all recorded files.
    pub fn print_summary(&self) {
        let files = self.entries();
        if files.is_empty() {
            return;
        }

        self.stage("Summary");

        let count = |status| files.iter().filter(|f| f.status == status).count();
        for file in &files {
            tracing::info!(
                target: SUMMARY_TARGET,
                path = file.path.as_str(),
                status = %file.status,
                "{}",
                file.message.as_deref().unwrap_or_default()
            );
        }
        self.info(&format!(
            "{} files: {} applied, {} dry-run, {} failed",
            files.len(),
            count(FileStatus::Applied),
            count(FileStatus::DryRun),
            count(FileStatus::Failed),
        ));

        if let Some(path) = &self.log_file {
            self.info(&format!("log: {}", path.display()));
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::isolated_logger;
    use std::fs;

    fn log_contents(log: &Logger) -> String {
        fs::read_to_string(log.log_path().expect("log path")).unwrap()
    }

    #[test]
    fn logger_starts_empty() {
        let (log, _tmp, _guard) = isolated_logger();
        assert!(log.entries().is_empty(), "expected empty file list");
        assert!(!log.has_failures());
    }

    #[test]
    fn record_file_applied() {
        let (log, _tmp, _guard) = isolated_logger();
        log.record_file("01_roles_rbac.yaml", FileStatus::Applied, None);
        let files = log.entries();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "01_roles_rbac.yaml");
        assert_eq!(files[0].status, FileStatus::Applied);
    }

    #[test]
    fn record_file_with_message() {
        let (log, _tmp, _guard) = isolated_logger();
        log.record_file("a_rbac.yaml", FileStatus::Failed, Some("forbidden"));
        assert_eq!(log.entries()[0].message, Some("forbidden".to_string()));
    }

    #[test]
    fn failure_count_returns_correct_count() {
        let (log, _tmp, _guard) = isolated_logger();
        log.record_file("a", FileStatus::Applied, None);
        log.record_file("b", FileStatus::Failed, Some("error 1"));
        log.record_file("c", FileStatus::Failed, Some("error 2"));
        log.record_file("d", FileStatus::DryRun, None);
        assert_eq!(log.failure_count(), 2);
        assert!(log.has_failures());
    }

    #[test]
    fn log_file_has_header() {
        let (log, _tmp, _guard) = isolated_logger();
        assert!(log_contents(&log).contains("applyconfig"));
    }

    #[test]
    fn debug_always_written_to_file() {
        let (log, _tmp, _guard) = isolated_logger();
        log.debug("debug-marker");
        let contents = log_contents(&log);
        assert!(contents.contains("DEBUG debug-marker"), "{contents}");
    }

    #[test]
    fn stage_written_to_file_with_arrow() {
        let (log, _tmp, _guard) = isolated_logger();
        log.stage("stage-marker");
        assert!(log_contents(&log).contains("==>   stage-marker"));
    }

    #[test]
    fn warn_and_error_tagged_in_file() {
        let (log, _tmp, _guard) = isolated_logger();
        log.warn("warn-marker");
        log.error("error-marker");
        let contents = log_contents(&log);
        assert!(contents.contains("WARN  warn-marker"), "{contents}");
        assert!(contents.contains("ERROR error-marker"), "{contents}");
    }

    #[test]
    fn dry_run_written_to_file() {
        let (log, _tmp, _guard) = isolated_logger();
        log.dry_run("dryrun-marker");
        assert!(log_contents(&log).contains("DRY   dryrun-marker"));
    }

    #[test]
    fn output_lines_name_their_file() {
        let (log, _tmp, _guard) = isolated_logger();
        log.output("01_roles_rbac.yaml", "role.rbac/reader configured", false);
        log.output("02_roles_rbac.yaml", "role.rbac/writer created (dry run)", true);
        let contents = log_contents(&log);
        assert!(
            contents.contains("INFO  01_roles_rbac.yaml: role.rbac/reader configured"),
            "{contents}"
        );
        assert!(
            contents.contains("DRY   02_roles_rbac.yaml: role.rbac/writer created (dry run)"),
            "{contents}"
        );
    }

    #[test]
    fn summary_lists_files_without_ansi_in_file() {
        let (log, _tmp, _guard) = isolated_logger();
        log.record_file("01_roles_rbac.yaml", FileStatus::Applied, None);
        log.record_file("02_roles_rbac.yaml", FileStatus::Failed, Some("denied"));
        log.print_summary();
        let contents = log_contents(&log);
        assert!(contents.contains("==>   Summary"), "{contents}");
        assert!(contents.contains("✓ 01_roles_rbac.yaml"));
        assert!(contents.contains("✗ 02_roles_rbac.yaml (denied)"));
        assert!(contents.contains("2 files: 1 applied, 0 dry-run, 1 failed"));
        assert!(!contents.contains('\x1b'), "{contents}");
    }
}
