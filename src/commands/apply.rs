//! Command: apply a config directory.
use anyhow::{Result, bail};
use std::path::Path;

use crate::applier::ConfigApplier;
use crate::cli::ApplyOpts;
use crate::config::{Resolved, Settings};
use crate::error::ApplyError;
use crate::exec::{Executor, SystemExecutor};
use crate::logging::{FileStatus, Logger};
use crate::manifests::{self, ManifestFile};
use crate::oc::OC;
use crate::sniff::is_template;

/// Run the apply command.
///
/// # Errors
///
/// Returns an error if settings cannot be loaded, `oc` is missing, the
/// directory cannot be walked, or any file fails to apply.
pub fn run(opts: &ApplyOpts, log: &Logger) -> Result<()> {
    log.info(&format!("applyconfig {}", super::version::version()));

    log.stage("Loading settings");
    let settings = Settings::load(opts.settings.as_deref(), &opts.config_dir)?
        .merge(opts.overrides())
        .resolve();
    log.info(&format!("level: {}", settings.level));
    if let Some(user) = &settings.user {
        log.info(&format!("impersonating: {user}"));
    }
    if let Some(context) = &settings.context {
        log.info(&format!("context: {context}"));
    }
    if opts.dry_run {
        log.info("dry run: changes will be validated but not persisted");
    }

    let executor = SystemExecutor::new().with_cluster_context(settings.context.as_deref());
    apply_directory(&opts.config_dir, &settings, opts.dry_run, &executor, log)
}

/// Apply every file selected in `dir`, print the summary, and bail if any
/// file failed.
///
/// A failing file does not stop the run; the remaining files are still
/// attempted.
///
/// # Errors
///
/// Returns an error if `oc` is not available, the directory cannot be
/// walked, or one or more files failed to apply.
pub fn apply_directory(
    dir: &Path,
    settings: &Resolved,
    dry_run: bool,
    executor: &dyn Executor,
    log: &Logger,
) -> Result<()> {
    if !executor.which(OC) {
        bail!("'{OC}' not found on PATH");
    }

    log.stage("Discovering config");
    let files = manifests::discover(dir, settings.level)?;
    let shown = dunce::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
    log.info(&format!(
        "{} file(s) selected in {}",
        files.len(),
        shown.display()
    ));
    if files.is_empty() {
        log.warn(&format!(
            "no config files match level '{}'",
            settings.level
        ));
        return Ok(());
    }

    log.stage("Applying config");
    for file in &files {
        apply_file(file, settings.user.as_deref(), dry_run, executor, log);
    }

    log.print_summary();

    if log.has_failures() {
        bail!("{} file(s) failed to apply", log.failure_count());
    }
    Ok(())
}

/// Apply one file, routing templates through `oc process` first, and record
/// the outcome on `log`.
pub fn apply_file(
    file: &ManifestFile,
    user: Option<&str>,
    dry_run: bool,
    executor: &dyn Executor,
    log: &Logger,
) {
    let path = file.path.to_string_lossy().into_owned();
    match dispatch(&path, user, dry_run, executor, log) {
        Ok(output) => {
            for line in String::from_utf8_lossy(&output).lines() {
                log.output(&path, line, dry_run);
            }
            let status = if dry_run {
                FileStatus::DryRun
            } else {
                FileStatus::Applied
            };
            log.record_file(&path, status, None);
        }
        Err(e) => {
            let message = e.to_string();
            log.error(&message);
            log.record_file(e.path(), FileStatus::Failed, Some(&message));
        }
    }
}

fn dispatch(
    path: &str,
    user: Option<&str>,
    dry_run: bool,
    executor: &dyn Executor,
    log: &Logger,
) -> Result<Vec<u8>, ApplyError> {
    let content = std::fs::read(path).map_err(|source| ApplyError::Read {
        path: path.to_string(),
        source,
    })?;

    let applier = ConfigApplier::new(path, executor)
        .impersonating(user)
        .dry_run(dry_run);

    if is_template(content.as_slice()) {
        log.debug(&format!("{path}: template, rendering with oc process"));
        applier.as_template()
    } else {
        applier.as_generic_manifest()
    }
}
