//! Per-file apply sequencing: direct apply, or process-then-apply for templates.
use crate::error::ApplyError;
use crate::exec::Executor;
use crate::oc::{OcVerb, STDIN_PATH, make_oc_apply, make_oc_command};

/// One unit of work: apply a single manifest or template file.
///
/// Built once per discovered file and consumed by exactly one of
/// [`as_generic_manifest`](Self::as_generic_manifest) or
/// [`as_template`](Self::as_template).
#[derive(Debug)]
pub struct ConfigApplier<'a> {
    path: String,
    user: Option<String>,
    dry: bool,
    executor: &'a dyn Executor,
}

impl<'a> ConfigApplier<'a> {
    /// Create an applier for `path` that runs commands through `executor`.
    #[must_use]
    pub fn new(path: impl Into<String>, executor: &'a dyn Executor) -> Self {
        Self {
            path: path.into(),
            user: None,
            dry: false,
            executor,
        }
    }

    /// Impersonate `user` (`oc --as`) for every command.
    #[must_use]
    pub fn impersonating(mut self, user: Option<&str>) -> Self {
        self.user = user.filter(|u| !u.is_empty()).map(str::to_string);
        self
    }

    /// Pass `--dry-run` to the final `oc apply`.
    #[must_use]
    pub fn dry_run(mut self, dry: bool) -> Self {
        self.dry = dry;
        self
    }

    /// Path of the file this applier works on.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Apply the file directly with `oc apply -f <path>`.
    ///
    /// Returns the output of `oc apply`.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError::Apply`] if the executor reports a failure.
    pub fn as_generic_manifest(self) -> Result<Vec<u8>, ApplyError> {
        let cmd = make_oc_apply(&self.path, self.user.as_deref(), self.dry);
        tracing::debug!(path = self.path.as_str(), step = %OcVerb::Apply, "{cmd}");
        self.executor
            .run_and_check(&cmd, &format!("oc apply {}", self.path))
            .map_err(|source| ApplyError::Apply {
                path: self.path.clone(),
                source,
            })
    }

    /// Render the template with `oc process` and pipe the result into
    /// `oc apply -f -`.
    ///
    /// `oc apply` is never invoked if `oc process` fails.  Dry-run only
    /// affects the apply step.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError::Process`] if processing fails, or
    /// [`ApplyError::Apply`] if applying the processed output fails.
    pub fn as_template(self) -> Result<Vec<u8>, ApplyError> {
        let process = make_oc_command(OcVerb::Process, &self.path, self.user.as_deref());
        tracing::debug!(path = self.path.as_str(), step = %OcVerb::Process, "{process}");
        let rendered = self
            .executor
            .run_and_check(&process, &format!("oc process {}", self.path))
            .map_err(|source| ApplyError::Process {
                path: self.path.clone(),
                source,
            })?;

        let apply = make_oc_apply(STDIN_PATH, self.user.as_deref(), self.dry).with_stdin(rendered);
        tracing::debug!(
            path = self.path.as_str(),
            step = %OcVerb::Apply,
            "{apply} ({} bytes rendered)",
            apply.stdin().map_or(0, <[u8]>::len)
        );
        self.executor
            .run_and_check(&apply, &format!("oc apply {} (processed)", self.path))
            .map_err(|source| ApplyError::Apply {
                path: self.path.clone(),
                source,
            })
    }
}
