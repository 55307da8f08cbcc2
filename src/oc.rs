//! Argument lists for the `oc` client.
use std::fmt;

use crate::exec::CommandLine;

/// Name of the OpenShift client executable.
pub const OC: &str = "oc";

/// Path argument telling `oc apply` to read manifests from stdin.
pub const STDIN_PATH: &str = "-";

/// `oc` subcommand to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OcVerb {
    /// `oc apply`
    Apply,
    /// `oc process`
    Process,
}

impl OcVerb {
    /// The subcommand as passed on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Apply => "apply",
            Self::Process => "process",
        }
    }
}

impl fmt::Display for OcVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build `oc <verb> -f <path>`, impersonating `user` when one is given.
///
/// # Examples
///
/// ```
/// use applyconfig::oc::{OcVerb, make_oc_command};
///
/// let cmd = make_oc_command(OcVerb::Process, "/path/to/file", Some("joe"));
/// assert_eq!(cmd.to_string(), "oc process -f /path/to/file --as joe");
/// ```
#[must_use]
pub fn make_oc_command(verb: OcVerb, path: &str, user: Option<&str>) -> CommandLine {
    let mut cmd = CommandLine::new([OC, verb.as_str(), "-f", path]);
    if let Some(user) = user.filter(|u| !u.is_empty()) {
        cmd.arg("--as").arg(user);
    }
    cmd
}

/// Build `oc apply -f <path>` with optional impersonation, then `--dry-run`
/// last when `dry` is set.
#[must_use]
pub fn make_oc_apply(path: &str, user: Option<&str>, dry: bool) -> CommandLine {
    let mut cmd = make_oc_command(OcVerb::Apply, path, user);
    if dry {
        cmd.arg("--dry-run");
    }
    cmd
}
