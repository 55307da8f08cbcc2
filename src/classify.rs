//! Filename rules that sort configuration files into admin and standard buckets.
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

#[allow(clippy::unreachable)]
static ADMIN_CONFIG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^admin_(\d+_)?.+_rbac\.yaml$").unwrap_or_else(|_| unreachable!())
});

#[allow(clippy::unreachable)]
static STANDARD_CONFIG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+_)?.+_rbac\.yaml$").unwrap_or_else(|_| unreachable!()));

const ADMIN_PREFIX: &str = "admin_";

/// Return `true` if `filename` names an admin-level config file.
///
/// Admin configs start with `admin_`, may carry a numeric ordering prefix
/// and must end in `_rbac.yaml` (`.yml` is not accepted).
///
/// # Examples
///
/// ```
/// use applyconfig::classify::is_admin_config;
///
/// assert!(is_admin_config("admin_01_something_rbac.yaml"));
/// assert!(!is_admin_config("admin_01_something_rbac.yml"));
/// ```
#[must_use]
pub fn is_admin_config(filename: &str) -> bool {
    ADMIN_CONFIG.is_match(filename)
}

/// Return `true` if `filename` names a standard (non-admin) config file.
///
/// Never true for a name that starts with `admin_`, so the two predicates
/// are mutually exclusive.
///
/// # Examples
///
/// ```
/// use applyconfig::classify::is_standard_config;
///
/// assert!(is_standard_config("01_something_rbac.yaml"));
/// assert!(!is_standard_config("admin_01_something.yaml"));
/// ```
#[must_use]
pub fn is_standard_config(filename: &str) -> bool {
    !filename.starts_with(ADMIN_PREFIX)
        && STANDARD_CONFIG.is_match(filename)
}

/// Which buckets of configuration a run applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Only standard configs.
    #[default]
    Standard,
    /// Only admin configs.
    Admin,
    /// Admin configs first, then standard configs.
    All,
}

impl Level {
    /// Whether files in the admin bucket are applied at this level.
    #[must_use]
    pub const fn includes_admin(self) -> bool {
        matches!(self, Self::Admin | Self::All)
    }

    /// Whether files in the standard bucket are applied at this level.
    #[must_use]
    pub const fn includes_standard(self) -> bool {
        matches!(self, Self::Standard | Self::All)
    }

    /// Return `true` if a file named `filename` is applied at this level.
    #[must_use]
    pub fn admits(self, filename: &str) -> bool {
        (self.includes_admin() && is_admin_config(filename))
            || (self.includes_standard() && is_standard_config(filename))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Admin => write!(f, "admin"),
            Self::All => write!(f, "all"),
        }
    }
}
