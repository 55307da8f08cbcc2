//! Run settings: an optional TOML file merged with command-line flags.
pub mod toml_loader;

use serde::Deserialize;
use std::path::Path;

use crate::classify::Level;
use crate::error::ConfigError;

/// Settings file looked up inside the config directory when none is given.
pub const SETTINGS_FILE: &str = ".applyconfig.toml";

/// User impersonated at the admin level when no user is configured.
pub const DEFAULT_ADMIN_USER: &str = "system:admin";

/// Optional run settings, as read from a settings file or built from flags.
///
/// ```toml
/// as = "ci-deployer"
/// level = "all"
/// context = "build01"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// User to impersonate.
    #[serde(rename = "as")]
    pub user: Option<String>,
    /// Which config buckets to apply.
    pub level: Option<Level>,
    /// Cluster context passed to every `oc` command.
    pub context: Option<String>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// User to impersonate, if any.
    pub user: Option<String>,
    /// Which config buckets to apply.
    pub level: Level,
    /// Cluster context, if any.
    pub context: Option<String>,
}

impl Settings {
    /// Load settings from `explicit`, or from [`SETTINGS_FILE`] in
    /// `config_dir` when no path is given.
    ///
    /// A missing default settings file yields empty settings.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named file is missing, or if the
    /// file cannot be read or parsed.
    pub fn load(explicit: Option<&Path>, config_dir: &Path) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => toml_loader::load_required(path),
            None => toml_loader::load_config(&config_dir.join(SETTINGS_FILE)),
        }
    }

    /// Overlay `overrides` on top of `self`; values set in `overrides` win.
    #[must_use]
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            user: non_empty(overrides.user).or_else(|| non_empty(self.user)),
            level: overrides.level.or(self.level),
            context: non_empty(overrides.context).or_else(|| non_empty(self.context)),
        }
    }

    /// Fill in defaults.
    ///
    /// The admin level impersonates [`DEFAULT_ADMIN_USER`] unless a user is
    /// set.
    #[must_use]
    pub fn resolve(self) -> Resolved {
        let level = self.level.unwrap_or_default();
        let user = non_empty(self.user).or_else(|| {
            (level == Level::Admin).then(|| DEFAULT_ADMIN_USER.to_string())
        });
        Resolved {
            user,
            level,
            context: non_empty(self.context),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
