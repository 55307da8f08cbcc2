//! Domain-specific error types for applyconfig.
//!
//! Internal modules return typed errors ([`ConfigError`], [`ApplyError`])
//! while command handlers at the CLI boundary convert them to
//! [`anyhow::Error`] via the standard `?` operator.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise while loading settings or locating the config directory.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config directory does not exist.
    #[error("config directory not found: {}", .path.display())]
    MissingDirectory {
        /// Path that was given.
        path: PathBuf,
    },

    /// The config directory path exists but is not a directory.
    #[error("not a directory: {}", .path.display())]
    NotADirectory {
        /// Path that was given.
        path: PathBuf,
    },

    /// An I/O error occurred while reading a settings file or directory.
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        /// Path to the file or directory that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The settings file is not valid TOML or has unexpected keys.
    #[error("Invalid settings in {}: {message}", .path.display())]
    Parse {
        /// Path to the settings file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
}

/// Errors that arise while applying one manifest file.
#[derive(Error, Debug)]
pub enum ApplyError {
    /// The manifest could not be read from disk.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Manifest path.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// `oc process` failed; nothing was applied.
    #[error("failed to process template {path}: {source:#}")]
    Process {
        /// Template path.
        path: String,
        /// Error reported by the executor.
        source: anyhow::Error,
    },

    /// `oc apply` failed.
    #[error("failed to apply {path}: {source:#}")]
    Apply {
        /// Manifest or template path.
        path: String,
        /// Error reported by the executor.
        source: anyhow::Error,
    },
}

impl ApplyError {
    /// Path of the manifest the error refers to.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Read { path, .. } | Self::Process { path, .. } | Self::Apply { path, .. } => {
                path
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io;

    // -----------------------------------------------------------------------
    // ConfigError
    // -----------------------------------------------------------------------

    #[test]
    fn config_error_missing_directory_display() {
        let e = ConfigError::MissingDirectory {
            path: PathBuf::from("/nope"),
        };
        assert_eq!(e.to_string(), "config directory not found: /nope");
    }

    #[test]
    fn config_error_parse_display() {
        let e = ConfigError::Parse {
            path: PathBuf::from("settings.toml"),
            message: "unknown field `lvl`".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "Invalid settings in settings.toml: unknown field `lvl`"
        );
    }

    #[test]
    fn config_error_io_has_source() {
        use std::error::Error as StdError;
        let e = ConfigError::Io {
            path: PathBuf::from("/conf"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.source().is_some());
        assert!(e.to_string().contains("/conf"));
    }

    // -----------------------------------------------------------------------
    // ApplyError
    // -----------------------------------------------------------------------

    #[test]
    fn apply_error_process_display_includes_cause() {
        let e = ApplyError::Process {
            path: "templates/redis.yaml".to_string(),
            source: anyhow::anyhow!("exit 1"),
        };
        assert_eq!(
            e.to_string(),
            "failed to process template templates/redis.yaml: exit 1"
        );
        assert_eq!(e.path(), "templates/redis.yaml");
    }

    #[test]
    fn apply_error_apply_display_includes_cause() {
        let e = ApplyError::Apply {
            path: "-".to_string(),
            source: anyhow::anyhow!("forbidden"),
        };
        assert_eq!(e.to_string(), "failed to apply -: forbidden");
    }

    #[test]
    fn apply_error_read_has_source() {
        use std::error::Error as StdError;
        let e = ApplyError::Read {
            path: "a_rbac.yaml".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert!(e.source().is_some());
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<ConfigError>();
        assert_send_sync::<ApplyError>();
    }

    #[test]
    fn apply_error_converts_to_anyhow() {
        let e = ApplyError::Process {
            path: "p".to_string(),
            source: anyhow::anyhow!("boom"),
        };
        let _anyhow_err: anyhow::Error = e.into();
    }
}
