//! Core logging types: per-file entries and their status.
use std::fmt;

/// Outcome of applying one file, kept for the run summary.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Path of the applied file, as displayed.
    pub path: String,
    /// Final status of the file.
    pub status: FileStatus,
    /// Optional detail message (e.g., error description).
    pub message: Option<String>,
}

/// Status of an applied file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// `oc apply` succeeded.
    Applied,
    /// `oc apply --dry-run` succeeded; nothing was persisted.
    DryRun,
    /// Reading, processing or applying the file failed.
    Failed,
}

impl FileStatus {
    /// Marker shown before the file in the run summary.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Applied => "✓",
            Self::DryRun => "~",
            Self::Failed => "✗",
        }
    }

    /// Parse a label produced by `Display`.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "applied" => Some(Self::Applied),
            "dry-run" => Some(Self::DryRun),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applied => write!(f, "applied"),
            Self::DryRun => write!(f, "dry-run"),
            Self::Failed => write!(f, "failed"),
        }
    }
}
